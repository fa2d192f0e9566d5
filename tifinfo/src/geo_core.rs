use geo::Point;

/// WGS84 geographic coordinate system (EPSG:4326), the fixed target of every
/// reprojection regardless of the input raster's own spatial reference.
pub const WGS84_WKT: &str = r#"GEOGCS["WGS 84",
    DATUM["WGS_1984",
        SPHEROID["WGS 84",6378137,298.257223563,
            AUTHORITY["EPSG","7030"]],
        AUTHORITY["EPSG","6326"]],
    PRIMEM["Greenwich",0,
        AUTHORITY["EPSG","8901"]],
    UNIT["degree",0.01745329251994328,
        AUTHORITY["EPSG","9122"]],
    AUTHORITY["EPSG","4326"]]"#;

/// Same system as [`WGS84_WKT`], in the form PROJ expects
pub const WGS84_CRS: &str = "EPSG:4326";

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lng, p.lat)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(p: Point<f64>) -> Self {
        GeoPoint::new(p.y(), p.x())
    }
}

/// Bounding box in the raster's native coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn min_corner(&self) -> Point<f64> {
        Point::new(self.min_x, self.min_y)
    }

    pub fn max_corner(&self) -> Point<f64> {
        Point::new(self.max_x, self.max_y)
    }

    /// Extent along x (max_x - min_x)
    pub fn delta_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along y (max_y - min_y)
    pub fn delta_y(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Geographic image of a [`BoundingBox`].
///
/// Only the (min_x, min_y) and (max_x, max_y) corners are reprojected, so
/// `lat_min` is the latitude of the min corner rather than the smallest
/// latitude covered. For rasters with skew terms this under-approximates the
/// true footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl GeoBounds {
    pub fn from_corners(min: GeoPoint, max: GeoPoint) -> Self {
        GeoBounds {
            lat_min: min.lat,
            lat_max: max.lat,
            lng_min: min.lng,
            lng_max: max.lng,
        }
    }

    pub fn min_corner(&self) -> GeoPoint {
        GeoPoint::new(self.lat_min, self.lng_min)
    }

    pub fn max_corner(&self) -> GeoPoint {
        GeoPoint::new(self.lat_max, self.lng_max)
    }
}
