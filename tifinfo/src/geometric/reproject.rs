use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use proj::Proj;
use std::fmt;
use std::str::FromStr;

use crate::error::{SurveyError, SurveyResult};
use crate::geo_core::{GeoPoint, WGS84_CRS, WGS84_WKT};

/// Converts between a raster's native coordinates and WGS84 latitude/longitude
pub trait Reprojector {
    fn to_geographic(&self, x: f64, y: f64) -> SurveyResult<GeoPoint>;

    fn from_geographic(&self, point: GeoPoint) -> SurveyResult<(f64, f64)>;
}

/// Which library performs the coordinate transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReprojectorKind {
    #[default]
    Gdal,
    Proj,
}

impl ReprojectorKind {
    /// Build a native -> WGS84 reprojector for the spatial reference in `wkt`
    pub fn build(self, wkt: &str) -> SurveyResult<Box<dyn Reprojector>> {
        if wkt.trim().is_empty() {
            return Err(SurveyError::MissingProjection);
        }
        Ok(match self {
            ReprojectorKind::Gdal => Box::new(GdalReprojector::from_wkt(wkt)?),
            ReprojectorKind::Proj => Box::new(ProjReprojector::from_wkt(wkt)?),
        })
    }
}

impl fmt::Display for ReprojectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReprojectorKind::Gdal => write!(f, "gdal"),
            ReprojectorKind::Proj => write!(f, "proj"),
        }
    }
}

impl FromStr for ReprojectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gdal" => Ok(ReprojectorKind::Gdal),
            "proj" => Ok(ReprojectorKind::Proj),
            other => Err(format!("unknown reprojector '{}' (expected gdal or proj)", other)),
        }
    }
}

/// GDAL/OSR coordinate transformation.
///
/// Both spatial references use traditional GIS axis order so that x is always
/// easting/longitude, matching the geotransform's convention.
pub struct GdalReprojector {
    forward: CoordTransform,
    inverse: CoordTransform,
}

impl GdalReprojector {
    pub fn from_wkt(wkt: &str) -> SurveyResult<Self> {
        let mut source =
            SpatialRef::from_wkt(wkt).map_err(|e| SurveyError::SpatialRef(e.to_string()))?;
        source.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

        let mut target = SpatialRef::from_wkt(WGS84_WKT)
            .map_err(|e| SurveyError::SpatialRef(e.to_string()))?;
        target.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

        let forward = CoordTransform::new(&source, &target)
            .map_err(|e| SurveyError::SpatialRef(e.to_string()))?;
        let inverse = CoordTransform::new(&target, &source)
            .map_err(|e| SurveyError::SpatialRef(e.to_string()))?;

        Ok(GdalReprojector { forward, inverse })
    }

    fn transform(transform: &CoordTransform, x: f64, y: f64) -> SurveyResult<(f64, f64)> {
        let mut xs = [x];
        let mut ys = [y];
        let mut zs = [0.0_f64];
        transform
            .transform_coords(&mut xs, &mut ys, &mut zs)
            .map_err(|e| SurveyError::Reproject {
                x,
                y,
                message: e.to_string(),
            })?;
        Ok((xs[0], ys[0]))
    }
}

impl Reprojector for GdalReprojector {
    fn to_geographic(&self, x: f64, y: f64) -> SurveyResult<GeoPoint> {
        let (lng, lat) = Self::transform(&self.forward, x, y)?;
        Ok(GeoPoint::new(lat, lng))
    }

    fn from_geographic(&self, point: GeoPoint) -> SurveyResult<(f64, f64)> {
        Self::transform(&self.inverse, point.lng, point.lat)
    }
}

/// PROJ transformation; `new_known_crs` normalises axis order to (lon, lat)
pub struct ProjReprojector {
    forward: Proj,
    inverse: Proj,
}

impl ProjReprojector {
    pub fn from_wkt(wkt: &str) -> SurveyResult<Self> {
        let forward = Proj::new_known_crs(wkt, WGS84_CRS, None)
            .map_err(|e| SurveyError::SpatialRef(e.to_string()))?;
        let inverse = Proj::new_known_crs(WGS84_CRS, wkt, None)
            .map_err(|e| SurveyError::SpatialRef(e.to_string()))?;
        Ok(ProjReprojector { forward, inverse })
    }
}

impl Reprojector for ProjReprojector {
    fn to_geographic(&self, x: f64, y: f64) -> SurveyResult<GeoPoint> {
        let (lng, lat) = self
            .forward
            .convert((x, y))
            .map_err(|e| SurveyError::Reproject {
                x,
                y,
                message: e.to_string(),
            })?;
        Ok(GeoPoint::new(lat, lng))
    }

    fn from_geographic(&self, point: GeoPoint) -> SurveyResult<(f64, f64)> {
        self.inverse
            .convert((point.lng, point.lat))
            .map_err(|e| SurveyError::Reproject {
                x: point.lng,
                y: point.lat,
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometric::raster::test_support::utm33_wkt;

    const TOLERANCE_DEG: f64 = 1e-9;
    const TOLERANCE_M: f64 = 1e-4;

    fn check_reference_point(kind: ReprojectorKind) {
        let reprojector = kind.build(&utm33_wkt()).unwrap();
        // UTM 33N false easting on the equator is the zone's central meridian
        let p = reprojector.to_geographic(500000.0, 0.0).unwrap();
        assert!(p.lat.abs() < TOLERANCE_DEG, "{}: lat {}", kind, p.lat);
        assert!((p.lng - 15.0).abs() < TOLERANCE_DEG, "{}: lng {}", kind, p.lng);
    }

    fn check_round_trip(kind: ReprojectorKind) {
        let reprojector = kind.build(&utm33_wkt()).unwrap();
        let (x, y) = (503000.0, 4100000.0);
        let p = reprojector.to_geographic(x, y).unwrap();
        assert!(p.lat > 36.0 && p.lat < 38.0, "{}: lat {}", kind, p.lat);
        let (bx, by) = reprojector.from_geographic(p).unwrap();
        assert!((bx - x).abs() < TOLERANCE_M, "{}: x {}", kind, bx);
        assert!((by - y).abs() < TOLERANCE_M, "{}: y {}", kind, by);
    }

    #[test]
    fn test_gdal_reference_point() {
        check_reference_point(ReprojectorKind::Gdal);
    }

    #[test]
    fn test_proj_reference_point() {
        check_reference_point(ReprojectorKind::Proj);
    }

    #[test]
    fn test_gdal_round_trip() {
        check_round_trip(ReprojectorKind::Gdal);
    }

    #[test]
    fn test_proj_round_trip() {
        check_round_trip(ReprojectorKind::Proj);
    }

    #[test]
    fn test_backends_agree() {
        let wkt = utm33_wkt();
        let a = ReprojectorKind::Gdal.build(&wkt).unwrap();
        let b = ReprojectorKind::Proj.build(&wkt).unwrap();
        let pa = a.to_geographic(420000.0, 5200000.0).unwrap();
        let pb = b.to_geographic(420000.0, 5200000.0).unwrap();
        assert!((pa.lat - pb.lat).abs() < 1e-7);
        assert!((pa.lng - pb.lng).abs() < 1e-7);
    }

    #[test]
    fn test_missing_projection() {
        let err = ReprojectorKind::Gdal.build("  ").err().unwrap();
        assert!(matches!(err, SurveyError::MissingProjection));
        assert_eq!(err.kind(), "projection");
    }

    #[test]
    fn test_invalid_wkt() {
        let err = ReprojectorKind::Gdal.build("NOT A WKT").err().unwrap();
        assert_eq!(err.kind(), "projection");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("GDAL".parse::<ReprojectorKind>(), Ok(ReprojectorKind::Gdal));
        assert_eq!("proj".parse::<ReprojectorKind>(), Ok(ReprojectorKind::Proj));
        assert!("osr".parse::<ReprojectorKind>().is_err());
        assert_eq!(ReprojectorKind::default().to_string(), "gdal");
    }
}
