use crate::error::{SurveyError, SurveyResult};
use crate::geo_core::BoundingBox;

/// GDAL-style affine transform from pixel/line to georeferenced coordinates.
///
/// Coefficient order: `[ulx, xres, xskew, uly, yskew, yres]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    pub fn new(coefficients: [f64; 6]) -> Self {
        GeoTransform(coefficients)
    }

    pub fn ulx(&self) -> f64 {
        self.0[0]
    }

    pub fn xres(&self) -> f64 {
        self.0[1]
    }

    pub fn xskew(&self) -> f64 {
        self.0[2]
    }

    pub fn uly(&self) -> f64 {
        self.0[3]
    }

    pub fn yskew(&self) -> f64 {
        self.0[4]
    }

    pub fn yres(&self) -> f64 {
        self.0[5]
    }

    pub fn has_skew(&self) -> bool {
        self.xskew() != 0.0 || self.yskew() != 0.0
    }

    /// Reject transforms that cannot georeference anything: non-finite
    /// coefficients or a singular linear part.
    pub fn validate(self) -> SurveyResult<Self> {
        let determinant = self.xres() * self.yres() - self.xskew() * self.yskew();
        if self.0.iter().any(|c| !c.is_finite()) || determinant == 0.0 {
            return Err(SurveyError::DegenerateTransform(self.0));
        }
        Ok(self)
    }

    /// Georeferenced position of pixel/line `(px, py)`
    pub fn apply(&self, px: f64, py: f64) -> (f64, f64) {
        let x = self.ulx() + px * self.xres() + py * self.xskew();
        let y = self.uly() + px * self.yskew() + py * self.yres();
        (x, y)
    }

    /// Native bounding box of a `width` x `height` raster.
    ///
    /// Assumes the usual north-up sign convention (`yres < 0`); south-up
    /// rasters come out with min/max swapped on y.
    pub fn bounds(&self, width: usize, height: usize) -> BoundingBox {
        let (w, h) = (width as f64, height as f64);
        let min_x = self.ulx();
        let min_y = self.uly() + w * self.yskew() + h * self.yres();
        let max_x = self.ulx() + w * self.xres() + h * self.xskew();
        let max_y = self.uly();
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }
}

impl From<[f64; 6]> for GeoTransform {
    fn from(coefficients: [f64; 6]) -> Self {
        GeoTransform(coefficients)
    }
}

/// Ground units per pixel along x and y, derived from the bounding box extent.
/// A zero dimension gives 0 on that axis.
pub fn ground_resolution(bounds: &BoundingBox, width: usize, height: usize) -> (f64, f64) {
    let x = if width == 0 {
        0.0
    } else {
        bounds.delta_x() / width as f64
    };
    let y = if height == 0 {
        0.0
    } else {
        bounds.delta_y() / height as f64
    };
    (x, y)
}
