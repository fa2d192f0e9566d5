use gdal::Dataset;
use std::path::{Path, PathBuf};

use crate::error::{SurveyError, SurveyResult};
use crate::geometric::geotransform::GeoTransform;

/// One band read fully into memory, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct BandData {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<f64>,
}

impl BandData {
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(rows * cols, values.len());
        BandData { rows, cols, values }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            self.values.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Iterate `(row, col, value)` with rows outer, columns inner
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let cols = self.cols.max(1);
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / cols, i % cols, v))
    }
}

/// Read access to a georeferenced raster
pub trait RasterSource {
    /// (width, height) in pixels
    fn size(&self) -> (usize, usize);

    fn geo_transform(&self) -> SurveyResult<GeoTransform>;

    /// WKT of the raster's spatial reference; empty when none is embedded
    fn projection_wkt(&self) -> String;

    fn band_count(&self) -> usize;

    /// Read band `index` (1-based) completely
    fn read_band(&self, index: usize) -> SurveyResult<BandData>;
}

/// Raster backed by a GDAL dataset. The dataset is closed on drop.
pub struct GdalRaster {
    path: PathBuf,
    dataset: Dataset,
}

impl GdalRaster {
    pub fn open(path: &Path) -> SurveyResult<Self> {
        let dataset = Dataset::open(path).map_err(|e| SurveyError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(GdalRaster {
            path: path.to_path_buf(),
            dataset,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RasterSource for GdalRaster {
    fn size(&self) -> (usize, usize) {
        self.dataset.raster_size()
    }

    fn geo_transform(&self) -> SurveyResult<GeoTransform> {
        let gt = self
            .dataset
            .geo_transform()
            .map_err(|e| SurveyError::MissingTransform(e.to_string()))?;
        Ok(GeoTransform::new(gt))
    }

    fn projection_wkt(&self) -> String {
        self.dataset.projection()
    }

    fn band_count(&self) -> usize {
        self.dataset.raster_count() as usize
    }

    fn read_band(&self, index: usize) -> SurveyResult<BandData> {
        let available = self.band_count();
        if index == 0 || index > available {
            return Err(SurveyError::MissingBand {
                requested: index,
                available,
            });
        }

        let band = self
            .dataset
            .rasterband(index)
            .map_err(|e| SurveyError::Band {
                band: index,
                message: e.to_string(),
            })?;

        let (width, height) = self.size();
        let buffer = band
            .read_as::<f64>((0, 0), (width, height), (width, height), None)
            .map_err(|e| SurveyError::Band {
                band: index,
                message: e.to_string(),
            })?;

        Ok(BandData::new(height, width, buffer.data().to_vec()))
    }
}

/// Raster held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryRaster {
    pub width: usize,
    pub height: usize,
    pub geo_transform: [f64; 6],
    pub projection: String,
    pub bands: Vec<Vec<f64>>,
}

impl MemoryRaster {
    /// Single-band raster filled with `value`
    pub fn filled(
        width: usize,
        height: usize,
        geo_transform: [f64; 6],
        projection: impl Into<String>,
        value: f64,
    ) -> Self {
        MemoryRaster {
            width,
            height,
            geo_transform,
            projection: projection.into(),
            bands: vec![vec![value; width * height]],
        }
    }
}

impl RasterSource for MemoryRaster {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn geo_transform(&self) -> SurveyResult<GeoTransform> {
        Ok(GeoTransform::new(self.geo_transform))
    }

    fn projection_wkt(&self) -> String {
        self.projection.clone()
    }

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn read_band(&self, index: usize) -> SurveyResult<BandData> {
        let values = index
            .checked_sub(1)
            .and_then(|i| self.bands.get(i))
            .ok_or(SurveyError::MissingBand {
                requested: index,
                available: self.bands.len(),
            })?;
        Ok(BandData::new(self.height, self.width, values.clone()))
    }
}
