use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info};

use crate::config::{ElevationDumpConfig, SurveyConfig};
use crate::error::SurveyResult;
use crate::geo_core::GeoBounds;
use crate::geometric::dump::write_dump_file;
use crate::geometric::elevation::ElevationSummary;
use crate::geometric::geotransform::ground_resolution;
use crate::geometric::raster::{BandData, GdalRaster, RasterSource};
use crate::geometric::record::OutputRecord;
use crate::geometric::reproject::ReprojectorKind;

/// Turns one raster into one [`OutputRecord`]
#[derive(Debug, Clone)]
pub struct FileProcessor {
    band: usize,
    reprojector: ReprojectorKind,
    dump: Option<ElevationDumpConfig>,
}

impl FileProcessor {
    pub fn new(config: &SurveyConfig) -> Self {
        FileProcessor {
            band: config.band,
            reprojector: config.reprojector,
            dump: config.elevation.clone(),
        }
    }

    /// Open `path` with GDAL and process it. The dataset is closed before
    /// returning, on success and on error.
    pub fn process_file(&self, path: &Path) -> SurveyResult<OutputRecord> {
        let raster = GdalRaster::open(path)?;
        self.process(&raster, path.file_name().unwrap_or(path.as_os_str()))
    }

    /// Summarize `raster` and write its per-pixel dump when configured
    pub fn process<R: RasterSource + ?Sized>(
        &self,
        raster: &R,
        file_name: &OsStr,
    ) -> SurveyResult<OutputRecord> {
        let name = file_name.to_string_lossy();
        let (record, band) = self.summarize(raster, &name)?;

        if let Some(dump) = &self.dump {
            let path = write_dump_file(&dump.dir, file_name, &record, &band, dump.with_index)?;
            info!(file = %name, dump = ?path, "Wrote elevation dump");
        }

        Ok(record)
    }

    /// Bounds, WGS84 corners and elevation statistics of `raster`, plus the
    /// band that was read
    pub fn summarize<R: RasterSource + ?Sized>(
        &self,
        raster: &R,
        name: &str,
    ) -> SurveyResult<(OutputRecord, BandData)> {
        let reprojector = self.reprojector.build(&raster.projection_wkt())?;

        let (width, height) = raster.size();
        let gt = raster.geo_transform()?.validate()?;
        if gt.has_skew() {
            debug!(
                file = %name,
                xskew = gt.xskew(),
                yskew = gt.yskew(),
                "Skewed raster: geographic bounds only cover the two reprojected corners"
            );
        }

        let bounds = gt.bounds(width, height);
        let min = reprojector.to_geographic(bounds.min_x, bounds.min_y)?;
        let max = reprojector.to_geographic(bounds.max_x, bounds.max_y)?;
        let geo_bounds = GeoBounds::from_corners(min, max);

        let band = raster.read_band(self.band)?;
        let elevation = ElevationSummary::from_band(&band);

        debug!(
            file = %name,
            width,
            height,
            totpix = width * height,
            gt = ?gt.0,
            minx = bounds.min_x,
            miny = bounds.min_y,
            maxx = bounds.max_x,
            maxy = bounds.max_y,
            latlong_min = ?(min.lat, min.lng),
            latlong_max = ?(max.lat, max.lng),
            meanelev = elevation.mean,
            "Processed raster"
        );

        let record = OutputRecord {
            filename: name.to_string(),
            width,
            height,
            bounds,
            geo_bounds,
            geo_transform: gt,
            elevation,
            ground_resolution: ground_resolution(&bounds, width, height),
        };
        Ok((record, band))
    }
}
