use serde::Serialize;
use std::io::Write;

use crate::error::{SurveyError, SurveyResult};
use crate::geo_core::{BoundingBox, GeoBounds};
use crate::geometric::elevation::ElevationSummary;
use crate::geometric::geotransform::GeoTransform;

/// Summary CSV header. The first 20 columns are the historical layout
/// (including the `xes` spelling); `error` is empty for processed files.
pub const SUMMARY_HEADER: [&str; 21] = [
    "filename", "width", "height", "minx", "maxx", "miny", "maxy", "latmin", "latmax", "lngmin",
    "lngmax", "ulx", "uly", "xes", "yres", "xskew", "yskew", "nxelev", "nyelev", "meanelev",
    "error",
];

/// Everything derived from one successfully processed raster
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub filename: String,
    pub width: usize,
    pub height: usize,
    pub bounds: BoundingBox,
    pub geo_bounds: GeoBounds,
    pub geo_transform: GeoTransform,
    pub elevation: ElevationSummary,
    /// Ground units per pixel (x, y); 0 on an axis with no pixels
    pub ground_resolution: (f64, f64),
}

/// A raster that could not be processed
#[derive(Debug, Clone, PartialEq)]
pub struct FailedEntry {
    pub filename: String,
    pub kind: &'static str,
    pub message: String,
}

impl FailedEntry {
    pub fn new(filename: impl Into<String>, error: &SurveyError) -> Self {
        FailedEntry {
            filename: filename.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Processed(OutputRecord),
    Failed(FailedEntry),
}

impl FileOutcome {
    pub fn filename(&self) -> &str {
        match self {
            FileOutcome::Processed(r) => &r.filename,
            FileOutcome::Failed(f) => &f.filename,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed(_))
    }
}

/// One line of the summary CSV, in [`SUMMARY_HEADER`] order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryRow {
    pub filename: String,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub minx: Option<f64>,
    pub maxx: Option<f64>,
    pub miny: Option<f64>,
    pub maxy: Option<f64>,
    pub latmin: Option<f64>,
    pub latmax: Option<f64>,
    pub lngmin: Option<f64>,
    pub lngmax: Option<f64>,
    pub ulx: Option<f64>,
    pub uly: Option<f64>,
    #[serde(rename = "xes")]
    pub xres: Option<f64>,
    pub yres: Option<f64>,
    pub xskew: Option<f64>,
    pub yskew: Option<f64>,
    pub nxelev: Option<usize>,
    pub nyelev: Option<usize>,
    pub meanelev: Option<f64>,
    pub error: Option<String>,
}

impl From<&OutputRecord> for SummaryRow {
    fn from(r: &OutputRecord) -> Self {
        SummaryRow {
            filename: r.filename.clone(),
            width: Some(r.width),
            height: Some(r.height),
            minx: Some(r.bounds.min_x),
            maxx: Some(r.bounds.max_x),
            miny: Some(r.bounds.min_y),
            maxy: Some(r.bounds.max_y),
            latmin: Some(r.geo_bounds.lat_min),
            latmax: Some(r.geo_bounds.lat_max),
            lngmin: Some(r.geo_bounds.lng_min),
            lngmax: Some(r.geo_bounds.lng_max),
            ulx: Some(r.geo_transform.ulx()),
            uly: Some(r.geo_transform.uly()),
            xres: Some(r.geo_transform.xres()),
            yres: Some(r.geo_transform.yres()),
            xskew: Some(r.geo_transform.xskew()),
            yskew: Some(r.geo_transform.yskew()),
            nxelev: Some(r.elevation.rows),
            nyelev: Some(r.elevation.cols),
            meanelev: Some(r.elevation.mean),
            error: None,
        }
    }
}

impl From<&FailedEntry> for SummaryRow {
    fn from(f: &FailedEntry) -> Self {
        SummaryRow {
            filename: f.filename.clone(),
            error: Some(f.kind.to_string()),
            ..Default::default()
        }
    }
}

impl From<&FileOutcome> for SummaryRow {
    fn from(outcome: &FileOutcome) -> Self {
        match outcome {
            FileOutcome::Processed(r) => r.into(),
            FileOutcome::Failed(f) => f.into(),
        }
    }
}

/// Write the header and one line per outcome, `\n`-terminated
pub fn write_summary<W: Write>(writer: W, outcomes: &[FileOutcome]) -> SurveyResult<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(SUMMARY_HEADER)?;
    for outcome in outcomes {
        csv.serialize(SummaryRow::from(outcome))?;
    }
    csv.flush().map_err(SurveyError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_core::GeoPoint;

    fn record() -> OutputRecord {
        let gt = GeoTransform::new([500000.0, 30.0, 0.0, 4100000.0, 0.0, -30.0]);
        OutputRecord {
            filename: "be_1.tif".to_string(),
            width: 2,
            height: 3,
            bounds: gt.bounds(2, 3),
            geo_bounds: GeoBounds::from_corners(
                GeoPoint::new(37.0, 15.0),
                GeoPoint::new(37.5, 15.25),
            ),
            geo_transform: gt,
            elevation: ElevationSummary {
                rows: 3,
                cols: 2,
                mean: 12.5,
            },
            ground_resolution: (30.0, -30.0),
        }
    }

    fn to_string(outcomes: &[FileOutcome]) -> String {
        let mut out = Vec::new();
        write_summary(&mut out, outcomes).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_only() {
        assert_eq!(
            to_string(&[]),
            "filename,width,height,minx,maxx,miny,maxy,latmin,latmax,lngmin,lngmax,\
             ulx,uly,xes,yres,xskew,yskew,nxelev,nyelev,meanelev,error\n"
        );
    }

    #[test]
    fn test_processed_row() {
        let text = to_string(&[FileOutcome::Processed(record())]);
        let line = text.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "be_1.tif,2,3,500000.0,500060.0,4099910.0,4100000.0,37.0,37.5,15.0,15.25,\
             500000.0,4100000.0,30.0,-30.0,0.0,0.0,3,2,12.5,"
        );
        assert_eq!(line.split(',').count(), SUMMARY_HEADER.len());
    }

    #[test]
    fn test_failed_row() {
        let failed = FailedEntry::new("bad.tif", &SurveyError::MissingProjection);
        let text = to_string(&[FileOutcome::Failed(failed)]);
        let line = text.lines().nth(1).unwrap();
        assert!(line.starts_with("bad.tif,,,"));
        assert!(line.ends_with(",projection"));
        assert_eq!(line.split(',').count(), SUMMARY_HEADER.len());
    }

    #[test]
    fn test_filename_with_comma_is_quoted() {
        let mut r = record();
        r.filename = "a,b.tif".to_string();
        let text = to_string(&[FileOutcome::Processed(r)]);
        assert!(text.lines().nth(1).unwrap().starts_with("\"a,b.tif\","));
    }
}
