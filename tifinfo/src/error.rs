use std::path::PathBuf;

use thiserror::Error;

/// Per-file failure while surveying a raster.
///
/// Each variant maps to a stable short name (see [`SurveyError::kind`]) which is
/// written to the `error` column of the summary CSV.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("failed to open raster {path:?}: {message}")]
    Open { path: PathBuf, message: String },

    #[error("raster has no embedded projection")]
    MissingProjection,

    #[error("invalid spatial reference: {0}")]
    SpatialRef(String),

    #[error("failed to reproject ({x}, {y}): {message}")]
    Reproject { x: f64, y: f64, message: String },

    #[error("raster has no geotransform: {0}")]
    MissingTransform(String),

    #[error("degenerate geotransform {0:?}")]
    DegenerateTransform([f64; 6]),

    #[error("raster has no band {requested} (band count: {available})")]
    MissingBand { requested: usize, available: usize },

    #[error("failed to read band {band}: {message}")]
    Band { band: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl SurveyError {
    /// Short name written to the summary's `error` column
    pub fn kind(&self) -> &'static str {
        match self {
            SurveyError::Open { .. } => "open",
            SurveyError::MissingProjection | SurveyError::SpatialRef(_) => "projection",
            SurveyError::Reproject { .. } => "reproject",
            SurveyError::MissingTransform(_) | SurveyError::DegenerateTransform(_) => {
                "geotransform"
            }
            SurveyError::MissingBand { .. } | SurveyError::Band { .. } => "band",
            SurveyError::Io(_) | SurveyError::Csv(_) => "io",
        }
    }
}

pub type SurveyResult<T> = std::result::Result<T, SurveyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(SurveyError::MissingProjection.kind(), "projection");
        assert_eq!(
            SurveyError::MissingBand {
                requested: 1,
                available: 0
            }
            .kind(),
            "band"
        );
        assert_eq!(
            SurveyError::DegenerateTransform([0.0; 6]).kind(),
            "geotransform"
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(SurveyError::from(io).kind(), "io");
    }

    #[test]
    fn test_open_message_names_path() {
        let err = SurveyError::Open {
            path: PathBuf::from("Geotiff/batch1/a.tif"),
            message: "not recognized as a supported file format".to_string(),
        };
        assert!(err.to_string().contains("a.tif"));
        assert_eq!(err.kind(), "open");
    }
}
