pub mod collect;
pub mod commons;
pub mod config;
pub mod error;
pub mod geo_core;
pub mod geometric;

pub use collect::driver::{SurveyDriver, SurveyReport};
pub use config::{ElevationDumpConfig, SurveyConfig};
pub use error::SurveyError;
pub use geometric::processor::FileProcessor;
pub use geometric::record::{FailedEntry, OutputRecord, SummaryRow};
pub use geometric::reproject::ReprojectorKind;
