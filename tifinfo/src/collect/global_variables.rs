/// Input directory scanned when none is given
pub const DEFAULT_GEOTIFF_DIRECTORY: &str = "Geotiff/batch1";

/// Input directory selected by `--geotiff_big_directory`
pub const DEFAULT_GEOTIFF_BIG_DIRECTORY: &str = "Geotiff/big";

pub const DEFAULT_SUMMARY_FILE: &str = "tifinfo.csv";

/// Per-pixel dumps land here; the directory must already exist
pub const DEFAULT_ELEVATION_DIR: &str = "output";

pub const DEFAULT_EXTENSION: &str = ".tif";

/// 1-based index of the elevation band
pub const DEFAULT_BAND: usize = 1;
