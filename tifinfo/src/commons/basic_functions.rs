use std::path::Path;

/// Final path component as a string, or the whole path when it has none
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Shortest representation that round-trips, always with a fractional part
/// for finite integral values (`500000.0`, `-30.0`, `0.1`).
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("Geotiff/batch1/be_1.tif")), "be_1.tif");
        assert_eq!(display_name(Path::new("be_1.tif")), "be_1.tif");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(500000.0), "500000.0");
        assert_eq!(format_float(-30.0), "-30.0");
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(f64::NAN), "NaN");
    }
}
