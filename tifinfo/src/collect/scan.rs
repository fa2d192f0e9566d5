use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory listing filtered by extension
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    /// Entries seen in the directory, matching or not
    pub entries: usize,
    /// Matching regular files, sorted by file name
    pub matches: Vec<PathBuf>,
}

/// Whether `path`'s file name ends with `extension` (case-sensitive)
pub fn matches_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(extension))
        .unwrap_or(false)
}

/// List the immediate entries of `dir` (no recursion) and keep the regular
/// files whose name ends with `extension`.
pub fn scan_directory(dir: &Path, extension: &str) -> io::Result<ScanResult> {
    let mut result = ScanResult::default();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        result.entries += 1;
        if path.is_file() && matches_extension(&path, extension) {
            result.matches.push(path);
        }
    }

    result
        .matches
        .sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_extension_uses_file_name() {
        assert!(matches_extension(Path::new("batch1/a.tif"), ".tif"));
        assert!(!matches_extension(Path::new("batch1.tif/a.txt"), ".tif"));
        assert!(!matches_extension(Path::new("a.TIF"), ".tif"));
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.tif", "a.tif", "b.tif.aux.xml", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.tif")).unwrap();

        let scan = scan_directory(dir.path(), ".tif").unwrap();
        assert_eq!(scan.entries, 5);
        let names: Vec<_> = scan
            .matches
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.tif", "c.tif"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_directory(&dir.path().join("absent"), ".tif").is_err());
    }
}
