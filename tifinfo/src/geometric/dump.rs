use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::commons::basic_functions::format_float as f;
use crate::error::SurveyResult;
use crate::geometric::raster::BandData;
use crate::geometric::record::OutputRecord;

pub const DUMP_EXTENSION: &str = "csvc";

/// `<dir>/<file name>.csvc`, built from the raw file name so non UTF-8
/// names keep distinct dump files
pub fn dump_path(dir: &Path, file_name: &OsStr) -> PathBuf {
    let mut name = file_name.to_os_string();
    name.push(".");
    name.push(DUMP_EXTENSION);
    dir.join(name)
}

/// Write the per-pixel elevation dump for one raster.
///
/// Layout: `#`-prefixed metadata lines, `##` for the mean, a column header,
/// then one line per pixel (rows outer, columns inner), values with two
/// decimals.
pub fn write_dump<W: Write>(
    mut w: W,
    record: &OutputRecord,
    band: &BandData,
    with_index: bool,
) -> SurveyResult<()> {
    let b = &record.bounds;
    let g = &record.geo_bounds;
    let gt = &record.geo_transform;

    writeln!(w, "# filename: {}", record.filename)?;
    writeln!(w, "# shape: {},{}", band.rows, band.cols)?;
    writeln!(
        w,
        "# bounds: minx={},maxx={},miny={},maxy={}",
        f(b.min_x),
        f(b.max_x),
        f(b.min_y),
        f(b.max_y)
    )?;
    writeln!(
        w,
        "# latlng: latmin={},latmax={},lngmin={},lngmax={}",
        f(g.lat_min),
        f(g.lat_max),
        f(g.lng_min),
        f(g.lng_max)
    )?;
    writeln!(
        w,
        "# geotransform: ulx={},xres={},xskew={},uly={},yskew={},yres={}",
        f(gt.ulx()),
        f(gt.xres()),
        f(gt.xskew()),
        f(gt.uly()),
        f(gt.yskew()),
        f(gt.yres())
    )?;
    writeln!(
        w,
        "# resolution: xres_m={},yres_m={}",
        f(record.ground_resolution.0),
        f(record.ground_resolution.1)
    )?;
    writeln!(w, "## meanelev: {}", f(record.elevation.mean))?;

    if with_index {
        writeln!(w, "row,col,elev")?;
        for (row, col, value) in band.cells() {
            writeln!(w, "{},{},{:.2}", row, col, value)?;
        }
    } else {
        writeln!(w, "elev")?;
        for value in &band.values {
            writeln!(w, "{:.2}", value)?;
        }
    }

    w.flush()?;
    Ok(())
}

/// Create (or overwrite) the dump file of raster `file_name` inside `dir`.
/// The directory itself is not created.
pub fn write_dump_file(
    dir: &Path,
    file_name: &OsStr,
    record: &OutputRecord,
    band: &BandData,
    with_index: bool,
) -> SurveyResult<PathBuf> {
    let path = dump_path(dir, file_name);
    let file = File::create(&path)?;
    write_dump(BufWriter::new(file), record, band, with_index)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_core::{GeoBounds, GeoPoint};
    use crate::geometric::elevation::ElevationSummary;
    use crate::geometric::geotransform::GeoTransform;

    fn sample() -> (OutputRecord, BandData) {
        let gt = GeoTransform::new([0.0, 1.0, 0.0, 3.0, 0.0, -1.0]);
        let band = BandData::new(3, 4, (0..12).map(|v| v as f64 + 0.25).collect());
        let record = OutputRecord {
            filename: "be_1.tif".to_string(),
            width: 4,
            height: 3,
            bounds: gt.bounds(4, 3),
            geo_bounds: GeoBounds::from_corners(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)),
            geo_transform: gt,
            elevation: ElevationSummary::from_band(&band),
            ground_resolution: (1.0, 1.0),
        };
        (record, band)
    }

    fn render(with_index: bool) -> String {
        let (record, band) = sample();
        let mut out = Vec::new();
        write_dump(&mut out, &record, &band, with_index).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn data_lines(text: &str) -> Vec<&str> {
        text.lines().filter(|l| !l.starts_with('#')).collect()
    }

    #[test]
    fn test_dump_with_index() {
        let text = render(true);
        let lines = data_lines(&text);
        assert_eq!(lines[0], "row,col,elev");
        assert_eq!(lines.len() - 1, 12);
        assert_eq!(lines[1], "0,0,0.25");
        assert_eq!(lines[4], "0,3,3.25");
        assert_eq!(lines[5], "1,0,4.25");
        assert_eq!(lines[12], "2,3,11.25");
    }

    #[test]
    fn test_dump_without_index() {
        let text = render(false);
        let lines = data_lines(&text);
        assert_eq!(lines[0], "elev");
        assert_eq!(lines.len() - 1, 12);
        assert_eq!(lines[2], "1.25");
    }

    #[test]
    fn test_dump_metadata_block() {
        let text = render(true);
        assert!(text.starts_with("# filename: be_1.tif\n# shape: 3,4\n"));
        assert!(text.contains("# geotransform: ulx=0.0,xres=1.0,xskew=0.0,uly=3.0,yskew=0.0,yres=-1.0\n"));
        assert!(text.contains("## meanelev: 5.75\n"));
    }

    #[test]
    fn test_dump_file_requires_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (record, band) = sample();
        let name = OsStr::new("be_1.tif");
        let path = write_dump_file(dir.path(), name, &record, &band, false).unwrap();
        assert_eq!(path, dir.path().join("be_1.tif.csvc"));
        assert!(path.exists());

        let missing = dir.path().join("output");
        let err = write_dump_file(&missing, name, &record, &band, false).unwrap_err();
        assert_eq!(err.kind(), "io");
    }

    #[cfg(unix)]
    #[test]
    fn test_dump_path_keeps_non_utf8_names_apart() {
        use std::os::unix::ffi::OsStrExt;

        let dir = Path::new("output");
        let a = dump_path(dir, OsStr::from_bytes(b"be_\xff.tif"));
        let b = dump_path(dir, OsStr::from_bytes(b"be_\xfe.tif"));
        assert_ne!(a, b);
        assert_eq!(a.file_name().unwrap().as_bytes(), b"be_\xff.tif.csvc");
    }
}
