use crate::geometric::raster::BandData;

/// Shape and arithmetic mean of an elevation band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSummary {
    pub rows: usize,
    pub cols: usize,
    /// NaN for an empty band
    pub mean: f64,
}

impl ElevationSummary {
    pub fn from_band(band: &BandData) -> Self {
        ElevationSummary {
            rows: band.rows,
            cols: band.cols,
            mean: mean(&band.values),
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_band_mean_is_exact() {
        let band = BandData::new(3, 5, vec![123.25; 15]);
        let summary = ElevationSummary::from_band(&band);
        assert_eq!(summary.mean, 123.25);
        assert_eq!((summary.rows, summary.cols), (3, 5));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
        assert!(mean(&[]).is_nan());
    }
}
