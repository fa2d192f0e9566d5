use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "indicatif")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::collect::scan::scan_directory;
use crate::commons::basic_functions::display_name;
use crate::config::SurveyConfig;
use crate::geometric::processor::FileProcessor;
use crate::geometric::record::{write_summary, FailedEntry, FileOutcome};

#[cfg(feature = "indicatif")]
fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

/// Result of one run over a directory
#[derive(Debug, Clone, Default)]
pub struct SurveyReport {
    /// Entries seen in the input directory
    pub entries: usize,
    /// One outcome per matching file, in processing order
    pub outcomes: Vec<FileOutcome>,
    /// Summary file, when one was written
    pub summary_path: Option<PathBuf>,
}

impl SurveyReport {
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_failed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FailedEntry> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Failed(f) => Some(f),
            FileOutcome::Processed(_) => None,
        })
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }
}

/// Runs the [`FileProcessor`] over every matching file of a directory and
/// writes the summary CSV
pub struct SurveyDriver {
    config: SurveyConfig,
    processor: FileProcessor,
}

impl SurveyDriver {
    pub fn new(config: SurveyConfig) -> Self {
        let processor = FileProcessor::new(&config);
        SurveyDriver { config, processor }
    }

    pub fn config(&self) -> &SurveyConfig {
        &self.config
    }

    /// Process the configured directory.
    ///
    /// Per-file failures become failed rows; only run-level problems (missing
    /// input or dump directory, unwritable summary) are returned as errors.
    pub fn run(&self) -> Result<SurveyReport> {
        if let Some(dump) = &self.config.elevation {
            if !dump.dir.is_dir() {
                anyhow::bail!(
                    "Elevation output directory {:?} does not exist; create it before writing elevation files",
                    dump.dir
                );
            }
        }

        let scan = scan_directory(&self.config.input_dir, &self.config.extension).context(
            format!("Failed to list directory {:?}", self.config.input_dir),
        )?;

        info!(
            dir = ?self.config.input_dir,
            entries = scan.entries,
            matches = scan.matches.len(),
            extension = %self.config.extension,
            "Scanned directory"
        );

        let outcomes = self.process_all(&scan.matches);

        let summary_path = if self.config.write_summary {
            self.write_summary_file(&self.config.summary_path, &outcomes)?;
            Some(self.config.summary_path.clone())
        } else {
            None
        };

        let report = SurveyReport {
            entries: scan.entries,
            outcomes,
            summary_path,
        };

        info!(
            dir = ?self.config.input_dir,
            entries = report.entries,
            processed = report.processed(),
            failed = report.failed(),
            "Survey finished"
        );

        Ok(report)
    }

    /// Process a single file, converting any error into a failed entry
    pub fn process_one(&self, path: &Path) -> FileOutcome {
        let name = display_name(path);
        match self.processor.process_file(path) {
            Ok(record) => FileOutcome::Processed(record),
            Err(e) => {
                warn!(file = %name, kind = e.kind(), error = %e, "Skipping raster");
                FileOutcome::Failed(FailedEntry::new(name, &e))
            }
        }
    }

    fn process_all(&self, paths: &[PathBuf]) -> Vec<FileOutcome> {
        #[cfg(feature = "indicatif")]
        let pb = if self.config.show_progress {
            let pb = ProgressBar::new(paths.len() as u64);
            pb.set_style(progress_style());
            Some(pb)
        } else {
            None
        };

        let step = |path: &PathBuf| {
            let outcome = self.process_one(path);
            #[cfg(feature = "indicatif")]
            if let Some(pb) = &pb {
                pb.set_message(outcome.filename().to_string());
                pb.inc(1);
            }
            outcome
        };

        #[cfg(feature = "rayon")]
        let outcomes: Vec<FileOutcome> = if self.config.parallel {
            paths.par_iter().map(step).collect()
        } else {
            paths.iter().map(step).collect()
        };

        #[cfg(not(feature = "rayon"))]
        let outcomes: Vec<FileOutcome> = {
            if self.config.parallel {
                warn!("Built without the rayon feature; processing files sequentially");
            }
            paths.iter().map(step).collect()
        };

        #[cfg(feature = "indicatif")]
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        outcomes
    }

    fn write_summary_file(&self, path: &Path, outcomes: &[FileOutcome]) -> Result<()> {
        let file =
            File::create(path).context(format!("Failed to create summary file {:?}", path))?;
        write_summary(BufWriter::new(file), outcomes)
            .context(format!("Failed to write summary file {:?}", path))?;
        info!(path = ?path, rows = outcomes.len(), "Wrote summary");
        Ok(())
    }
}
