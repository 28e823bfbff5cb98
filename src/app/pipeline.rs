// Autoreg - app/pipeline.rs
//
// One run, start to finish:
//   compile patterns -> read dump -> split -> classify
//   -> prepare output dir -> write split text -> copy template -> fill spreadsheet
//
// Every fatal error aborts immediately. Pattern and input errors are raised
// before anything is written; a failure after that may leave a partial
// artifact behind.

use crate::app::spreadsheet;
use crate::core::classifier::Classifier;
use crate::core::model::ClassifiedRecord;
use crate::core::patterns::PatternSet;
use crate::core::splitter;
use crate::platform::config::Settings;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{AutoregError, OutputError};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Wall-clock start of the run, captured once and used to name artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp {
    stem: String,
}

impl RunStamp {
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self {
            stem: at.format(constants::RUN_PREFIX_FORMAT).to_string(),
        }
    }

    /// Artifact prefix. `attempt` 0 is the plain stamp; later attempts add a counter.
    pub fn prefix(&self, attempt: u32) -> String {
        if attempt == 0 {
            format!("{}{}", self.stem, constants::RUN_PREFIX_SEPARATOR)
        } else {
            format!(
                "{}-{attempt}{}",
                self.stem,
                constants::RUN_PREFIX_SEPARATOR
            )
        }
    }
}

/// Paths of the two artifacts for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    pub split_text: PathBuf,
    pub spreadsheet: PathBuf,
}

impl ArtifactPaths {
    /// Pick the first prefix for which neither artifact exists yet in `dir`.
    pub fn resolve(dir: &Path, stamp: &RunStamp) -> Result<Self, OutputError> {
        for attempt in 0..constants::MAX_RUN_PREFIX_ATTEMPTS {
            let prefix = stamp.prefix(attempt);
            let paths = Self {
                split_text: dir.join(format!("{prefix}{}", constants::SPLIT_TEXT_FILE_SUFFIX)),
                spreadsheet: dir.join(format!("{prefix}{}", constants::SPREADSHEET_FILE_SUFFIX)),
            };
            if !paths.split_text.exists() && !paths.spreadsheet.exists() {
                if attempt > 0 {
                    tracing::debug!(attempt, "Artifact prefix taken; using counter");
                }
                return Ok(paths);
            }
        }
        Err(OutputError::PrefixExhausted {
            dir: dir.to_path_buf(),
            attempts: constants::MAX_RUN_PREFIX_ATTEMPTS,
        })
    }
}

/// What a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// `None` for a dry run.
    pub artifacts: Option<ArtifactPaths>,
    pub records: usize,
    /// Records with no profile-name line.
    pub unnamed_records: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} record(s)", self.records)?;
        if self.unnamed_records > 0 {
            write!(f, ", {} without a profile name", self.unnamed_records)?;
        }
        match &self.artifacts {
            Some(paths) => write!(
                f,
                "\n  split text:  {}\n  spreadsheet: {}",
                paths.split_text.display(),
                paths.spreadsheet.display()
            ),
            None => write!(f, " (dry run, nothing written)"),
        }
    }
}

/// Result of a successful run: the summary plus the classified records.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub records: Vec<ClassifiedRecord>,
}

/// Execute one run against validated settings.
///
/// With `dry_run` the dump is split and classified but nothing is written.
pub fn run(settings: &Settings, stamp: &RunStamp, dry_run: bool) -> Result<RunOutcome, AutoregError> {
    let patterns = PatternSet::compile(&settings.patterns)?;

    let raw = fs::read_dump(&settings.autoregs_file)?;
    tracing::info!(
        path = %settings.autoregs_file.display(),
        bytes = raw.len(),
        "Dump loaded"
    );

    let records = splitter::split(&raw, &patterns.boundary, patterns.placement);
    let classified = Classifier::new(&patterns).classify_all(records.as_slice());
    let unnamed_records = classified
        .iter()
        .filter(|r| r.profile_name.is_empty())
        .count();
    if unnamed_records > 0 {
        tracing::warn!(unnamed_records, "Some records have no profile name");
    }

    if dry_run {
        tracing::info!(records = classified.len(), "Dry run complete");
        return Ok(RunOutcome {
            summary: RunSummary {
                artifacts: None,
                records: classified.len(),
                unnamed_records,
            },
            records: classified,
        });
    }

    fs::ensure_dir(&settings.output_dir)?;
    let paths = ArtifactPaths::resolve(&settings.output_dir, stamp)?;

    let text = splitter::render_split_text(&raw, &patterns.boundary, patterns.placement);
    fs::write_text(&paths.split_text, &text)?;
    tracing::info!(path = %paths.split_text.display(), "Split text written");

    fs::copy_template(&settings.template_file, &paths.spreadsheet)?;
    spreadsheet::write_spreadsheet(&paths.spreadsheet, &classified, &settings.layout)?;

    Ok(RunOutcome {
        summary: RunSummary {
            artifacts: Some(paths),
            records: classified.len(),
            unnamed_records,
        },
        records: classified,
    })
}
