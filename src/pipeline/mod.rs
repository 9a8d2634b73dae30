// src/pipeline/mod.rs
//!
//! Sequences the two flows: the single-file segment flow and the multi-file
//! survey flow. Per-file problems are recorded and skipped, never fatal; a
//! run always completes and returns a [`RunReport`].

use crate::clean;
use crate::config::CleanConfig;
use crate::discover;
use crate::error::CleanError;
use crate::merge;
use crate::table::Table;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    Succeeded {
        file: PathBuf,
        rows: usize,
        output: PathBuf,
    },
    Skipped {
        file: PathBuf,
        reason: CleanError,
    },
    Failed {
        file: PathBuf,
        error: String,
    },
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Succeeded { file, rows, output } => write!(
                f,
                "{}: {} rows -> {}",
                file.display(),
                rows,
                output.display()
            ),
            FileOutcome::Skipped { file, reason } => {
                write!(f, "{}: skipped ({})", file.display(), reason)
            }
            FileOutcome::Failed { file, error } => {
                write!(f, "{}: failed ({})", file.display(), error)
            }
        }
    }
}

/// Terminal state of one flow.
#[derive(Debug)]
pub enum FlowStatus {
    /// The flow's output was written.
    Written { output: PathBuf, rows: usize },
    /// The expected single input file does not exist.
    InputNotFound { path: PathBuf },
    /// The glob pattern matched nothing.
    NoMatchingFiles { pattern: String },
    /// Every candidate file was skipped or failed; nothing to write.
    NoDataCollected,
    /// The output destination could not be written. Terminates only this
    /// flow's write step; anything already on disk is left for inspection.
    OutputWriteFailure { output: PathBuf, message: String },
    /// The single input existed but could not be used (unreadable, or no
    /// carrier column under any alias).
    InputRejected { reason: String },
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowStatus::Written { output, rows } => {
                write!(f, "wrote {} rows to {}", rows, output.display())
            }
            FlowStatus::InputNotFound { path } => {
                write!(f, "input not found: {}", path.display())
            }
            FlowStatus::NoMatchingFiles { pattern } => {
                write!(f, "no files matched pattern: {}", pattern)
            }
            FlowStatus::NoDataCollected => write!(f, "no data collected; nothing written"),
            FlowStatus::OutputWriteFailure { output, message } => {
                write!(f, "could not write {}: {}", output.display(), message)
            }
            FlowStatus::InputRejected { reason } => write!(f, "input rejected: {}", reason),
        }
    }
}

/// Aggregate result of one run. The library hands this back structured; the
/// binary renders it for the console.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<FileOutcome>,
    pub segment: Option<FlowStatus>,
    pub survey: Option<FlowStatus>,
}

impl RunReport {
    pub fn files_found(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Succeeded { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }

    /// Rows landed in final flow outputs (segment file plus merged survey).
    pub fn total_rows_written(&self) -> usize {
        [&self.segment, &self.survey]
            .into_iter()
            .flatten()
            .map(|s| match s {
                FlowStatus::Written { rows, .. } => *rows,
                _ => 0,
            })
            .sum()
    }
}

/// Run both flows against `config`. Never returns an error: everything that
/// can go wrong is captured in the report.
pub fn run(config: &CleanConfig) -> RunReport {
    let mut report = RunReport::default();
    report.segment = Some(run_segment(config, &mut report.outcomes));
    report.survey = Some(run_survey(config, &mut report.outcomes));
    report
}

/// Single-file flow: filter the segment extract to the target carrier and
/// clean the aircraft-type column, keeping every original column.
fn run_segment(config: &CleanConfig, outcomes: &mut Vec<FileOutcome>) -> FlowStatus {
    let input = config.base_dir.join(&config.segment_filename);
    if !input.exists() {
        warn!(path = %input.display(), "segment file not found; flow skipped");
        return FlowStatus::InputNotFound { path: input };
    }

    info!(file = %input.display(), "processing segment data");
    let table = match Table::read_csv(&input) {
        Ok(t) => t,
        Err(e) => {
            error!(file = %input.display(), "unreadable segment file: {:#}", e);
            outcomes.push(FileOutcome::Failed {
                file: input,
                error: format!("{:#}", e),
            });
            return FlowStatus::InputRejected {
                reason: format!("{:#}", e),
            };
        }
    };

    let mut filtered = match clean::filter_carrier(&table, &config.carrier_aliases, &config.carrier)
    {
        Ok(t) => t,
        Err(reason) => {
            warn!(file = %input.display(), %reason, "segment file skipped");
            let status = FlowStatus::InputRejected {
                reason: reason.to_string(),
            };
            outcomes.push(FileOutcome::Skipped {
                file: input,
                reason,
            });
            return status;
        }
    };
    clean::clean_aircraft_type(&mut filtered, &config.aircraft_type_column);

    let output = config.base_dir.join(&config.segment_output);
    match filtered.write_csv(&output) {
        Ok(()) => {
            let rows = filtered.num_rows();
            info!(rows, output = %output.display(), "segment data written");
            outcomes.push(FileOutcome::Succeeded {
                file: input,
                rows,
                output: output.clone(),
            });
            FlowStatus::Written { output, rows }
        }
        Err(e) => {
            error!(output = %output.display(), "segment write failed: {:#}", e);
            FlowStatus::OutputWriteFailure {
                output,
                message: format!("{:#}", e),
            }
        }
    }
}

/// Multi-file flow: rename, filter, and project each quarterly survey file,
/// write its per-quarter cleaned output, then merge everything accepted.
fn run_survey(config: &CleanConfig, outcomes: &mut Vec<FileOutcome>) -> FlowStatus {
    let files = match discover::resolve(
        &config.base_dir,
        &config.survey_pattern,
        &config.output_markers,
    ) {
        Ok(files) => files,
        Err(e) => {
            error!("survey discovery failed: {:#}", e);
            return FlowStatus::InputRejected {
                reason: format!("{:#}", e),
            };
        }
    };
    if files.is_empty() {
        warn!(pattern = %config.survey_pattern, "no survey files found");
        return FlowStatus::NoMatchingFiles {
            pattern: config.survey_pattern.clone(),
        };
    }
    info!(count = files.len(), "processing survey files");

    let mut accepted: Vec<(String, Table)> = Vec::new();
    for path in files {
        let label = file_label(&path);
        info!(file = %label, "processing survey file");

        let mut table = match Table::read_csv(&path) {
            Ok(t) => t,
            Err(e) => {
                error!(file = %label, "unreadable survey file: {:#}", e);
                outcomes.push(FileOutcome::Failed {
                    file: path,
                    error: format!("{:#}", e),
                });
                continue;
            }
        };

        clean::apply_rename(&mut table, &config.survey_rename);

        let filtered =
            match clean::filter_carrier(&table, &config.carrier_aliases, &config.carrier) {
                Ok(t) => t,
                Err(reason) => {
                    warn!(file = %label, %reason, "survey file skipped");
                    outcomes.push(FileOutcome::Skipped { file: path, reason });
                    continue;
                }
            };

        let projected = match merge::project(&filtered, &config.survey_projection) {
            Ok(t) => t,
            Err(reason) => {
                warn!(file = %label, %reason, "survey file skipped");
                outcomes.push(FileOutcome::Skipped { file: path, reason });
                continue;
            }
        };

        // Per-quarter cleaned output keeps all renamed columns, the merged
        // output only the projection.
        let output = config
            .base_dir
            .join(quarter_output_name(&config.survey_output_prefix, &path));
        match filtered.write_csv(&output) {
            Ok(()) => {
                info!(file = %label, rows = filtered.num_rows(), output = %output.display(), "quarter written");
                outcomes.push(FileOutcome::Succeeded {
                    file: path,
                    rows: filtered.num_rows(),
                    output,
                });
            }
            Err(e) => {
                // The table was already accepted; its rows still merge.
                error!(file = %label, "quarter write failed: {:#}", e);
                outcomes.push(FileOutcome::Failed {
                    file: path,
                    error: format!("{:#}", e),
                });
            }
        }
        accepted.push((label, projected));
    }

    if accepted.is_empty() {
        warn!("every survey file was skipped or failed");
        return FlowStatus::NoDataCollected;
    }

    let out = merge::merge(accepted, &config.survey_projection);
    for (label, reason) in out.rejected {
        outcomes.push(FileOutcome::Skipped {
            file: PathBuf::from(label),
            reason,
        });
    }
    let merged = match out.merged {
        Some(t) => t,
        None => return FlowStatus::NoDataCollected,
    };

    let output = config.base_dir.join(&config.merged_output);
    match merged.write_csv(&output) {
        Ok(()) => {
            let rows = merged.num_rows();
            info!(rows, output = %output.display(), "merged survey data written");
            FlowStatus::Written { output, rows }
        }
        Err(e) => {
            error!(output = %output.display(), "merged write failed: {:#}", e);
            FlowStatus::OutputWriteFailure {
                output,
                message: format!("{:#}", e),
            }
        }
    }
}

/// Derive a per-quarter output name from the input file name. The quarter is
/// the final `_`-separated token of the stem: `..._2024_1.csv` becomes
/// `<prefix>_Q1_cleaned.csv`; a non-numeric token is used literally.
pub fn quarter_output_name(prefix: &str, input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let suffix = stem.rsplit('_').next().unwrap_or(stem);
    if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
        format!("{}_Q{}_cleaned.csv", prefix, suffix)
    } else {
        format!("{}_{}_cleaned.csv", prefix, suffix)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
