// src/merge/mod.rs
//!
//! Concatenation of per-file tables into one combined table under a fixed
//! column projection. Inputs that do not expose the full projection are
//! rejected individually; the merge proceeds on the rest. The schema is
//! never silently widened or narrowed to paper over a disagreement.

use crate::error::CleanError;
use crate::table::Table;
use tracing::{debug, warn};

/// Result of merging a batch of per-file tables.
#[derive(Debug)]
pub struct MergeOutcome {
    /// The combined table, present when at least one input was accepted.
    pub merged: Option<Table>,
    /// (label, rows contributed) per accepted input, in input order.
    pub accepted: Vec<(String, usize)>,
    /// (label, reason) per rejected input.
    pub rejected: Vec<(String, CleanError)>,
}

impl MergeOutcome {
    pub fn total_rows(&self) -> usize {
        self.accepted.iter().map(|(_, n)| n).sum()
    }
}

/// Select `columns` from `table`, in that exact order, discarding the rest.
/// All requested columns must be present; the error names every missing one.
pub fn project(table: &Table, columns: &[String]) -> Result<Table, CleanError> {
    let mut indices = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();
    for col in columns {
        match table.column_index(col) {
            Some(idx) => indices.push(idx),
            None => missing.push(col.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(CleanError::MissingProjection { columns: missing });
    }

    let rows = table
        .rows
        .iter()
        .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
        .collect();
    Ok(Table::new(columns.to_vec(), rows))
}

/// Project each labeled input to `columns` and concatenate in input order.
/// Row order in the merged table is input order, then intra-input order; no
/// deduplication happens.
pub fn merge(inputs: Vec<(String, Table)>, columns: &[String]) -> MergeOutcome {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for (label, table) in inputs {
        match project(&table, columns) {
            Ok(projected) => {
                debug!(input = %label, rows = projected.num_rows(), "accepted for merge");
                accepted.push((label, projected.num_rows()));
                rows.extend(projected.rows);
            }
            Err(err) => {
                warn!(input = %label, %err, "rejected from merge");
                rejected.push((label, err));
            }
        }
    }

    let merged = if accepted.is_empty() {
        None
    } else {
        Some(Table::new(columns.to_vec(), rows))
    };
    MergeOutcome {
        merged,
        accepted,
        rejected,
    }
}
