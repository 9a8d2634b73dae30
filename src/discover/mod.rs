// src/discover/mod.rs
use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Enumerate input files matching `pattern` under `base_dir`, sorted
/// lexicographically. Any path whose file name contains one of `markers`
/// (e.g. "cleaned", "merged") is an earlier run's output and is dropped so
/// the pipeline never reprocesses its own results.
///
/// An empty result is `Ok(vec![])`; the caller decides whether that is a
/// problem for its dataset kind.
pub fn resolve(base_dir: &Path, pattern: &str, markers: &[String]) -> Result<Vec<PathBuf>> {
    let full = base_dir.join(pattern);
    let full = full.to_string_lossy();

    let mut paths: Vec<PathBuf> = glob(&full)
        .with_context(|| format!("invalid glob pattern: {}", full))?
        .filter_map(std::result::Result::ok)
        .filter(|p| !is_output(p, markers))
        .collect();
    paths.sort();

    debug!(pattern = %full, count = paths.len(), "resolved input files");
    Ok(paths)
}

fn is_output(path: &Path, markers: &[String]) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => markers.iter().any(|m| name.contains(m.as_str())),
        None => false,
    }
}
