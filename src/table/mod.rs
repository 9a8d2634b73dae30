// src/table/mod.rs
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

/// An in-memory delimited table: one header row plus data rows, every field
/// kept as a string. BTS extracts are small enough that whole-file tables
/// are fine; there is no streaming mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names, from the header row of the specific CSV file.
    pub headers: Vec<String>,
    /// Each data row, as a Vec of Strings (one per field).
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Position of `name` in the header, if present. Exact, case-sensitive.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Read a whole CSV file (header row required) into memory.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .with_context(|| format!("failed to open CSV file: {:?}", path.as_ref()))?;

        let headers: Vec<String> = rdr
            .headers()
            .with_context(|| format!("failed to read header row of {:?}", path.as_ref()))?
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.with_context(|| {
                format!("CSV parse error in {:?} at record {}", path.as_ref(), idx)
            })?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Write the table as CSV: header row, then data rows, no index column.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut wtr = WriterBuilder::new()
            .from_path(&path)
            .with_context(|| format!("failed to create output file: {:?}", path.as_ref()))?;

        wtr.write_record(&self.headers)
            .context("writing header row")?;
        for row in &self.rows {
            wtr.write_record(row).context("writing data row")?;
        }
        wtr.flush()
            .with_context(|| format!("flushing output file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Keep only rows whose field at `idx` equals `value` exactly.
    pub fn filter_eq(&self, idx: usize, value: &str) -> Table {
        let rows = self
            .rows
            .iter()
            .filter(|row| row.get(idx).map(String::as_str) == Some(value))
            .cloned()
            .collect();
        Table {
            headers: self.headers.clone(),
            rows,
        }
    }

    /// Apply `f` to every value in column `idx`.
    pub fn map_column<F: Fn(&str) -> String>(&mut self, idx: usize, f: F) {
        for row in &mut self.rows {
            if let Some(field) = row.get_mut(idx) {
                *field = f(field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> Table {
        Table::new(
            vec!["A".into(), "B".into()],
            vec![
                vec!["1".into(), "x".into()],
                vec!["2".into(), "y".into()],
                vec!["1".into(), "z".into()],
            ],
        )
    }

    #[test]
    fn read_csv_parses_header_and_rows() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "A,B")?;
        writeln!(tmp, "1,x")?;
        writeln!(tmp, "2,y")?;

        let t = Table::read_csv(tmp.path())?;
        assert_eq!(t.headers, vec!["A", "B"]);
        assert_eq!(t.rows, vec![vec!["1", "x"], vec!["2", "y"]]);
        Ok(())
    }

    #[test]
    fn write_then_read_preserves_table() -> Result<()> {
        let t = sample();
        let tmp = NamedTempFile::new()?;
        t.write_csv(tmp.path())?;
        let back = Table::read_csv(tmp.path())?;
        assert_eq!(back, t);
        Ok(())
    }

    #[test]
    fn filter_eq_keeps_only_matching_rows() {
        let t = sample();
        let filtered = t.filter_eq(0, "1");
        assert_eq!(filtered.num_rows(), 2);
        assert!(filtered.rows.iter().all(|r| r[0] == "1"));
        // original untouched
        assert_eq!(t.num_rows(), 3);
    }

    #[test]
    fn filter_eq_on_short_rows_drops_them() {
        let mut t = sample();
        t.rows.push(vec!["1".into()]);
        let filtered = t.filter_eq(1, "x");
        assert_eq!(filtered.num_rows(), 1);
    }

    #[test]
    fn map_column_rewrites_one_column() {
        let mut t = sample();
        t.map_column(1, |v| v.to_uppercase());
        assert_eq!(t.rows[0][1], "X");
        assert_eq!(t.rows[0][0], "1");
    }

    #[test]
    fn column_index_is_exact_match() {
        let t = sample();
        assert_eq!(t.column_index("A"), Some(0));
        assert_eq!(t.column_index("a"), None);
    }
}
