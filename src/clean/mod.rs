// src/clean/mod.rs
//!
//! Per-file cleaning steps: column renaming, carrier filtering, and the
//! aircraft-type string cleanup. Each step takes a [`Table`] and leaves the
//! row data untouched except for what the step itself changes.

use crate::error::CleanError;
use crate::table::Table;
use tracing::debug;

/// Relabel header columns according to `map` (source name → canonical name).
/// A map entry whose source column is absent is a no-op. Rows are never
/// added, removed, or reordered by this step.
pub fn apply_rename(table: &mut Table, map: &[(String, String)]) {
    for header in &mut table.headers {
        if let Some((_, target)) = map.iter().find(|(source, _)| source == header) {
            debug!(from = %header, to = %target, "renaming column");
            *header = target.clone();
        }
    }
}

/// Locate the carrier-code column, trying each alias in order.
pub fn find_carrier_column(table: &Table, aliases: &[String]) -> Option<usize> {
    aliases.iter().find_map(|a| table.column_index(a))
}

/// Keep only rows whose carrier code equals `carrier` exactly (case
/// sensitive, no normalization). If none of the aliases names a column in
/// the table, that is a `MissingColumn` condition the caller must treat as
/// a per-file skip, never as an empty or unfiltered result.
pub fn filter_carrier(table: &Table, aliases: &[String], carrier: &str) -> Result<Table, CleanError> {
    let idx = find_carrier_column(table, aliases).ok_or_else(|| CleanError::MissingColumn {
        aliases: aliases.to_vec(),
    })?;
    Ok(table.filter_eq(idx, carrier))
}

/// Strip a trailing `.<digits>` suffix from a value that should be an opaque
/// identifier. Aircraft type codes sometimes arrive serialized as floats
/// ("738.0"); the code itself is "738".
pub fn strip_decimal_suffix(raw: &str) -> String {
    if let Some(dot) = raw.rfind('.') {
        let frac = &raw[dot + 1..];
        if !frac.is_empty() && frac.chars().all(|c| c.is_ascii_digit()) {
            return raw[..dot].to_string();
        }
    }
    raw.to_string()
}

/// Apply [`strip_decimal_suffix`] to `column` if the table has it. Absence
/// of the column is fine; not every extract variant carries it.
pub fn clean_aircraft_type(table: &mut Table, column: &str) {
    if let Some(idx) = table.column_index(column) {
        table.map_column(idx, strip_decimal_suffix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> Vec<String> {
        vec![
            "UNIQUE_CARRIER".to_string(),
            "RPCarrier".to_string(),
            "UniqueCarrier".to_string(),
        ]
    }

    fn survey_table() -> Table {
        Table::new(
            vec!["Origin".into(), "Dest".into(), "RPCarrier".into()],
            vec![
                vec!["SFO".into(), "ORD".into(), "UA".into()],
                vec!["SFO".into(), "ORD".into(), "DL".into()],
                vec!["DEN".into(), "EWR".into(), "UA".into()],
            ],
        )
    }

    #[test]
    fn rename_relabels_without_touching_rows() {
        let mut t = survey_table();
        let before = t.rows.clone();
        apply_rename(
            &mut t,
            &[
                ("Origin".to_string(), "ORIGIN".to_string()),
                ("RPCarrier".to_string(), "UNIQUE_CARRIER".to_string()),
                ("NotHere".to_string(), "IGNORED".to_string()),
            ],
        );
        assert_eq!(t.headers, vec!["ORIGIN", "Dest", "UNIQUE_CARRIER"]);
        assert_eq!(t.rows, before);
    }

    #[test]
    fn rename_preserves_row_count() {
        let mut t = survey_table();
        let n = t.num_rows();
        apply_rename(&mut t, &[("Dest".to_string(), "DEST".to_string())]);
        assert_eq!(t.num_rows(), n);
    }

    #[test]
    fn filter_keeps_exactly_the_target_carrier() {
        let t = survey_table();
        let ua = filter_carrier(&t, &aliases(), "UA").unwrap();
        assert_eq!(ua.num_rows(), 2);
        let idx = ua.column_index("RPCarrier").unwrap();
        assert!(ua.rows.iter().all(|r| r[idx] == "UA"));
    }

    #[test]
    fn filter_is_case_sensitive() {
        let t = survey_table();
        let lower = filter_carrier(&t, &aliases(), "ua").unwrap();
        assert_eq!(lower.num_rows(), 0);
    }

    #[test]
    fn filter_without_carrier_column_is_missing_column() {
        let t = Table::new(
            vec!["Origin".into(), "Dest".into()],
            vec![vec!["SFO".into(), "ORD".into()]],
        );
        match filter_carrier(&t, &aliases(), "UA") {
            Err(CleanError::MissingColumn { aliases: tried }) => {
                assert_eq!(tried.len(), 3);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn alias_order_decides_which_column_filters() {
        let t = Table::new(
            vec!["UNIQUE_CARRIER".into(), "RPCarrier".into()],
            vec![vec!["UA".into(), "DL".into()]],
        );
        let idx = find_carrier_column(&t, &aliases()).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn strip_decimal_suffix_cases() {
        assert_eq!(strip_decimal_suffix("738.0"), "738");
        assert_eq!(strip_decimal_suffix("320"), "320");
        assert_eq!(strip_decimal_suffix("73.8.0"), "73.8");
        assert_eq!(strip_decimal_suffix("738."), "738.");
        assert_eq!(strip_decimal_suffix("73.x"), "73.x");
        assert_eq!(strip_decimal_suffix(""), "");
    }

    #[test]
    fn clean_aircraft_type_tolerates_absent_column() {
        let mut t = survey_table();
        let before = t.clone();
        clean_aircraft_type(&mut t, "AIRCRAFT_TYPE");
        assert_eq!(t, before);
    }

    #[test]
    fn clean_aircraft_type_strips_in_place() {
        let mut t = Table::new(
            vec!["AIRCRAFT_TYPE".into()],
            vec![vec!["738.0".into()], vec!["320".into()]],
        );
        clean_aircraft_type(&mut t, "AIRCRAFT_TYPE");
        assert_eq!(t.rows, vec![vec!["738"], vec!["320"]]);
    }
}
