// src/config.rs
use std::path::PathBuf;

/// Everything one run of the pipeline needs, passed in explicitly so tests
/// can point it at a synthetic directory. Defaults mirror the BTS extract
/// naming the pipeline was built around.
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// Directory holding the raw extracts; outputs are written next to them.
    pub base_dir: PathBuf,
    /// Target carrier code, matched exactly (case-sensitive).
    pub carrier: String,

    /// Fixed name of the single segment (T100-style) input file.
    pub segment_filename: String,
    /// Output name for the cleaned segment data.
    pub segment_output: String,
    /// Column holding the aircraft type code in segment data.
    pub aircraft_type_column: String,

    /// Glob pattern (relative to `base_dir`) for quarterly survey files.
    pub survey_pattern: String,
    /// Prefix for per-quarter cleaned outputs (`<prefix>_Q1_cleaned.csv`).
    pub survey_output_prefix: String,
    /// Output name for the merged survey data.
    pub merged_output: String,
    /// Source → canonical column renames applied to each survey file.
    pub survey_rename: Vec<(String, String)>,
    /// Canonical columns the merged output carries, in order.
    pub survey_projection: Vec<String>,

    /// Carrier-column aliases, tried in order. Survey files have used
    /// RPCarrier and UniqueCarrier interchangeably across years.
    pub carrier_aliases: Vec<String>,
    /// Filename markers identifying this pipeline's own outputs, which the
    /// resolver must never pick up as inputs.
    pub output_markers: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        let owned = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect::<Vec<_>>()
        };
        Self {
            base_dir: PathBuf::from("."),
            carrier: "UA".to_string(),
            segment_filename: "T_T100D_SEGMENT_US_CARRIER_ONLY-2.csv".to_string(),
            segment_output: "T100_cleaned.csv".to_string(),
            aircraft_type_column: "AIRCRAFT_TYPE".to_string(),
            survey_pattern: "Origin_and_Destination_Survey_DB1BMarket_2024_*.csv".to_string(),
            survey_output_prefix: "DB1B".to_string(),
            merged_output: "DB1B_Merged.csv".to_string(),
            survey_rename: owned(&[
                ("Origin", "ORIGIN"),
                ("Dest", "DEST"),
                ("MktFare", "MARKET_FARE"),
                ("Passengers", "PAX_WEIGHTING"),
                ("RPCarrier", "UNIQUE_CARRIER"),
                ("UniqueCarrier", "UNIQUE_CARRIER"),
            ]),
            survey_projection: vec![
                "ORIGIN".to_string(),
                "DEST".to_string(),
                "MARKET_FARE".to_string(),
                "PAX_WEIGHTING".to_string(),
            ],
            carrier_aliases: vec![
                "UNIQUE_CARRIER".to_string(),
                "RPCarrier".to_string(),
                "UniqueCarrier".to_string(),
            ],
            output_markers: vec!["cleaned".to_string(), "merged".to_string(), "Merged".to_string()],
        }
    }
}
