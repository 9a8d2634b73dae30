pub mod clean;
pub mod config;
pub mod discover;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod table;

pub use config::CleanConfig;
pub use error::CleanError;
pub use pipeline::{run, FileOutcome, FlowStatus, RunReport};
