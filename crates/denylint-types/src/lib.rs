//! Stable DTOs and IDs used across the denylint workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs and codes
//! - canonical config-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::ConfigPath;
pub use receipt::{
    DenylintData, DenylintReport, Finding, Location, RunMeta, SCHEMA_REPORT_V1, Severity,
    ToolMeta, Verdict, VerdictCounts,
};

/// JSON Schema for the report envelope written by `denylint check`.
pub fn report_schema() -> schemars::Schema {
    schemars::schema_for!(DenylintReport)
}
