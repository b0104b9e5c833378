//! Export module for SINI intake
//!
//! - JSON and YAML: submitted payloads wrapped with their receipt
//! - CSV and JSON: dashboard case lists

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_cases_csv;
pub use json::{export_cases_json, export_submission_json, SubmissionExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_submission_yaml;
