//! JSON export of submissions and case lists

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SiniError, SiniResult};
use crate::models::Case;
use crate::services::SubmissionReceipt;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A submitted payload with its receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionExport<P> {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that produced the export
    pub app_version: String,
    pub receipt: SubmissionReceipt,
    pub payload: P,
}

impl<P: Serialize> SubmissionExport<P> {
    pub fn new(receipt: SubmissionReceipt, payload: P) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            receipt,
            payload,
        }
    }
}

/// Write a submission as pretty JSON
pub fn export_submission_json<P: Serialize, W: Write>(
    export: &SubmissionExport<P>,
    writer: &mut W,
) -> SiniResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| SiniError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SiniError::Export(e.to_string()))?;
    Ok(())
}

/// Write a case list as a pretty JSON array
pub fn export_cases_json<W: Write>(cases: &[Case], writer: &mut W) -> SiniResult<()> {
    serde_json::to_writer_pretty(&mut *writer, cases)
        .map_err(|e| SiniError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SiniError::Export(e.to_string()))?;
    Ok(())
}
