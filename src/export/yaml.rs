//! YAML export of submissions

use std::io::Write;

use serde::Serialize;

use crate::error::{SiniError, SiniResult};
use crate::export::json::SubmissionExport;

/// Write a submission as YAML with a short header comment
pub fn export_submission_yaml<P: Serialize, W: Write>(
    export: &SubmissionExport<P>,
    writer: &mut W,
) -> SiniResult<()> {
    writeln!(writer, "# SINI submission {}", export.receipt.reference)
        .map_err(|e| SiniError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| SiniError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| SiniError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IntakeContext;
    use crate::services::{LoggingGateway, SubmissionGateway};
    use crate::wizard::FlowKind;
    use serde_json::json;

    #[test]
    fn test_yaml_export_has_header_and_payload() {
        let payload = json!({"listingStatus": {"isListed": false}});
        let receipt = LoggingGateway
            .submit(FlowKind::Property, &IntakeContext::default(), &payload)
            .unwrap();
        let reference = receipt.reference.clone();

        let mut buffer = Vec::new();
        export_submission_yaml(&SubmissionExport::new(receipt, payload), &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with(&format!("# SINI submission {}", reference)));
        assert!(output.contains("isListed: false"));
    }
}
