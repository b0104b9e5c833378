//! Hand-off of finalized payloads
//!
//! The back office integration is out of scope for this crate; callers plug
//! in their own [`SubmissionGateway`]. [`LoggingGateway`] records the payload
//! in the log and issues a receipt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{SiniError, SiniResult};
use crate::models::{Brand, IntakeContext, SubmissionId};
use crate::wizard::FlowKind;

/// Acknowledgement returned to the submitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: SubmissionId,
    /// Reference quoted in follow-up correspondence
    pub reference: String,
    pub flow: FlowKind,
    pub brand: Brand,
    pub submitted_at: DateTime<Utc>,
}

/// Destination for finalized payloads
pub trait SubmissionGateway {
    fn submit(
        &self,
        flow: FlowKind,
        context: &IntakeContext,
        payload: &Value,
    ) -> SiniResult<SubmissionReceipt>;
}

/// Gateway that only logs what it receives
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingGateway;

impl SubmissionGateway for LoggingGateway {
    fn submit(
        &self,
        flow: FlowKind,
        context: &IntakeContext,
        payload: &Value,
    ) -> SiniResult<SubmissionReceipt> {
        if !payload.is_object() {
            return Err(SiniError::Submission(
                "Payload must be a JSON object".into(),
            ));
        }

        let id = SubmissionId::new();
        let receipt = SubmissionReceipt {
            id,
            reference: id.reference(),
            flow,
            brand: context.brand,
            submitted_at: Utc::now(),
        };

        info!(
            reference = %receipt.reference,
            flow = %flow,
            brand = %context.brand,
            fields = payload.as_object().map_or(0, |o| o.len()),
            "payload submitted"
        );

        Ok(receipt)
    }
}
