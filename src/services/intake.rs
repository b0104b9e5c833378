//! Drive a wizard from a file of answers
//!
//! An answer sheet maps step keys to the record entered on that step. The
//! runner feeds the record for whichever step is on screen, exactly as a
//! user clicking "next" would, and stops at the first step that is refused
//! or has no answer.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SiniError, SiniResult};
use crate::models::IntakeContext;
use crate::storage::read_document;
use crate::wizard::{
    AdvanceOutcome, FinalizationError, FormData, IntakeFlow, StepData, StepValidation,
    WizardController,
};

use super::submission::{SubmissionGateway, SubmissionReceipt};

/// Answers keyed by step key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(BTreeMap<String, StepData>);

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON or YAML answer sheet
    pub fn from_file(path: &Path) -> SiniResult<Self> {
        read_document(path)
    }

    pub fn insert(&mut self, step: impl Into<String>, data: StepData) {
        self.0.insert(step.into(), data);
    }

    pub fn get(&self, step: &str) -> Option<&StepData> {
        self.0.get(step)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every answer into `form`, replacing slices already there
    pub fn apply_to(&self, form: &mut FormData) {
        for (step, data) in &self.0 {
            form.insert(step.clone(), data.clone());
        }
    }

    /// All answers as form data, without any validation
    pub fn to_form_data(&self) -> FormData {
        let mut form = FormData::new();
        self.apply_to(&mut form);
        form
    }

    /// Step keys the wizard never asked for
    pub fn unused<F: IntakeFlow>(&self, wizard: &WizardController<F>) -> Vec<String> {
        let visible: Vec<_> = wizard.visible_steps().iter().map(|s| s.key()).collect();
        self.0
            .keys()
            .filter(|key| !visible.contains(&key.as_str()))
            .cloned()
            .collect()
    }
}

/// Where a run stopped
#[derive(Debug, Clone)]
pub enum RunOutcome<P> {
    /// Every visible step accepted and the payload handed over
    Submitted {
        payload: P,
        receipt: SubmissionReceipt,
    },
    /// The answer for `step` failed validation
    Rejected {
        step: String,
        validation: StepValidation,
    },
    /// The sheet has no answer for the step on screen
    Unanswered { step: String },
    /// The last step was accepted but earlier steps no longer validate
    Incomplete(FinalizationError),
}

impl<P> RunOutcome<P> {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }
}

/// Service feeding answer sheets through wizards
pub struct IntakeService<'a, G: SubmissionGateway> {
    gateway: &'a G,
}

impl<'a, G: SubmissionGateway> IntakeService<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Advance `wizard` through the sheet from wherever it currently is
    pub fn run<F: IntakeFlow>(
        &self,
        wizard: &mut WizardController<F>,
        answers: &AnswerSheet,
        context: &IntakeContext,
    ) -> SiniResult<RunOutcome<F::Payload>> {
        // Each accepted step moves strictly forward, so this bounds the loop
        let limit = wizard.flow().steps().len() + 1;

        for _ in 0..limit {
            let step = wizard
                .current_step()
                .map(|s| s.key())
                .ok_or_else(|| SiniError::Validation("Wizard has no visible step".into()))?;

            let Some(data) = answers.get(step) else {
                debug!(step, "no answer for step");
                return Ok(RunOutcome::Unanswered {
                    step: step.to_string(),
                });
            };

            match wizard.advance(data.clone())? {
                AdvanceOutcome::Moved { .. } => continue,
                AdvanceOutcome::Rejected(validation) => {
                    return Ok(RunOutcome::Rejected {
                        step: step.to_string(),
                        validation,
                    })
                }
                AdvanceOutcome::Incomplete(err) => return Ok(RunOutcome::Incomplete(err)),
                AdvanceOutcome::Submitted(payload) => {
                    let unused = answers.unused(wizard);
                    if !unused.is_empty() {
                        warn!(steps = ?unused, "answers for hidden steps were not submitted");
                    }
                    let value = serde_json::to_value(&payload)?;
                    let receipt = self.gateway.submit(wizard.kind(), context, &value)?;
                    return Ok(RunOutcome::Submitted { payload, receipt });
                }
            }
        }

        Err(SiniError::Validation(
            "Answer sheet did not reach the last step".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::{property_wizard, relocation_wizard};
    use crate::models::{RelocationFormData, UserType};
    use crate::services::LoggingGateway;
    use serde_json::json;

    fn sheet(value: serde_json::Value) -> AnswerSheet {
        serde_json::from_value(value).unwrap()
    }

    fn single_sheet() -> AnswerSheet {
        sheet(json!({
            "relocationType": {"relocationType": "single", "role": "tenant"},
            "singleDisasterAddress": {"street": "Rue du Rhône 12", "city": "Sion", "postalCode": "1950"},
            "singlePersonalData": {
                "firstName": "Léa",
                "lastName": "Favre",
                "email": "lea.favre@example.ch",
                "phone": "079 123 45 67",
                "adults": 2,
                "hasSpecialNeeds": false
            },
            "singleLeaseTermination": {"hasTerminatedLease": false},
            "singleAccommodationNeeds": {"rooms": 3, "desiredStartDate": "2025-04-01", "durationMonths": 6},
            "confirmation": {"acceptTerms": true},
            "multipleCoordinator": {"organization": "ignored"}
        }))
    }

    #[test]
    fn test_full_sheet_submits() {
        let context = IntakeContext {
            user_type: Some(UserType::Sinistre),
            ..IntakeContext::default()
        };
        let mut wizard = relocation_wizard(&context);
        let gateway = LoggingGateway;

        let outcome = IntakeService::new(&gateway)
            .run(&mut wizard, &single_sheet(), &context)
            .unwrap();

        match outcome {
            RunOutcome::Submitted { payload, receipt } => {
                assert!(matches!(payload, RelocationFormData::Single(_)));
                assert!(receipt.reference.starts_with("SINI-"));
            }
            other => panic!("expected submission, got {other:?}"),
        }
        assert!(wizard.is_submitted());
    }

    #[test]
    fn test_stops_at_first_missing_answer() {
        let mut answers = AnswerSheet::new();
        answers.insert(
            "hostContact",
            json!({"firstName": "Jean", "lastName": "Perrin", "email": "jean@example.ch", "phone": "0213124567"})
                .as_object()
                .cloned()
                .unwrap(),
        );
        let mut wizard = property_wizard();

        let outcome = IntakeService::new(&LoggingGateway)
            .run(&mut wizard, &answers, &IntakeContext::default())
            .unwrap();

        assert!(matches!(outcome, RunOutcome::Unanswered { ref step } if step == "propertyAddress"));
        assert_eq!(wizard.current_index(), 1);
    }

    #[test]
    fn test_rejected_answer_reports_step_and_errors() {
        let answers = sheet(json!({
            "relocationType": {"relocationType": "multiple", "role": "insurer"},
            "multipleCoordinator": {"organization": "Generali", "contactName": "Marc Roux", "email": "not-an-email", "phone": "0581234567"}
        }));
        let mut wizard = relocation_wizard(&IntakeContext::default());

        let outcome = IntakeService::new(&LoggingGateway)
            .run(&mut wizard, &answers, &IntakeContext::default())
            .unwrap();

        match outcome {
            RunOutcome::Rejected { step, validation } => {
                assert_eq!(step, "multipleCoordinator");
                assert!(validation.error("email").is_some());
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_unused_lists_hidden_steps() {
        let answers = single_sheet();
        let wizard = crate::wizard::WizardController::with_form_data(
            crate::flows::RelocationFlow::new(),
            answers.to_form_data(),
        );
        assert_eq!(answers.unused(&wizard), vec!["multipleCoordinator".to_string()]);
    }
}
