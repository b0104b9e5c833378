//! Relocation request wizard
//!
//! The first step answers `relocationType`. From then on either the
//! `single*` steps or the `multiple*` steps are in the sequence, never both.

use serde_json::Value;

use crate::models::relocation::{RelocationFormData, RelocationType};
use crate::models::IntakeContext;
use crate::wizard::{
    FieldKind, FieldRule, FlowKind, FormData, IntakeFlow, Schema, StepData, StepDefinition,
    WizardController,
};

use super::common;

pub const RELOCATION_TYPE: &str = "relocationType";
pub const SINGLE_DISASTER_ADDRESS: &str = "singleDisasterAddress";
pub const SINGLE_PERSONAL_DATA: &str = "singlePersonalData";
pub const SINGLE_SPECIAL_NEEDS: &str = "singleSpecialNeeds";
pub const SINGLE_LEASE_TERMINATION: &str = "singleLeaseTermination";
pub const SINGLE_ACCOMMODATION_NEEDS: &str = "singleAccommodationNeeds";
pub const MULTIPLE_COORDINATOR: &str = "multipleCoordinator";
pub const MULTIPLE_RELOCATION_REQUESTS: &str = "multipleRelocationRequests";

const ROLES: &[&str] = &["tenant", "owner", "insurer", "broker"];
const RELOCATION_TYPES: &[&str] = &["single", "multiple"];
const DISASTER_KINDS: &[&str] = &["fire", "flood", "storm", "landslide", "other"];

/// Relocation type answered (or seeded) on the first step
pub fn relocation_type(form: &FormData) -> Option<RelocationType> {
    form.text(RELOCATION_TYPE, "relocationType")
        .and_then(RelocationType::parse)
}

fn is_single(form: &FormData) -> bool {
    relocation_type(form) == Some(RelocationType::Single)
}

fn is_multiple(form: &FormData) -> bool {
    relocation_type(form) == Some(RelocationType::Multiple)
}

fn single_with_special_needs(form: &FormData) -> bool {
    is_single(form) && form.flag(SINGLE_PERSONAL_DATA, "hasSpecialNeeds")
}

fn household_schema() -> Schema {
    Schema::new()
        .field(FieldRule::required("householdName", common::name()))
        .field(FieldRule::required("street", common::street()))
        .field(FieldRule::required("city", common::city()))
        .field(FieldRule::required("postalCode", FieldKind::SwissPostalCode))
        .field(FieldRule::required("adults", FieldKind::Integer { min: 1, max: 20 }))
        .field(FieldRule::optional("children", FieldKind::Integer { min: 0, max: 20 }))
        .field(FieldRule::required("rooms", FieldKind::Integer { min: 1, max: 10 }))
        .field(FieldRule::required("desiredStartDate", FieldKind::Date))
        .field(FieldRule::required("hasSpecialNeeds", FieldKind::Boolean))
        .field(FieldRule::required_when(
            "specialNeedsDescription",
            common::long_text(),
            "hasSpecialNeeds",
        ))
}

fn master_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            RELOCATION_TYPE,
            "Type of request",
            Schema::new()
                .field(FieldRule::required("relocationType", FieldKind::Choice(RELOCATION_TYPES)))
                .field(FieldRule::required("role", FieldKind::Choice(ROLES))),
        )
        .flattened(),
        StepDefinition::new(
            SINGLE_DISASTER_ADDRESS,
            "Address of the damaged home",
            common::address_schema()
                .field(FieldRule::optional("disasterDate", FieldKind::Date))
                .field(FieldRule::optional("disasterKind", FieldKind::Choice(DISASTER_KINDS))),
        )
        .depends_on(is_single),
        StepDefinition::new(
            SINGLE_PERSONAL_DATA,
            "Personal data",
            common::contact_schema()
                .field(FieldRule::required("adults", FieldKind::Integer { min: 1, max: 20 }))
                .field(FieldRule::optional("children", FieldKind::Integer { min: 0, max: 20 }))
                .field(FieldRule::optional("hasPets", FieldKind::Boolean))
                .field(FieldRule::required("hasSpecialNeeds", FieldKind::Boolean)),
        )
        .depends_on(is_single),
        StepDefinition::new(
            SINGLE_SPECIAL_NEEDS,
            "Special needs",
            Schema::new()
                .field(FieldRule::required("description", common::long_text()))
                .field(FieldRule::optional("wheelchairAccess", FieldKind::Boolean))
                .field(FieldRule::optional("medicalEquipment", FieldKind::Boolean)),
        )
        .depends_on(single_with_special_needs),
        StepDefinition::new(
            SINGLE_LEASE_TERMINATION,
            "Lease",
            Schema::new()
                .field(FieldRule::required("hasTerminatedLease", FieldKind::Boolean))
                .field(FieldRule::required_when(
                    "terminationDate",
                    FieldKind::Date,
                    "hasTerminatedLease",
                )),
        )
        .depends_on(is_single),
        StepDefinition::new(
            SINGLE_ACCOMMODATION_NEEDS,
            "Accommodation needs",
            Schema::new()
                .field(FieldRule::required("rooms", FieldKind::Integer { min: 1, max: 10 }))
                .field(FieldRule::required("desiredStartDate", FieldKind::Date))
                .field(FieldRule::required("durationMonths", FieldKind::Integer { min: 1, max: 24 }))
                .field(FieldRule::optional(
                    "maxMonthlyBudget",
                    FieldKind::Integer { min: 0, max: 50_000 },
                ))
                .field(FieldRule::optional("preferredArea", common::city())),
        )
        .depends_on(is_single),
        StepDefinition::new(
            MULTIPLE_COORDINATOR,
            "Coordinator",
            Schema::new()
                .field(FieldRule::required("organization", common::name()))
                .field(FieldRule::required("contactName", common::name()))
                .field(FieldRule::required("email", FieldKind::Email))
                .field(FieldRule::required("phone", FieldKind::SwissPhone))
                .field(FieldRule::optional("claimReference", FieldKind::Text { max_len: 40 })),
        )
        .depends_on(is_multiple),
        StepDefinition::new(
            MULTIPLE_RELOCATION_REQUESTS,
            "Households to relocate",
            Schema::new().field(FieldRule::required(
                "requests",
                FieldKind::Records {
                    schema: Box::new(household_schema()),
                    min_items: 1,
                },
            )),
        )
        .depends_on(is_multiple),
        common::confirmation_step(),
    ]
}

/// The relocation wizard definition
pub struct RelocationFlow {
    steps: Vec<StepDefinition>,
}

impl RelocationFlow {
    pub fn new() -> Self {
        Self {
            steps: master_steps(),
        }
    }

    /// Form data seeded with a relocation type hint
    ///
    /// The first step is prefilled, not completed: the user still confirms it.
    pub fn seeded(hint: Option<RelocationType>) -> FormData {
        let mut form = FormData::new();
        if let Some(hint) = hint {
            let mut slice = StepData::new();
            slice.insert(
                "relocationType".to_string(),
                Value::String(hint.as_str().to_string()),
            );
            form.insert(RELOCATION_TYPE, slice);
        }
        form
    }
}

impl Default for RelocationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeFlow for RelocationFlow {
    type Payload = RelocationFormData;

    fn kind(&self) -> FlowKind {
        FlowKind::Relocation
    }

    fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }
}

pub type RelocationWizard = WizardController<RelocationFlow>;

/// Open a relocation wizard for a landing-page context
pub fn relocation_wizard(context: &IntakeContext) -> RelocationWizard {
    let hint = context.user_type.and_then(|u| u.relocation_hint());
    WizardController::with_form_data(RelocationFlow::new(), RelocationFlow::seeded(hint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiniError;
    use crate::models::UserType;
    use crate::wizard::form::prune;
    use crate::wizard::AdvanceOutcome;
    use serde_json::{json, Map};

    fn data(value: Value) -> StepData {
        value.as_object().cloned().unwrap()
    }

    fn keys(wizard: &RelocationWizard) -> Vec<&'static str> {
        wizard.visible_steps().iter().map(|s| s.key()).collect()
    }

    fn single_answers(special_needs: bool) -> Vec<(&'static str, Value)> {
        let mut answers = vec![
            (RELOCATION_TYPE, json!({"relocationType": "single", "role": "tenant"})),
            (
                SINGLE_DISASTER_ADDRESS,
                json!({"street": "Rue de la Gare 1", "city": "Geneva", "postalCode": "1204"}),
            ),
            (
                SINGLE_PERSONAL_DATA,
                json!({
                    "firstName": "Marie",
                    "lastName": "Rochat",
                    "email": "marie.rochat@example.ch",
                    "phone": "+41 79 555 12 34",
                    "adults": 2,
                    "children": 1,
                    "hasSpecialNeeds": special_needs
                }),
            ),
        ];
        if special_needs {
            answers.push((
                SINGLE_SPECIAL_NEEDS,
                json!({"description": "Ground floor needed", "wheelchairAccess": true}),
            ));
        }
        answers.push((SINGLE_LEASE_TERMINATION, json!({"hasTerminatedLease": false})));
        answers.push((
            SINGLE_ACCOMMODATION_NEEDS,
            json!({"rooms": 3, "desiredStartDate": "2025-04-01", "durationMonths": 6}),
        ));
        answers.push(("confirmation", json!({"acceptTerms": true})));
        answers
    }

    fn multiple_answers() -> Vec<(&'static str, Value)> {
        vec![
            (RELOCATION_TYPE, json!({"relocationType": "multiple", "role": "insurer"})),
            (
                MULTIPLE_COORDINATOR,
                json!({
                    "organization": "Generali Assurances",
                    "contactName": "Luca Bernasconi",
                    "email": "luca.bernasconi@example.ch",
                    "phone": "058 472 40 40"
                }),
            ),
            (
                MULTIPLE_RELOCATION_REQUESTS,
                json!({"requests": [
                    {
                        "householdName": "Favre",
                        "street": "Avenue de Tourbillon 10",
                        "city": "Sion",
                        "postalCode": "1950",
                        "adults": 2,
                        "rooms": 3,
                        "desiredStartDate": "2025-04-01",
                        "hasSpecialNeeds": false
                    },
                    {
                        "householdName": "Zufferey",
                        "street": "Rue du Rhône 3",
                        "city": "Sierre",
                        "postalCode": "3960",
                        "adults": 1,
                        "children": 2,
                        "rooms": 2,
                        "desiredStartDate": "2025-04-15",
                        "hasSpecialNeeds": true,
                        "specialNeedsDescription": "Oxygen concentrator"
                    }
                ]}),
            ),
            ("confirmation", json!({"acceptTerms": true})),
        ]
    }

    fn run(
        wizard: &mut RelocationWizard,
        answers: &[(&'static str, Value)],
    ) -> Option<RelocationFormData> {
        for (step, answer) in answers {
            assert_eq!(wizard.current_step().unwrap().key(), *step);
            match wizard.advance(data(answer.clone())).unwrap() {
                AdvanceOutcome::Moved { .. } => {}
                AdvanceOutcome::Submitted(payload) => return Some(payload),
                other => panic!("step {step} not accepted: {other:?}"),
            }
        }
        None
    }

    #[test]
    fn test_first_step_only_before_type_is_known() {
        let wizard = RelocationWizard::new(RelocationFlow::new());
        assert_eq!(keys(&wizard), vec![RELOCATION_TYPE, "confirmation"]);
    }

    #[test]
    fn test_single_branch_sequence() {
        let wizard = relocation_wizard(&IntakeContext::from_query("userType=sinistre"));
        assert_eq!(
            keys(&wizard),
            vec![
                RELOCATION_TYPE,
                SINGLE_DISASTER_ADDRESS,
                SINGLE_PERSONAL_DATA,
                SINGLE_LEASE_TERMINATION,
                SINGLE_ACCOMMODATION_NEEDS,
                "confirmation"
            ]
        );
        assert!(wizard.state().visited_steps.is_empty());
    }

    #[test]
    fn test_multiple_branch_excludes_single_steps() {
        let wizard = relocation_wizard(&IntakeContext {
            user_type: Some(UserType::Assurance),
            ..IntakeContext::default()
        });
        let visible = keys(&wizard);
        assert_eq!(
            visible,
            vec![RELOCATION_TYPE, MULTIPLE_COORDINATOR, MULTIPLE_RELOCATION_REQUESTS, "confirmation"]
        );
        assert!(visible.iter().all(|key| !key.starts_with("single")));
    }

    #[test]
    fn test_visible_steps_idempotent() {
        let wizard = relocation_wizard(&IntakeContext::from_query("userType=sinistre"));
        let form = wizard.form_data().clone();
        let first: Vec<_> = wizard.compute_visible_steps(&form).iter().map(|s| s.key()).collect();
        let second: Vec<_> = wizard.compute_visible_steps(&form).iter().map(|s| s.key()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_disaster_address_valid() {
        let wizard = RelocationWizard::new(RelocationFlow::new());
        let result = wizard
            .validate_step(
                SINGLE_DISASTER_ADDRESS,
                &data(json!({"street": "Rue de la Gare 1", "city": "Geneva", "postalCode": "1204"})),
            )
            .unwrap();
        assert!(result.is_valid(), "{result}");
    }

    #[test]
    fn test_terminated_lease_requires_date() {
        let wizard = RelocationWizard::new(RelocationFlow::new());
        let result = wizard
            .validate_step(
                SINGLE_LEASE_TERMINATION,
                &data(json!({"hasTerminatedLease": true, "terminationDate": ""})),
            )
            .unwrap();
        assert!(!result.is_valid());
        assert!(result.error("terminationDate").is_some());
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_special_needs_step_follows_flag() {
        let mut wizard = relocation_wizard(&IntakeContext::from_query("userType=sinistre"));
        let answers = single_answers(true);
        run(&mut wizard, &answers[..3]);
        assert_eq!(wizard.current_step().unwrap().key(), SINGLE_SPECIAL_NEEDS);
    }

    #[test]
    fn test_full_single_flow_payload() {
        let mut wizard = relocation_wizard(&IntakeContext::from_query("userType=sinistre"));
        let payload = run(&mut wizard, &single_answers(false)).expect("submitted");

        assert_eq!(payload.relocation_type(), RelocationType::Single);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["relocationType"], "single");
        assert_eq!(json["singleDisasterAddress"]["postalCode"], "1204");
        assert_eq!(json["singlePersonalData"]["firstName"], "Marie");
        assert!(json.get("multipleRelocationRequests").is_none());
        assert!(json.get("singleSpecialNeeds").is_none());
        assert!(json
            .as_object()
            .unwrap()
            .keys()
            .all(|key| !key.starts_with("multiple")));
    }

    #[test]
    fn test_payload_is_exactly_the_entered_data() {
        for answers in [single_answers(true), single_answers(false), multiple_answers()] {
            let mut wizard = RelocationWizard::new(RelocationFlow::new());
            let payload = run(&mut wizard, &answers).expect("submitted");

            let mut expected = Map::new();
            for (step, answer) in &answers {
                let record = prune(answer.as_object().unwrap());
                if *step == RELOCATION_TYPE {
                    expected.extend(record);
                } else {
                    expected.insert(step.to_string(), Value::Object(record));
                }
            }
            assert_eq!(serde_json::to_value(&payload).unwrap(), Value::Object(expected));
        }
    }

    #[test]
    fn test_switching_to_single_drops_multiple_steps() {
        let mut wizard = RelocationWizard::new(RelocationFlow::new());
        let answers = multiple_answers();
        run(&mut wizard, &answers[..3]);
        assert_eq!(wizard.current_index(), 3);

        assert_eq!(wizard.go_to(RELOCATION_TYPE).unwrap(), 0);
        let outcome = wizard
            .advance(data(json!({"relocationType": "single", "role": "insurer"})))
            .unwrap();

        assert!(matches!(
            outcome,
            AdvanceOutcome::Moved { index: 1, step: SINGLE_DISASTER_ADDRESS }
        ));
        assert!(keys(&wizard).iter().all(|key| !key.starts_with("multiple")));
        // stale batch data stays in the form but not in the sequence
        assert!(wizard.form_data().slice(MULTIPLE_COORDINATOR).is_some());
    }

    #[test]
    fn test_revise_remaps_index_when_list_shrinks() {
        let mut wizard = RelocationWizard::new(RelocationFlow::new());
        let answers = single_answers(true);
        run(&mut wizard, &answers[..6]);
        assert_eq!(wizard.current_step().unwrap().key(), "confirmation");
        assert_eq!(wizard.current_index(), 6);

        let mut personal = answers[2].1.clone();
        personal["hasSpecialNeeds"] = json!(false);
        assert!(wizard.revise(SINGLE_PERSONAL_DATA, data(personal)).unwrap().is_valid());

        assert_eq!(wizard.visible_steps().len(), 6);
        assert_eq!(wizard.current_index(), 5);
        assert_eq!(wizard.current_step().unwrap().key(), "confirmation");
    }

    #[test]
    fn test_revise_clamps_when_current_step_disappears() {
        let mut wizard = RelocationWizard::new(RelocationFlow::new());
        let answers = single_answers(true);
        run(&mut wizard, &answers[..3]);
        assert_eq!(wizard.current_step().unwrap().key(), SINGLE_SPECIAL_NEEDS);

        wizard
            .revise(RELOCATION_TYPE, data(json!({"relocationType": "multiple", "role": "broker"})))
            .unwrap();

        assert_eq!(wizard.visible_steps().len(), 4);
        assert_eq!(wizard.current_index(), 3);
    }

    #[test]
    fn test_finalize_ignores_stale_branch_but_requires_new_one() {
        let mut wizard = RelocationWizard::new(RelocationFlow::new());
        let answers = multiple_answers();
        run(&mut wizard, &answers[..3]);
        wizard
            .revise(RELOCATION_TYPE, data(json!({"relocationType": "single", "role": "owner"})))
            .unwrap();

        let err = match wizard.finalize() {
            Err(SiniError::Finalization(err)) => err,
            other => panic!("expected finalization error, got {other:?}"),
        };
        assert_eq!(err.first_failing_step(), Some(SINGLE_DISASTER_ADDRESS));
        assert!(err.for_step(MULTIPLE_COORDINATOR).is_none());
    }

    #[test]
    fn test_stale_branch_at_submission_sends_user_back() {
        let mut wizard = RelocationWizard::new(RelocationFlow::new());
        let answers = multiple_answers();
        run(&mut wizard, &answers[..3]);
        wizard
            .revise(RELOCATION_TYPE, data(json!({"relocationType": "single", "role": "owner"})))
            .unwrap();
        assert_eq!(wizard.current_step().unwrap().key(), "confirmation");

        match wizard.advance(data(json!({"acceptTerms": true}))).unwrap() {
            AdvanceOutcome::Incomplete(err) => {
                assert_eq!(err.first_failing_step(), Some(SINGLE_DISASTER_ADDRESS))
            }
            other => panic!("expected incomplete, got {other:?}"),
        }
        assert!(!wizard.is_submitted());
        assert!(!wizard.is_complete());
    }

    #[test]
    fn test_revise_cannot_skip_ahead_of_seeded_branch() {
        let mut wizard = relocation_wizard(&IntakeContext::from_query("userType=sinistre"));
        assert_eq!(wizard.current_step().unwrap().key(), RELOCATION_TYPE);

        let err = wizard
            .revise(SINGLE_LEASE_TERMINATION, data(json!({"hasTerminatedLease": false})))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!wizard.state().visited_steps.contains(SINGLE_LEASE_TERMINATION));
        assert!(wizard.go_to(SINGLE_LEASE_TERMINATION).is_err());
        assert_eq!(wizard.current_index(), 0);
    }

    #[test]
    fn test_batch_household_errors_are_indexed() {
        let wizard = RelocationWizard::new(RelocationFlow::new());
        let result = wizard
            .validate_step(
                MULTIPLE_RELOCATION_REQUESTS,
                &data(json!({"requests": [{
                    "householdName": "Favre",
                    "street": "Avenue de Tourbillon 10",
                    "city": "Sion",
                    "postalCode": "195",
                    "adults": 2,
                    "rooms": 3,
                    "desiredStartDate": "2025-04-01",
                    "hasSpecialNeeds": true
                }]})),
            )
            .unwrap();

        assert_eq!(
            result.error("requests[0].postalCode"),
            Some("Enter a valid Swiss postal code (4 digits)")
        );
        assert!(result.error("requests[0].specialNeedsDescription").is_some());
    }
}
