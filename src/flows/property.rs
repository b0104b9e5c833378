//! Property listing wizard for hosts
//!
//! `listingDetails` is only part of the sequence when the host says the
//! property is already advertised.

use crate::models::property::PropertyFormData;
use crate::wizard::{
    CrossCheck, FieldKind, FieldRule, FlowKind, FormData, IntakeFlow, Schema, StepDefinition,
    WizardController,
};

use super::common;

pub const HOST_CONTACT: &str = "hostContact";
pub const PROPERTY_ADDRESS: &str = "propertyAddress";
pub const PROPERTY_DETAILS: &str = "propertyDetails";
pub const AVAILABILITY: &str = "availability";
pub const LISTING_STATUS: &str = "listingStatus";
pub const LISTING_DETAILS: &str = "listingDetails";

const PROPERTY_TYPES: &[&str] = &["apartment", "house", "studio", "room"];
const PLATFORMS: &[&str] = &["homegate", "immoscout24", "comparis", "other"];

fn is_listed(form: &FormData) -> bool {
    form.flag(LISTING_STATUS, "isListed")
}

fn master_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            HOST_CONTACT,
            "Contact",
            common::contact_schema().field(FieldRule::optional("company", common::name())),
        ),
        StepDefinition::new(PROPERTY_ADDRESS, "Address", common::address_schema()),
        StepDefinition::new(
            PROPERTY_DETAILS,
            "Property",
            Schema::new()
                .field(FieldRule::required("propertyType", FieldKind::Choice(PROPERTY_TYPES)))
                .field(FieldRule::required("rooms", FieldKind::Integer { min: 1, max: 20 }))
                .field(FieldRule::required("surface", FieldKind::Integer { min: 10, max: 1000 }))
                .field(FieldRule::required("maxOccupants", FieldKind::Integer { min: 1, max: 30 }))
                .field(FieldRule::optional("furnished", FieldKind::Boolean))
                .field(FieldRule::optional("petsAllowed", FieldKind::Boolean))
                .field(FieldRule::optional("accessible", FieldKind::Boolean)),
        ),
        StepDefinition::new(
            AVAILABILITY,
            "Availability",
            Schema::new()
                .field(FieldRule::required("availableFrom", FieldKind::Date))
                .field(FieldRule::optional("availableUntil", FieldKind::Date))
                .field(FieldRule::required("monthlyRent", FieldKind::Integer { min: 0, max: 50_000 }))
                .check(CrossCheck::DateNotBefore {
                    field: "availableUntil",
                    earlier: "availableFrom",
                }),
        ),
        StepDefinition::new(
            LISTING_STATUS,
            "Existing listing",
            Schema::new().field(FieldRule::required("isListed", FieldKind::Boolean)),
        ),
        StepDefinition::new(
            LISTING_DETAILS,
            "Listing details",
            Schema::new()
                .field(FieldRule::required("platform", FieldKind::Choice(PLATFORMS)))
                .field(FieldRule::required("listingUrl", FieldKind::Url))
                .field(FieldRule::optional("listingReference", FieldKind::Text { max_len: 40 })),
        )
        .depends_on(is_listed),
        common::confirmation_step(),
    ]
}

/// The property wizard definition
pub struct PropertyFlow {
    steps: Vec<StepDefinition>,
}

impl PropertyFlow {
    pub fn new() -> Self {
        Self {
            steps: master_steps(),
        }
    }
}

impl Default for PropertyFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeFlow for PropertyFlow {
    type Payload = PropertyFormData;

    fn kind(&self) -> FlowKind {
        FlowKind::Property
    }

    fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }
}

pub type PropertyWizard = WizardController<PropertyFlow>;

/// Open a property wizard
pub fn property_wizard() -> PropertyWizard {
    WizardController::new(PropertyFlow::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{AdvanceOutcome, StepData};
    use serde_json::{json, Value};

    fn data(value: Value) -> StepData {
        value.as_object().cloned().unwrap()
    }

    fn answers(listed: bool) -> Vec<(&'static str, Value)> {
        let mut answers = vec![
            (
                HOST_CONTACT,
                json!({
                    "firstName": "Jean",
                    "lastName": "Perrin",
                    "email": "jean.perrin@example.ch",
                    "phone": "021 312 45 67"
                }),
            ),
            (
                PROPERTY_ADDRESS,
                json!({"street": "Chemin des Vignes 4", "city": "Lutry", "postalCode": "1095", "canton": "VD"}),
            ),
            (
                PROPERTY_DETAILS,
                json!({"propertyType": "apartment", "rooms": 4, "surface": 95, "maxOccupants": 5, "furnished": true}),
            ),
            (
                AVAILABILITY,
                json!({"availableFrom": "2025-03-01", "availableUntil": "2025-12-31", "monthlyRent": 2100}),
            ),
            (LISTING_STATUS, json!({"isListed": listed})),
        ];
        if listed {
            answers.push((
                LISTING_DETAILS,
                json!({"platform": "homegate", "listingUrl": "https://www.homegate.ch/rent/3001234567"}),
            ));
        }
        answers.push((common::CONFIRMATION, json!({"acceptTerms": true, "remarks": "Parking included"})));
        answers
    }

    fn complete(wizard: &mut PropertyWizard, answers: &[(&'static str, Value)]) -> PropertyFormData {
        for (step, answer) in answers {
            assert_eq!(wizard.current_step().unwrap().key(), *step);
            if let AdvanceOutcome::Submitted(payload) = wizard.advance(data(answer.clone())).unwrap() {
                return payload;
            }
        }
        panic!("wizard did not submit");
    }

    #[test]
    fn test_listing_details_hidden_until_listed() {
        let wizard = property_wizard();
        let keys: Vec<_> = wizard.visible_steps().iter().map(|s| s.key()).collect();
        assert!(!keys.contains(&LISTING_DETAILS));
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn test_unlisted_property_payload() {
        let mut wizard = property_wizard();
        let payload = complete(&mut wizard, &answers(false));

        assert!(!payload.is_listed());
        assert!(payload.listing_details.is_none());
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get(LISTING_DETAILS).is_none());
        assert_eq!(json["availability"]["monthlyRent"], 2100);
    }

    #[test]
    fn test_listed_property_payload() {
        let mut wizard = property_wizard();
        let payload = complete(&mut wizard, &answers(true));

        let details = payload.listing_details.expect("listing details");
        assert_eq!(details.listing_url, "https://www.homegate.ch/rent/3001234567");
    }

    #[test]
    fn test_availability_end_before_start_rejected() {
        let wizard = property_wizard();
        let result = wizard
            .validate_step(
                AVAILABILITY,
                &data(json!({"availableFrom": "2025-03-01", "availableUntil": "2025-01-31", "monthlyRent": 1500})),
            )
            .unwrap();
        assert!(result.error("availableUntil").is_some());
    }

    #[test]
    fn test_listing_url_must_be_http() {
        let wizard = property_wizard();
        let result = wizard
            .validate_step(
                LISTING_DETAILS,
                &data(json!({"platform": "comparis", "listingUrl": "ftp://example.ch/listing"})),
            )
            .unwrap();
        assert_eq!(result.error("listingUrl"), Some("Enter a valid http(s) URL"));
    }

    #[test]
    fn test_unlisting_drops_stored_listing_details_from_payload() {
        let mut wizard = property_wizard();
        let answers = answers(true);
        for (_, answer) in &answers[..6] {
            wizard.advance(data(answer.clone())).unwrap();
        }
        wizard
            .revise(LISTING_STATUS, data(json!({"isListed": false})))
            .unwrap();
        assert!(wizard.form_data().slice(LISTING_DETAILS).is_some());

        let outcome = wizard
            .advance(data(json!({"acceptTerms": true})))
            .unwrap();
        match outcome {
            AdvanceOutcome::Submitted(payload) => assert!(payload.listing_details.is_none()),
            other => panic!("expected submission, got {other:?}"),
        }
    }
}
