//! Field groups shared by both wizards

use crate::wizard::schema::CANTONS;
use crate::wizard::{FieldKind, FieldRule, Schema, StepDefinition};

pub const CONFIRMATION: &str = "confirmation";

pub fn name() -> FieldKind {
    FieldKind::Text { max_len: 80 }
}

pub fn street() -> FieldKind {
    FieldKind::Text { max_len: 120 }
}

pub fn city() -> FieldKind {
    FieldKind::Text { max_len: 80 }
}

pub fn long_text() -> FieldKind {
    FieldKind::Text { max_len: 1000 }
}

/// Street, city, NPA and optional canton
pub fn address_schema() -> Schema {
    Schema::new()
        .field(FieldRule::required("street", street()))
        .field(FieldRule::required("city", city()))
        .field(FieldRule::required("postalCode", FieldKind::SwissPostalCode))
        .field(FieldRule::optional("canton", FieldKind::Choice(CANTONS)))
}

/// Name, e-mail and Swiss phone number
pub fn contact_schema() -> Schema {
    Schema::new()
        .field(FieldRule::required("firstName", name()))
        .field(FieldRule::required("lastName", name()))
        .field(FieldRule::required("email", FieldKind::Email))
        .field(FieldRule::required("phone", FieldKind::SwissPhone))
}

/// Terms acknowledgement closing every wizard
pub fn confirmation_step() -> StepDefinition {
    StepDefinition::new(
        CONFIRMATION,
        "Confirmation",
        Schema::new()
            .field(FieldRule::required("acceptTerms", FieldKind::Accepted))
            .field(FieldRule::optional("remarks", long_text())),
    )
}
