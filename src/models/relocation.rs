//! Relocation request payload
//!
//! The finished request is a tagged union on `relocationType`: a single
//! household or a batch coordinated by one submitter. Keys of the other
//! branch cannot appear in a payload.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One household or several under one coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelocationType {
    Single,
    Multiple,
}

impl RelocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }

    /// Parse relocation type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Some(Self::Single),
            "multiple" => Some(Self::Multiple),
            _ => None,
        }
    }
}

impl fmt::Display for RelocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capacity in which the request is filed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitterRole {
    Tenant,
    Owner,
    Insurer,
    Broker,
}

/// Kind of event that made the home uninhabitable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterKind {
    Fire,
    Flood,
    Storm,
    Landslide,
    Other,
}

/// Address of the damaged home
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canton: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disaster_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disaster_kind: Option<DisasterKind>,
}

/// Contact and household composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub adults: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_pets: Option<bool>,
    pub has_special_needs: bool,
}

/// Accessibility or medical requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialNeeds {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheelchair_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_equipment: Option<bool>,
}

/// Whether the current lease was terminated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseTermination {
    pub has_terminated_lease: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_date: Option<NaiveDate>,
}

/// What the household needs in temporary housing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationNeeds {
    pub rooms: u32,
    pub desired_start_date: NaiveDate,
    pub duration_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_monthly_budget: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_area: Option<String>,
}

/// Person coordinating a batch of relocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinator {
    pub organization: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_reference: Option<String>,
}

/// One household inside a batch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdRequest {
    pub household_name: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub adults: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<u32>,
    pub rooms: u32,
    pub desired_start_date: NaiveDate,
    pub has_special_needs: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_needs_description: Option<String>,
}

/// The batch of households
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocationRequests {
    pub requests: Vec<HouseholdRequest>,
}

/// Closing acknowledgement shared by both wizards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub accept_terms: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Request for one household
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleRelocation {
    pub role: SubmitterRole,
    pub single_disaster_address: DisasterAddress,
    pub single_personal_data: PersonalData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_special_needs: Option<SpecialNeeds>,
    pub single_lease_termination: LeaseTermination,
    pub single_accommodation_needs: AccommodationNeeds,
    pub confirmation: Confirmation,
}

/// Request for several households
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleRelocation {
    pub role: SubmitterRole,
    pub multiple_coordinator: Coordinator,
    pub multiple_relocation_requests: RelocationRequests,
    pub confirmation: Confirmation,
}

/// Finished relocation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "relocationType", rename_all = "lowercase")]
pub enum RelocationFormData {
    Single(SingleRelocation),
    Multiple(MultipleRelocation),
}

impl RelocationFormData {
    pub fn relocation_type(&self) -> RelocationType {
        match self {
            Self::Single(_) => RelocationType::Single,
            Self::Multiple(_) => RelocationType::Multiple,
        }
    }

    /// Number of households covered by the request
    pub fn household_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multiple(batch) => batch.multiple_relocation_requests.requests.len(),
        }
    }

    /// E-mail the confirmation should go to
    pub fn contact_email(&self) -> &str {
        match self {
            Self::Single(single) => &single.single_personal_data.email,
            Self::Multiple(batch) => &batch.multiple_coordinator.email,
        }
    }
}
