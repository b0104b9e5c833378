//! Property listing payload submitted by hosts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::relocation::Confirmation;

/// Kind of accommodation offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Studio,
    Room,
}

/// Listing platforms hosts commonly already use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingPlatform {
    Homegate,
    Immoscout24,
    Comparis,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canton: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub property_type: PropertyType,
    pub rooms: u32,
    /// Living area in square metres
    pub surface: u32,
    pub max_occupants: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furnished: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pets_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available_from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_until: Option<NaiveDate>,
    /// CHF per month
    pub monthly_rent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStatus {
    pub is_listed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetails {
    pub platform: ListingPlatform,
    pub listing_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_reference: Option<String>,
}

/// Finished property submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFormData {
    pub host_contact: HostContact,
    pub property_address: PropertyAddress,
    pub property_details: PropertyDetails,
    pub availability: Availability,
    pub listing_status: ListingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_details: Option<ListingDetails>,
    pub confirmation: Confirmation,
}

impl PropertyFormData {
    /// Whether the host already advertises the property elsewhere
    pub fn is_listed(&self) -> bool {
        self.listing_status.is_listed
    }
}
