//! Inbound context a wizard is opened with
//!
//! The landing pages pass `userType` (or `type`) and `brand` as query values.
//! The user type picks the flow and may hint the relocation type; the brand
//! only travels along for presentation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wizard::FlowKind;

use super::relocation::RelocationType;

/// Partner brand a page is themed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    #[default]
    Sini,
    Generali,
    Vaudoise,
}

impl Brand {
    /// Parse brand from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sini" | "pharewest" => Some(Self::Sini),
            "generali" => Some(Self::Generali),
            "vaudoise" => Some(Self::Vaudoise),
            _ => None,
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sini => write!(f, "SINI"),
            Self::Generali => write!(f, "Generali"),
            Self::Vaudoise => write!(f, "Vaudoise"),
        }
    }
}

/// Who arrived at the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Disaster victim (`sinistre`)
    Sinistre,
    /// Insurer (`assurance`)
    Assurance,
    /// Property host
    Host,
}

impl UserType {
    /// Parse user type from a query value
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sinistre" | "victim" => Some(Self::Sinistre),
            "assurance" | "insurer" => Some(Self::Assurance),
            "host" | "hote" | "hôte" => Some(Self::Host),
            _ => None,
        }
    }

    /// The wizard this user type fills in
    pub fn flow(&self) -> FlowKind {
        match self {
            Self::Sinistre | Self::Assurance => FlowKind::Relocation,
            Self::Host => FlowKind::Property,
        }
    }

    /// Relocation type implied by the user type, if any
    pub fn relocation_hint(&self) -> Option<RelocationType> {
        match self {
            Self::Sinistre => Some(RelocationType::Single),
            Self::Assurance => Some(RelocationType::Multiple),
            Self::Host => None,
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sinistre => write!(f, "sinistre"),
            Self::Assurance => write!(f, "assurance"),
            Self::Host => write!(f, "host"),
        }
    }
}

/// Query context carried by a wizard session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub brand: Brand,
}

impl IntakeContext {
    /// Build a context from a query string such as `userType=sinistre&brand=generali`
    ///
    /// Unknown keys and unrecognised values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut context = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "userType" | "type" => {
                    if let Some(user_type) = UserType::parse(value) {
                        context.user_type = Some(user_type);
                    }
                }
                "brand" => {
                    if let Some(brand) = Brand::parse(value) {
                        context.brand = brand;
                    }
                }
                _ => {}
            }
        }
        context
    }
}
