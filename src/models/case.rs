//! Relocation case shown on the victim, insurer and host dashboards

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::relocation::RelocationType;

/// Where a case stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Submitted,
    Matching,
    Offered,
    Relocated,
    Closed,
}

impl CaseStatus {
    /// Parse status from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "submitted" => Some(Self::Submitted),
            "matching" => Some(Self::Matching),
            "offered" => Some(Self::Offered),
            "relocated" => Some(Self::Relocated),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Whether the case still needs work
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Relocated | Self::Closed)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitted => write!(f, "Submitted"),
            Self::Matching => write!(f, "Matching"),
            Self::Offered => write!(f, "Offered"),
            Self::Relocated => write!(f, "Relocated"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

/// A relocation case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// Reference number quoted at login (`SINI-2024-0012`)
    pub reference: String,
    pub status: CaseStatus,
    pub relocation_type: RelocationType,
    /// Household or batch name
    pub name: String,
    pub city: String,
    pub canton: String,
    pub households: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub opened_on: NaiveDate,
}

/// Dashboard filter; every set criterion must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFilter {
    pub reference: Option<String>,
    pub status: Option<CaseStatus>,
    pub canton: Option<String>,
    pub relocation_type: Option<RelocationType>,
    /// Insurer name, matched case-insensitively
    pub insurer: Option<String>,
    /// Host name, matched case-insensitively
    pub host: Option<String>,
    /// Only cases that are not relocated or closed
    pub open_only: bool,
}

impl CaseFilter {
    /// Check whether a case passes the filter
    pub fn matches(&self, case: &Case) -> bool {
        fn same(expected: &Option<String>, actual: Option<&str>) -> bool {
            match expected {
                None => true,
                Some(expected) => actual.is_some_and(|a| a.eq_ignore_ascii_case(expected.trim())),
            }
        }

        same(&self.reference, Some(case.reference.as_str()))
            && self.status.map_or(true, |s| s == case.status)
            && same(&self.canton, Some(case.canton.as_str()))
            && self.relocation_type.map_or(true, |t| t == case.relocation_type)
            && same(&self.insurer, case.insurer.as_deref())
            && same(&self.host, case.host.as_deref())
            && (!self.open_only || case.status.is_open())
    }
}
