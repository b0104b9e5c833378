//! Read-only case list behind the dashboards
//!
//! The production case list lives with the back office. Dashboards here read
//! a JSON document of the same shape, the bundled demo list by default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SiniError;
use crate::models::{Case, CaseFilter};

use super::file_io::read_json;

const BUNDLED_CASES: &str = include_str!("../../fixtures/cases.json");

/// Serializable case list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CaseData {
    cases: Vec<Case>,
}

/// Source of dashboard cases
pub trait CaseRepository {
    /// Cases passing `filter`, newest first
    fn list_cases(&self, filter: &CaseFilter) -> Result<Vec<Case>, SiniError>;

    /// Look up one case by reference
    fn get_case(&self, reference: &str) -> Result<Case, SiniError> {
        let filter = CaseFilter {
            reference: Some(reference.to_string()),
            ..CaseFilter::default()
        };
        self.list_cases(&filter)?
            .into_iter()
            .next()
            .ok_or_else(|| SiniError::NotFound {
                entity_type: "Case",
                identifier: reference.to_string(),
            })
    }
}

/// Cases loaded once from a JSON document
pub struct JsonCaseRepository {
    cases: Vec<Case>,
}

impl JsonCaseRepository {
    /// The demo case list shipped with the binary
    pub fn bundled() -> Result<Self, SiniError> {
        let data: CaseData = serde_json::from_str(BUNDLED_CASES)?;
        Ok(Self::from_cases(data.cases))
    }

    /// Load cases from a file
    pub fn load(path: &Path) -> Result<Self, SiniError> {
        let data: CaseData = read_json(path)?;
        Ok(Self::from_cases(data.cases))
    }

    /// Load from `path` if given, otherwise the bundled list
    pub fn open(path: Option<&Path>) -> Result<Self, SiniError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    pub fn from_cases(mut cases: Vec<Case>) -> Self {
        cases.sort_by(|a, b| {
            b.opened_on
                .cmp(&a.opened_on)
                .then_with(|| a.reference.cmp(&b.reference))
        });
        Self { cases }
    }
}

impl CaseRepository for JsonCaseRepository {
    fn list_cases(&self, filter: &CaseFilter) -> Result<Vec<Case>, SiniError> {
        Ok(self
            .cases
            .iter()
            .filter(|case| filter.matches(case))
            .cloned()
            .collect())
    }
}
