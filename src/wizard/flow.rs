//! The seam between the generic controller and a concrete intake flow

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::step::StepDefinition;

/// Which intake a wizard collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Relocation request from a victim or an insurer
    Relocation,
    /// Property offered by a host
    Property,
}

impl FlowKind {
    /// Parse a flow kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "relocation" => Some(Self::Relocation),
            "property" | "host" => Some(Self::Property),
            _ => None,
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relocation => write!(f, "relocation"),
            Self::Property => write!(f, "property"),
        }
    }
}

/// A concrete wizard: its master step list and the payload it produces
pub trait IntakeFlow {
    /// Typed submission payload assembled from the visible steps
    type Payload: Serialize + DeserializeOwned + Clone + fmt::Debug;

    fn kind(&self) -> FlowKind;

    /// Master step list, in display order
    fn steps(&self) -> &[StepDefinition];
}
