//! Multi-step intake wizard
//!
//! A generic controller over an ordered master list of steps. Each step has
//! a schema and an optional visibility predicate; the visible sequence is
//! recomputed from the answers after every accepted step.

pub mod controller;
pub mod flow;
pub mod form;
pub mod schema;
pub mod step;

pub use controller::{AdvanceOutcome, FinalizationError, StepFailure, WizardController, WizardState};
pub use flow::{FlowKind, IntakeFlow};
pub use form::{FormData, StepData};
pub use schema::{CrossCheck, FieldKind, FieldRule, Requirement, Schema, StepValidation};
pub use step::{visible_steps, Placement, StepDefinition, Visibility};
