//! Core data models for SINI intake
//!
//! Typed submission payloads for both wizards, the inbound page context,
//! dashboard cases and ID newtypes.

pub mod case;
pub mod context;
pub mod ids;
pub mod property;
pub mod relocation;

pub use case::{Case, CaseFilter, CaseStatus};
pub use context::{Brand, IntakeContext, UserType};
pub use ids::{DraftId, SubmissionId};
pub use property::{ListingPlatform, PropertyFormData, PropertyType};
pub use relocation::{RelocationFormData, RelocationType, SubmitterRole};
