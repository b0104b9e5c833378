//! Concrete intake wizards
//!
//! Each flow is a master step list plus the typed payload it assembles.
//! Visibility predicates live next to the steps they guard.

pub mod common;
pub mod property;
pub mod relocation;

pub use property::{property_wizard, PropertyFlow, PropertyWizard};
pub use relocation::{relocation_wizard, RelocationFlow, RelocationWizard};
