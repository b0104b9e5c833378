//! Step definitions and visibility
//!
//! The visible sequence is always derived from the master list and the
//! current form data. Nothing about it is stored.

use std::fmt;

use super::form::FormData;
use super::schema::Schema;

/// Predicate deciding whether a step takes part in the sequence
pub type Visibility = fn(&FormData) -> bool;

/// Where a step's record lands in the assembled payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Under the step key (`{"singleDisasterAddress": {...}}`)
    Nested,
    /// Fields merged into the payload's top level
    Flatten,
}

/// One screen of a wizard
#[derive(Clone)]
pub struct StepDefinition {
    key: &'static str,
    title: &'static str,
    depends_on: Option<Visibility>,
    schema: Schema,
    placement: Placement,
}

impl StepDefinition {
    /// Create an always-visible step
    pub fn new(key: &'static str, title: &'static str, schema: Schema) -> Self {
        Self {
            key,
            title,
            depends_on: None,
            schema,
            placement: Placement::Nested,
        }
    }

    /// Only show this step when `predicate` holds
    pub fn depends_on(mut self, predicate: Visibility) -> Self {
        self.depends_on = Some(predicate);
        self
    }

    /// Merge this step's fields into the payload's top level
    pub fn flattened(mut self) -> Self {
        self.placement = Placement::Flatten;
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Whether the step has a visibility condition
    pub fn is_conditional(&self) -> bool {
        self.depends_on.is_some()
    }

    /// Evaluate the visibility condition against form data
    pub fn is_visible(&self, form: &FormData) -> bool {
        self.depends_on.map_or(true, |predicate| predicate(form))
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("key", &self.key)
            .field("conditional", &self.is_conditional())
            .field("placement", &self.placement)
            .finish()
    }
}

/// Filter the master list down to the steps visible for `form`
///
/// Order is the master-list order; nothing is reordered.
pub fn visible_steps<'a>(steps: &'a [StepDefinition], form: &FormData) -> Vec<&'a StepDefinition> {
    steps.iter().filter(|step| step.is_visible(form)).collect()
}

/// Find a step in the master list by key
pub fn find_step<'a>(steps: &'a [StepDefinition], key: &str) -> Option<&'a StepDefinition> {
    steps.iter().find(|step| step.key == key)
}
