//! Wizard state machine
//!
//! States are the indices of the visible step list plus a terminal
//! "submitted" state. `advance` moves forward on valid input, `retreat` moves
//! back without checks, and `finalize` re-validates everything visible before
//! producing the payload. Merges are all-or-nothing per step.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{SiniError, SiniResult};

use super::flow::{FlowKind, IntakeFlow};
use super::form::{prune, FormData, StepData};
use super::schema::StepValidation;
use super::step::{find_step, visible_steps, Placement, StepDefinition};

/// Everything a wizard remembers between calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_step_index: usize,
    pub form_data: FormData,
    /// Steps whose data passed validation
    pub visited_steps: BTreeSet<String>,
}

/// Result of a call to [`WizardController::advance`]
#[derive(Debug, Clone)]
pub enum AdvanceOutcome<P> {
    /// Data accepted; the wizard now shows `step` at `index`
    Moved { index: usize, step: &'static str },
    /// Data refused; nothing was stored
    Rejected(StepValidation),
    /// Last step accepted and the whole wizard validated
    Submitted(P),
    /// Last step accepted but an earlier visible step no longer validates
    Incomplete(FinalizationError),
}

impl<P> AdvanceOutcome<P> {
    /// Whether the submitted data was accepted
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// A step that failed re-validation during finalize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub step: String,
    pub validation: StepValidation,
}

/// Aggregate finalize failure, in visible-step order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizationError {
    pub failures: Vec<StepFailure>,
}

impl FinalizationError {
    /// The step the user should be sent back to
    pub fn first_failing_step(&self) -> Option<&str> {
        self.failures.first().map(|failure| failure.step.as_str())
    }

    /// Validation result for one step, if it failed
    pub fn for_step(&self, step: &str) -> Option<&StepValidation> {
        self.failures
            .iter()
            .find(|failure| failure.step == step)
            .map(|failure| &failure.validation)
    }
}

impl fmt::Display for FinalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<&str> = self.failures.iter().map(|f| f.step.as_str()).collect();
        write!(
            f,
            "{} step(s) need attention: {}",
            self.failures.len(),
            steps.join(", ")
        )
    }
}

impl std::error::Error for FinalizationError {}

/// Drives one wizard instance for a single session
pub struct WizardController<F: IntakeFlow> {
    flow: F,
    state: WizardState,
    submitted: bool,
}

impl<F: IntakeFlow> WizardController<F> {
    /// Start a fresh wizard on its first step
    pub fn new(flow: F) -> Self {
        Self::with_form_data(flow, FormData::new())
    }

    /// Start on the first step with some answers pre-seeded
    ///
    /// Seeded slices are not marked visited; they only prefill and steer
    /// visibility until the user confirms them.
    pub fn with_form_data(flow: F, form_data: FormData) -> Self {
        Self::restore(
            flow,
            WizardState {
                current_step_index: 0,
                form_data,
                visited_steps: BTreeSet::new(),
            },
        )
    }

    /// Resume from a saved state, clamping the step pointer if needed
    pub fn restore(flow: F, state: WizardState) -> Self {
        let mut controller = Self {
            flow,
            state,
            submitted: false,
        };
        let len = controller.visible_steps().len();
        controller.state.current_step_index = controller.state.current_step_index.min(len.saturating_sub(1));
        controller
    }

    pub fn kind(&self) -> FlowKind {
        self.flow.kind()
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn form_data(&self) -> &FormData {
        &self.state.form_data
    }

    pub fn current_index(&self) -> usize {
        self.state.current_step_index
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Visible steps for arbitrary form data
    pub fn compute_visible_steps(&self, form: &FormData) -> Vec<&StepDefinition> {
        visible_steps(self.flow.steps(), form)
    }

    /// Visible steps for the current form data
    pub fn visible_steps(&self) -> Vec<&StepDefinition> {
        self.compute_visible_steps(&self.state.form_data)
    }

    /// The step on screen, or `None` once submitted
    pub fn current_step(&self) -> Option<&StepDefinition> {
        if self.submitted {
            return None;
        }
        self.visible_steps()
            .get(self.state.current_step_index)
            .copied()
    }

    /// Whether every visible step has passed validation at least once
    pub fn is_complete(&self) -> bool {
        self.visible_steps()
            .iter()
            .all(|step| self.state.visited_steps.contains(step.key()))
    }

    /// Validate a record against a step's schema without touching state
    pub fn validate_step(&self, step_key: &str, data: &StepData) -> SiniResult<StepValidation> {
        let step = find_step(self.flow.steps(), step_key)
            .ok_or_else(|| SiniError::step_not_found(step_key))?;
        Ok(step.schema().validate(data))
    }

    /// Submit the current step's record
    pub fn advance(&mut self, data: StepData) -> SiniResult<AdvanceOutcome<F::Payload>> {
        self.ensure_open()?;

        let steps = self.flow.steps();
        let current = visible_steps(steps, &self.state.form_data)
            .get(self.state.current_step_index)
            .copied()
            .ok_or_else(|| SiniError::step_not_found(self.state.current_step_index.to_string()))?;
        let key = current.key();

        let validation = current.schema().validate(&data);
        if !validation.is_valid() {
            debug!(flow = %self.flow.kind(), step = key, errors = validation.errors.len(), "step rejected");
            return Ok(AdvanceOutcome::Rejected(validation));
        }

        self.state.form_data.insert(key, data);
        self.state.visited_steps.insert(key.to_string());

        let visible = visible_steps(steps, &self.state.form_data);
        let next = match visible.iter().position(|step| step.key() == key) {
            Some(position) => position + 1,
            None => self.state.current_step_index,
        };

        if next < visible.len() {
            let step = visible[next].key();
            self.state.current_step_index = next;
            debug!(flow = %self.flow.kind(), from = key, to = step, index = next, "step accepted");
            return Ok(AdvanceOutcome::Moved { index: next, step });
        }

        self.state.current_step_index = visible.len().saturating_sub(1);
        match self.finalize() {
            Ok(payload) => Ok(AdvanceOutcome::Submitted(payload)),
            Err(SiniError::Finalization(err)) => Ok(AdvanceOutcome::Incomplete(err)),
            Err(err) => Err(err),
        }
    }

    /// Go back one step; a no-op on the first step
    pub fn retreat(&mut self) -> SiniResult<usize> {
        self.ensure_open()?;
        self.state.current_step_index = self.state.current_step_index.saturating_sub(1);
        Ok(self.state.current_step_index)
    }

    /// Jump back to a step the user has already reached
    pub fn go_to(&mut self, step_key: &str) -> SiniResult<usize> {
        self.ensure_open()?;

        let visible = self.visible_steps();
        let position = visible
            .iter()
            .position(|step| step.key() == step_key)
            .ok_or_else(|| SiniError::step_not_found(step_key))?;

        self.ensure_reached(position, step_key)?;

        self.state.current_step_index = position;
        Ok(position)
    }

    /// Replace the answers of an already reached step without moving on
    ///
    /// Used to edit an earlier answer from a summary screen. Steps ahead of
    /// the pointer that never passed validation are refused. The visible list
    /// is recomputed; if the step on screen disappears, the pointer is clamped
    /// into the new, shorter list.
    pub fn revise(&mut self, step_key: &str, data: StepData) -> SiniResult<StepValidation> {
        self.ensure_open()?;

        let steps = self.flow.steps();
        let visible = visible_steps(steps, &self.state.form_data);
        let position = visible
            .iter()
            .position(|step| step.key() == step_key)
            .ok_or_else(|| SiniError::step_not_found(step_key))?;
        self.ensure_reached(position, step_key)?;
        let step = visible[position];

        let validation = step.schema().validate(&data);
        if !validation.is_valid() {
            return Ok(validation);
        }

        let on_screen = visible
            .get(self.state.current_step_index)
            .map(|step| step.key());

        self.state.form_data.insert(step.key(), data);
        self.state.visited_steps.insert(step.key().to_string());

        let visible = visible_steps(steps, &self.state.form_data);
        let clamped = self.state.current_step_index.min(visible.len().saturating_sub(1));
        self.state.current_step_index = on_screen
            .and_then(|key| visible.iter().position(|step| step.key() == key))
            .unwrap_or(clamped);

        debug!(flow = %self.flow.kind(), step = step_key, index = self.state.current_step_index, "step revised");
        Ok(validation)
    }

    /// Re-validate every visible step and assemble the payload
    pub fn finalize(&mut self) -> SiniResult<F::Payload> {
        self.ensure_open()?;

        let visible = visible_steps(self.flow.steps(), &self.state.form_data);
        let failures: Vec<StepFailure> = visible
            .iter()
            .filter_map(|step| {
                let data = self
                    .state
                    .form_data
                    .slice(step.key())
                    .cloned()
                    .unwrap_or_default();
                let validation = step.schema().validate(&data);
                (!validation.is_valid()).then(|| StepFailure {
                    step: step.key().to_string(),
                    validation,
                })
            })
            .collect();

        if !failures.is_empty() {
            let err = FinalizationError { failures };
            debug!(flow = %self.flow.kind(), first = ?err.first_failing_step(), "finalize refused");
            return Err(err.into());
        }

        let payload = self.assemble(&visible)?;
        self.submitted = true;
        info!(flow = %self.flow.kind(), steps = visible.len(), "wizard submitted");
        Ok(payload)
    }

    /// Build the typed payload from the visible steps' stored records
    fn assemble(&self, visible: &[&StepDefinition]) -> SiniResult<F::Payload> {
        let mut object = Map::new();
        for step in visible {
            let record = self
                .state
                .form_data
                .slice(step.key())
                .map(prune)
                .unwrap_or_default();
            match step.placement() {
                Placement::Flatten => object.extend(record),
                Placement::Nested => {
                    object.insert(step.key().to_string(), Value::Object(record));
                }
            }
        }
        Ok(serde_json::from_value(Value::Object(object))?)
    }

    /// Steps ahead of the pointer only count once they passed validation
    fn ensure_reached(&self, position: usize, step_key: &str) -> SiniResult<()> {
        if position <= self.state.current_step_index || self.state.visited_steps.contains(step_key) {
            Ok(())
        } else {
            Err(SiniError::Validation(format!(
                "Step '{}' has not been reached yet",
                step_key
            )))
        }
    }

    fn ensure_open(&self) -> SiniResult<()> {
        if self.submitted {
            Err(SiniError::WizardClosed)
        } else {
            Ok(())
        }
    }
}
