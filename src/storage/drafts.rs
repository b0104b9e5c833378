//! Draft repository for JSON storage
//!
//! One file per draft under `data/drafts/`, named after the draft UUID.
//! Drafts are only written when the user asks for it.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SiniError;
use crate::models::{DraftId, IntakeContext};
use crate::wizard::{FlowKind, IntakeFlow, WizardController, WizardState};

use super::file_io::{read_json, write_json_atomic};

/// A paused wizard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardDraft {
    pub id: DraftId,
    pub flow: FlowKind,
    #[serde(default)]
    pub context: IntakeContext,
    pub state: WizardState,
    pub saved_at: DateTime<Utc>,
}

impl WizardDraft {
    /// Snapshot an open wizard
    pub fn capture<F: IntakeFlow>(
        wizard: &WizardController<F>,
        context: IntakeContext,
    ) -> Result<Self, SiniError> {
        if wizard.is_submitted() {
            return Err(SiniError::WizardClosed);
        }
        Ok(Self {
            id: DraftId::new(),
            flow: wizard.kind(),
            context,
            state: wizard.state().clone(),
            saved_at: Utc::now(),
        })
    }

    /// Rebuild the wizard this draft was taken from
    pub fn resume<F: IntakeFlow>(&self, flow: F) -> Result<WizardController<F>, SiniError> {
        if flow.kind() != self.flow {
            return Err(SiniError::Validation(format!(
                "Draft {} belongs to the {} wizard",
                self.id, self.flow
            )));
        }
        Ok(WizardController::restore(flow, self.state.clone()))
    }
}

/// Repository for draft persistence
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, id: DraftId) -> PathBuf {
        self.dir.join(format!("{}.json", id.as_uuid()))
    }

    /// Write a draft, replacing any earlier version with the same ID
    pub fn save(&self, draft: &WizardDraft) -> Result<(), SiniError> {
        debug!(draft = %draft.id, flow = %draft.flow, "saving draft");
        write_json_atomic(self.path_for(draft.id), draft)
    }

    /// Load a draft by ID
    pub fn load(&self, id: DraftId) -> Result<WizardDraft, SiniError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(SiniError::draft_not_found(id.to_string()));
        }
        read_json(path)
    }

    /// Find a draft by full UUID, prefixed ID or the short `drf-xxxxxxxx` form
    pub fn find(&self, identifier: &str) -> Result<WizardDraft, SiniError> {
        if let Ok(id) = DraftId::parse(identifier) {
            return self.load(id);
        }

        let wanted = identifier.trim().to_lowercase();
        let mut matches = self
            .list()?
            .into_iter()
            .filter(|d| d.id.to_string() == wanted);

        match (matches.next(), matches.next()) {
            (Some(draft), None) => Ok(draft),
            (Some(_), Some(_)) => Err(SiniError::Validation(format!(
                "Draft identifier '{}' is ambiguous",
                identifier
            ))),
            (None, _) => Err(SiniError::draft_not_found(identifier)),
        }
    }

    /// All drafts, most recently saved first
    pub fn list(&self) -> Result<Vec<WizardDraft>, SiniError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut drafts = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            drafts.push(read_json::<WizardDraft, _>(&path)?);
        }

        drafts.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(drafts)
    }

    /// Remove a draft
    pub fn delete(&self, id: DraftId) -> Result<(), SiniError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(SiniError::draft_not_found(id.to_string()));
        }
        fs::remove_file(path)?;
        debug!(draft = %id, "deleted draft");
        Ok(())
    }
}
