//! Storage layer for SINI intake
//!
//! JSON files with atomic writes for drafts, and a read-only case list for
//! the dashboards.

pub mod cases;
pub mod drafts;
pub mod file_io;

pub use cases::{CaseRepository, JsonCaseRepository};
pub use drafts::{DraftStore, WizardDraft};
pub use file_io::{read_document, read_json, write_json_atomic};

use crate::config::{SiniPaths, Settings};
use crate::error::SiniError;

/// Main storage coordinator
pub struct Storage {
    paths: SiniPaths,
    pub drafts: DraftStore,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: SiniPaths) -> Result<Self, SiniError> {
        paths.ensure_directories()?;

        Ok(Self {
            drafts: DraftStore::new(paths.drafts_dir()),
            paths,
        })
    }

    pub fn paths(&self) -> &SiniPaths {
        &self.paths
    }

    /// Case repository for the dashboards
    ///
    /// Resolution: explicit path, then the configured fixture, then
    /// `data/cases.json` if present, then the bundled demo list.
    pub fn cases(
        &self,
        settings: &Settings,
        explicit: Option<&std::path::Path>,
    ) -> Result<JsonCaseRepository, SiniError> {
        let data_file = self.paths.cases_file();
        let path = explicit
            .or(settings.cases_fixture.as_deref())
            .or_else(|| data_file.exists().then_some(data_file.as_path()));
        JsonCaseRepository::open(path)
    }
}
