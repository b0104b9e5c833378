//! Path management for SINI intake
//!
//! ## Path Resolution Order
//!
//! 1. `SINI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory plus `sini` (`~/.config/sini` on Linux,
//!    `%APPDATA%\sini` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::SiniError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SINI_DATA_DIR";

/// Manages all paths used by SINI intake
#[derive(Debug, Clone)]
pub struct SiniPaths {
    base_dir: PathBuf,
}

impl SiniPaths {
    /// Resolve the base directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and
    /// `SINI_DATA_DIR` is not set.
    pub fn new() -> Result<Self, SiniError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SiniPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the directory holding saved wizard drafts
    pub fn drafts_dir(&self) -> PathBuf {
        self.data_dir().join("drafts")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default location of the dashboard case list
    pub fn cases_file(&self) -> PathBuf {
        self.data_dir().join("cases.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), SiniError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SiniError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.drafts_dir())
            .map_err(|e| SiniError::Io(format!("Failed to create drafts directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SiniError> {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("sini"))
        .ok_or_else(|| SiniError::Config("Could not determine home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SiniPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(
            paths.drafts_dir(),
            temp_dir.path().join("data").join("drafts")
        );
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);
        let paths = SiniPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SiniPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.drafts_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SiniPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.cases_file(),
            temp_dir.path().join("data").join("cases.json")
        );
    }
}
