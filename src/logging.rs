//! Diagnostic logging
//!
//! Logs go to stderr so payloads printed on stdout stay machine readable.
//! `SINI_LOG` takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

use crate::error::SiniError;

/// Environment variable holding a log filter directive
pub const LOG_ENV: &str = "SINI_LOG";

/// Build the filter from `SINI_LOG`, falling back to `level`
pub fn filter(level: &str) -> Result<EnvFilter, SiniError> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|e| {
            SiniError::Config(format!("Invalid log level '{}': {}", level, e))
        }),
    }
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second subscriber is dropped.
pub fn init(level: &str) -> Result<(), SiniError> {
    let env_filter = filter(level)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_rejected() {
        if std::env::var(LOG_ENV).is_ok() {
            return;
        }
        assert!(matches!(filter("info,=[bad"), Err(SiniError::Config(_))));
    }

    #[test]
    fn test_init_twice_is_ok() {
        assert!(init("warn").is_ok());
        assert!(init("debug").is_ok());
    }
}
