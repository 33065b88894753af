//! Host settings.
//!
//! Loaded from environment variables. The CLI overrides individual fields
//! from its flags after loading.

use std::ffi::OsString;
use std::path::PathBuf;

use strum::{AsRefStr, EnumString, VariantNames};

/// Largest file the built-in tools will read, unless overridden.
pub const DEFAULT_MAX_READ_BYTES: u64 = 1024 * 1024;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Project roots opened at startup.
    pub projects: Vec<PathBuf>,
    pub log_format: LogFormat,
    /// Files larger than this are rejected by `read_file` and skipped by
    /// `search_text`.
    pub max_read_bytes: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            log_format: LogFormat::Text,
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// Variables:
    /// - `ARGSPEC_PROJECTS`: project roots, separated like `PATH` (default: none)
    /// - `ARGSPEC_LOG_FORMAT`: `text` or `json` (default: `text`)
    /// - `ARGSPEC_MAX_READ_BYTES`: positive byte count (default: 1 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var_os(var))
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(raw) = lookup("ARGSPEC_PROJECTS") {
            settings.projects = std::env::split_paths(&raw)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }

        if let Some(raw) = lookup("ARGSPEC_LOG_FORMAT") {
            let raw = utf8("ARGSPEC_LOG_FORMAT", raw)?;
            settings.log_format = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "ARGSPEC_LOG_FORMAT",
                value: raw.clone(),
                expected: format!("one of: {}", LogFormat::VARIANTS.join(", ")),
            })?;
        }

        if let Some(raw) = lookup("ARGSPEC_MAX_READ_BYTES") {
            let raw = utf8("ARGSPEC_MAX_READ_BYTES", raw)?;
            settings.max_read_bytes = match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "ARGSPEC_MAX_READ_BYTES",
                        value: raw,
                        expected: "a positive integer".to_string(),
                    })
                }
            };
        }

        Ok(settings)
    }
}

fn utf8(var: &'static str, raw: OsString) -> Result<String, ConfigError> {
    raw.into_string().map_err(|_| ConfigError::NotUnicode(var))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not valid unicode")]
    NotUnicode(&'static str),
    #[error("invalid value {value:?} for {var}: expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: String,
    },
}
