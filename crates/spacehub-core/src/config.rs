//! Shared configuration for SpaceHub.
//!
//! Settings come from `Default`, then from environment variables, which
//! may themselves be loaded from a `.env.local` file.
//!
//! # Environment Variables
//!
//! - `SPACEHUB_DATA_DIR`: Directory holding `events.json` and `content.json`
//! - `SPACEHUB_LOG`: Log filter directive used when `RUST_LOG` is unset
//! - `SPACEHUB_DEFAULT_DOCUMENT_LINK`: Link given to documents created without one
//! - `SPACEHUB_CALENDAR_MODE`: Initial calendar mode (`day` or `week`)

use std::path::{Path, PathBuf};

use spacehub_models::DEFAULT_DOCUMENT_LINK;
use spacehub_schedule::CalendarMode;
use tracing::debug;

use crate::error::{ConfigError, Result};

pub const DATA_DIR_ENV: &str = "SPACEHUB_DATA_DIR";
pub const LOG_ENV: &str = "SPACEHUB_LOG";
pub const DOCUMENT_LINK_ENV: &str = "SPACEHUB_DEFAULT_DOCUMENT_LINK";
pub const CALENDAR_MODE_ENV: &str = "SPACEHUB_CALENDAR_MODE";

/// Env file loaded by `from_env`, relative to the working directory.
pub const ENV_FILE: &str = ".env.local";

/// Default data directory name under home.
const DEFAULT_DATA_DIR: &str = ".spacehub";

const EVENTS_FILE: &str = "events.json";
const CONTENT_FILE: &str = "content.json";

/// SpaceHub settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceHubConfig {
    /// Where seed files live.
    pub data_dir: PathBuf,
    /// Explicit log filter. `None` defers to the verbosity flag.
    pub log_level: Option<String>,
    /// Link substituted for empty document links.
    pub default_document_link: String,
    /// Mode the calendar opens in.
    pub calendar_mode: CalendarMode,
}

impl Default for SpaceHubConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: None,
            default_document_link: DEFAULT_DOCUMENT_LINK.to_string(),
            calendar_mode: CalendarMode::default(),
        }
    }
}

impl SpaceHubConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `.env.local` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        if dotenvy::from_filename(ENV_FILE).is_ok() {
            debug!(file = ENV_FILE, "Loaded env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = var(LOG_ENV) {
            config.log_level = Some(level);
        }
        if let Some(link) = var(DOCUMENT_LINK_ENV) {
            config.default_document_link = link;
        }
        if let Some(mode) = var(CALENDAR_MODE_ENV) {
            config.calendar_mode = mode.parse().map_err(|_| ConfigError::InvalidValue {
                key: CALENDAR_MODE_ENV,
                value: mode,
            })?;
        }
        Ok(config)
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_default_document_link(mut self, link: impl Into<String>) -> Self {
        self.default_document_link = link.into();
        self
    }

    pub fn with_calendar_mode(mut self, mode: CalendarMode) -> Self {
        self.calendar_mode = mode;
        self
    }

    /// Path of the event seed file.
    pub fn events_file(&self) -> PathBuf {
        self.data_dir.join(EVENTS_FILE)
    }

    /// Path of the content seed file.
    pub fn content_file(&self) -> PathBuf {
        self.data_dir.join(CONTENT_FILE)
    }

    /// Log filter directive: the configured level if any, else one
    /// derived from a `-v` count.
    pub fn log_directive(&self, verbosity: u8) -> String {
        match &self.log_level {
            Some(level) => level.clone(),
            None => verbosity_level(verbosity).to_string(),
        }
    }

    /// Creates the data directory if missing.
    pub fn ensure_data_dir(&self) -> Result<()> {
        ensure_dir(&self.data_dir)
    }
}

/// `~/.spacehub`, or `.spacehub` in the working directory without a home.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_DATA_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn verbosity_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SpaceHubConfig::default();

        assert!(config.data_dir.ends_with(".spacehub"));
        assert_eq!(config.log_level, None);
        assert_eq!(config.default_document_link, DEFAULT_DOCUMENT_LINK);
        assert_eq!(config.calendar_mode, CalendarMode::Week);
    }

    #[test]
    fn test_config_builder() {
        let config = SpaceHubConfig::new()
            .with_data_dir("/tmp/spacehub")
            .with_log_level("debug")
            .with_default_document_link("https://example.com/doc.pdf")
            .with_calendar_mode(CalendarMode::Day);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/spacehub"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.default_document_link, "https://example.com/doc.pdf");
        assert_eq!(config.calendar_mode, CalendarMode::Day);
    }

    #[test]
    fn test_from_lookup_reads_vars() {
        let config = SpaceHubConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/srv/spacehub"),
            (LOG_ENV, "spacehub_content=debug"),
            (DOCUMENT_LINK_ENV, "https://example.com/x.pdf"),
            (CALENDAR_MODE_ENV, "Day"),
        ]))
        .unwrap();

        assert_eq!(config.events_file(), PathBuf::from("/srv/spacehub/events.json"));
        assert_eq!(config.content_file(), PathBuf::from("/srv/spacehub/content.json"));
        assert_eq!(config.log_level.as_deref(), Some("spacehub_content=debug"));
        assert_eq!(config.default_document_link, "https://example.com/x.pdf");
        assert_eq!(config.calendar_mode, CalendarMode::Day);
    }

    #[test]
    fn test_from_lookup_blank_vars_keep_defaults() {
        let config = SpaceHubConfig::from_lookup(lookup(&[
            (DOCUMENT_LINK_ENV, "  "),
            (LOG_ENV, ""),
        ]))
        .unwrap();

        assert_eq!(config, SpaceHubConfig::default());
    }

    #[test]
    fn test_from_lookup_rejects_bad_mode() {
        let result = SpaceHubConfig::from_lookup(lookup(&[(CALENDAR_MODE_ENV, "month")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: CALENDAR_MODE_ENV, .. })
        ));
    }

    #[test]
    fn test_log_directive() {
        let config = SpaceHubConfig::default();
        assert_eq!(config.log_directive(0), "warn");
        assert_eq!(config.log_directive(2), "debug");
        assert_eq!(config.log_directive(9), "trace");

        let config = config.with_log_level("info");
        assert_eq!(config.log_directive(3), "info");
    }

    #[test]
    fn test_ensure_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = SpaceHubConfig::new().with_data_dir(dir.path().join("nested/data"));

        config.ensure_data_dir().unwrap();
        assert!(config.data_dir.is_dir());
        // idempotent
        config.ensure_data_dir().unwrap();
    }
}
