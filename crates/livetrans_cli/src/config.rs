//! Configuration for the terminal front-end.
//!
//! Read from a RON file (every field optional), then overridden by command
//! line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use livetrans_core::CoordinatorSettings;
use livetrans_engine::ClientSettings;
use livetrans_logging::{LogDestination, LogSettings};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "livetrans.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub target_lang: String,
    pub debounce_ms: u64,
    pub status_clear_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        let coordinator = CoordinatorSettings::default();
        Self {
            base_url: client.base_url,
            target_lang: coordinator.target_lang,
            debounce_ms: duration_ms(coordinator.debounce),
            status_clear_ms: duration_ms(coordinator.status_clear),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            log_level: "info".to_string(),
            log_destination: LogDestination::Terminal,
            log_file: LogSettings::default().file,
        }
    }
}

impl AppConfig {
    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] if present, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(lang) = &cli.lang {
            self.target_lang = lang.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn coordinator_settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            status_clear: Duration::from_millis(self.status_clear_ms),
            target_lang: self.target_lang.clone(),
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn log_settings(&self) -> Result<LogSettings, ConfigError> {
        let level = self
            .log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))?;
        Ok(LogSettings {
            level,
            destination: self.log_destination,
            file: self.log_file.clone(),
        })
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_coordinator_timing() {
        let config = AppConfig::default();
        let settings = config.coordinator_settings();

        assert_eq!(settings.debounce, Duration::from_millis(800));
        assert_eq!(settings.status_clear, Duration::from_millis(2000));
        assert_eq!(settings.target_lang, "English");
        assert_eq!(config.client_settings().base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("livetrans.ron");
        fs::write(
            &path,
            r#"(
                base_url: "https://translate.example.com",
                target_lang: "Spanish",
                debounce_ms: 300,
                log_destination: Both,
            )"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();

        assert_eq!(config.base_url, "https://translate.example.com");
        assert_eq!(config.target_lang, "Spanish");
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.status_clear_ms, 2000);
        assert_eq!(config.log_destination, LogDestination::Both);
    }

    #[test]
    fn unreadable_and_malformed_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ron");
        assert!(matches!(
            AppConfig::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.ron");
        fs::write(&broken, "(debounce_ms: \"soon\")").unwrap();
        assert!(matches!(
            AppConfig::from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn command_line_overrides_file_values() {
        let mut config = AppConfig {
            target_lang: "Spanish".to_string(),
            ..AppConfig::default()
        };
        let cli = Cli::parse_from([
            "livetrans",
            "--lang",
            "German",
            "--base-url",
            "http://localhost:8080",
            "--log-level",
            "debug",
        ]);

        config.apply_overrides(&cli);

        assert_eq!(config.target_lang, "German");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.log_settings().unwrap().level, LevelFilter::Debug);
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let config = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.log_settings(),
            Err(ConfigError::InvalidLogLevel(level)) if level == "loud"
        ));
    }
}
