//! Console configuration: RON file, then environment, then command line.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::LogDestination;
use leadgen_core::DEFAULT_PER_PAGE;
use leadgen_engine::ApiSettings;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::cli::Args;

pub const DEFAULT_CONFIG_PATH: &str = "./leadgen.ron";
pub const API_URL_ENV: &str = "LEADGEN_API_URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("per_page must be at least 1")]
    InvalidPerPage,
    #[error("base_url must not be empty")]
    EmptyBaseUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub per_page: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogTarget,
    pub log_level: LogLevel,
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            per_page: DEFAULT_PER_PAGE,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            log_destination: LogTarget::File,
            log_level: LogLevel::Info,
            log_path: PathBuf::from("./leadgen.log"),
        }
    }
}

impl AppConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = Self::load(&args.config)?;
        config.apply_overrides(std::env::var(API_URL_ENV).ok(), args);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, env_url: Option<String>, args: &Args) {
        if let Some(url) = env_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(url) = &args.base_url {
            self.base_url = url.clone();
        }
        if let Some(per_page) = args.per_page {
            self.per_page = per_page;
        }
        if let Some(target) = args.log {
            self.log_destination = target;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.per_page == 0 {
            return Err(ConfigError::InvalidPerPage);
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(())
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.trim().to_string(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(config: PathBuf) -> Args {
        Args {
            config,
            base_url: None,
            per_page: None,
            log: None,
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.per_page, 25);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leadgen.ron");
        fs::write(
            &path,
            r#"(base_url: "http://dashboard:8080", log_level: Debug)"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.base_url, "http://dashboard:8080");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.log_destination, LogTarget::File);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leadgen.ron");
        fs::write(&path, "(per_page: \"many\")").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn command_line_beats_environment() {
        let mut config = AppConfig::default();
        let mut cli = args(PathBuf::from(DEFAULT_CONFIG_PATH));
        config.apply_overrides(Some("http://from-env:5000".into()), &cli);
        assert_eq!(config.base_url, "http://from-env:5000");

        cli.base_url = Some("http://from-cli:5000".into());
        cli.per_page = Some(50);
        cli.log = Some(LogTarget::Both);
        config.apply_overrides(Some("http://from-env:5000".into()), &cli);
        assert_eq!(config.base_url, "http://from-cli:5000");
        assert_eq!(config.per_page, 50);
        assert_eq!(config.log_destination, LogTarget::Both);
    }

    #[test]
    fn zero_per_page_is_rejected() {
        let config = AppConfig {
            per_page: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPerPage)));
    }
}
