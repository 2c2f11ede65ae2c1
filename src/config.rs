//! Application configuration management.
//!
//! Settings are layered with figment: built-in defaults, then a TOML file,
//! then `OSBA_*` environment variables (nested keys separated by `__`, e.g.
//! `OSBA_SCANNER__MATCH_MODE=containment`). CLI flags are applied last by
//! the binaries.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::scanner::MatchMode;
use crate::session::{SENTINEL_MARKER, SENTINEL_SEPARATOR};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "OSBA_";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
}

/// Settings for the business application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File name of the session document, always in the working directory.
    pub data_file_name: String,
    /// File name of the session log inside `--logpath`.
    pub log_file_name: String,
    /// Logger name written into each log line.
    pub logger_name: String,
    /// Lower bound of the number of records generated on `start`.
    pub seed_min: usize,
    /// Upper bound of the number of records generated on `start`.
    pub seed_max: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_file_name: "osba_data_file.dat".to_string(),
            log_file_name: "osba_log_file.txt".to_string(),
            logger_name: "root".to_string(),
            seed_min: 40,
            seed_max: 250,
        }
    }
}

impl SessionConfig {
    /// Range of seeded records. An inverted range collapses to `seed_min`.
    #[must_use]
    pub fn seed_range(&self) -> RangeInclusive<usize> {
        self.seed_min..=self.seed_max.max(self.seed_min)
    }

    /// Whether `logger_name` is safe to embed in every log line.
    ///
    /// A name holding the sentinel marker or separator, or a line break,
    /// would let an ordinary log line be read back as the sentinel.
    #[must_use]
    pub fn has_valid_logger_name(&self) -> bool {
        !self.logger_name.contains(SENTINEL_MARKER)
            && !self.logger_name.contains(SENTINEL_SEPARATOR)
            && !self.logger_name.contains(['\n', '\r'])
    }
}

/// Settings for the PII scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// File holding the name text, relative to the working directory.
    pub name_file: PathBuf,
    /// Directory tree to scan.
    pub source_dir: PathBuf,
    /// Report file that matches are appended to.
    pub report_file: PathBuf,
    pub match_mode: MatchMode,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            name_file: PathBuf::from(".NAME"),
            source_dir: PathBuf::from("/mnt/nfs/rockyheights"),
            report_file: PathBuf::from("BREACH---PII_matched_data.txt"),
            match_mode: MatchMode::default(),
        }
    }
}

impl Config {
    /// Load from `path` if given, otherwise from the platform config path.
    ///
    /// Never fails: problems are logged and defaults are used.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::load_from_path(p),
            None => match Self::config_path() {
                Ok(p) => Self::load_from_path(&p),
                Err(e) => {
                    log::debug!("No config directory available, using defaults: {}", e);
                    Self::from_figment(Self::figment(None))
                }
            },
        }
    }

    /// Load from a specific TOML file plus environment overrides.
    ///
    /// A missing file is not an error; the remaining layers still apply.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("Config file {} not found", path.display());
        }
        Self::from_figment(Self::figment(Some(path)))
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(p) = path {
            figment = figment.merge(Toml::file(p));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn from_figment(figment: Figment) -> Self {
        match figment.extract::<Config>() {
            Ok(mut config) => {
                if !config.session.has_valid_logger_name() {
                    log::warn!(
                        "Invalid logger_name {:?}, using {:?}",
                        config.session.logger_name,
                        SessionConfig::default().logger_name
                    );
                    config.session.logger_name = SessionConfig::default().logger_name;
                }
                config
            }
            Err(e) => {
                log::warn!("Invalid configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Default platform-specific configuration path.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "osba", "osba")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Render as TOML, e.g. to seed a config file.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
