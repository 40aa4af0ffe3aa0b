//! Application configuration.
//!
//! # Responsibility
//! - Resolve database and log locations from platform directories.
//! - Load optional overrides from a TOML file.
//!
//! # Invariants
//! - Every resolved path is absolute.
//! - Unknown keys in the config file are rejected.

use crate::logging::default_log_level;
use directories::ProjectDirs;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name kept from the first release so existing data is picked up.
pub const DEFAULT_DB_FILE_NAME: &str = "employee_performance.db";
pub const CONFIG_FILE_NAME: &str = "perftrack.toml";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    /// Working directory is needed to absolutize a relative path.
    NoWorkingDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::NoWorkingDir(err) => write!(f, "cannot resolve working directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::NoWorkingDir(err) => Some(err),
        }
    }
}

/// On-disk shape of `perftrack.toml`; every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl ConfigFile {
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings used at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Platform defaults, falling back to the working directory.
    pub fn defaults() -> Result<Self, ConfigError> {
        let data_dir = match project_dirs() {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            None => std::env::current_dir().map_err(ConfigError::NoWorkingDir)?,
        };
        Ok(Self {
            db_path: data_dir.join(DEFAULT_DB_FILE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
        })
    }

    /// Loads defaults, then layers `path` (or the default config file when
    /// it exists) on top.
    ///
    /// An explicitly given `path` must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::defaults()?;
        let file_path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|candidate| candidate.is_file()),
        };

        if let Some(file_path) = file_path {
            let text = std::fs::read_to_string(&file_path).map_err(|source| ConfigError::Io {
                path: file_path.clone(),
                source,
            })?;
            let file = ConfigFile::from_toml(&text, &file_path)?;
            let base = file_path.parent().unwrap_or_else(|| Path::new("."));
            config.merge(file, base)?;
        }

        Ok(config)
    }

    /// Applies file values; relative paths resolve against `base`.
    pub fn merge(&mut self, file: ConfigFile, base: &Path) -> Result<(), ConfigError> {
        if let Some(db_path) = file.db_path {
            self.db_path = absolutize(base, &db_path)?;
        }
        if let Some(log_dir) = file.log_dir {
            self.log_dir = absolutize(base, &log_dir)?;
        }
        if let Some(level) = file.log_level {
            self.log_level = level;
        }
        Ok(())
    }

    /// Overrides the database path, e.g. from a command-line flag.
    pub fn with_db_path(mut self, path: &Path) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::NoWorkingDir)?;
        self.db_path = absolutize(&cwd, path)?;
        Ok(self)
    }
}

/// Location of `perftrack.toml` in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "perftrack", "perftrack")
}

fn absolutize(base: &Path, path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    if base.is_absolute() {
        return Ok(base.join(path));
    }
    let cwd = std::env::current_dir().map_err(ConfigError::NoWorkingDir)?;
    Ok(cwd.join(base).join(path))
}
