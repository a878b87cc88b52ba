use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::translation::SubtypeFilter;

/// Application configuration module
/// This module handles the application configuration: where definition
/// files live, which items a batch run covers, and logging.

/// Environment variable naming the definitions folder
pub const TRANSLATOR_ENV: &str = "SPSS_TRANSLATOR";

/// Subfolder of the host installation used when nothing else is configured
pub const DEFAULT_SUBFOLDER: &str = "extensions";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "pivot-translate.json";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Folder holding the definition files
    #[serde(default)]
    pub definitions_folder: Option<PathBuf>,

    /// Host installation folder, used for the default definitions location
    #[serde(default)]
    pub install_path: Option<PathBuf>,

    /// Batch scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Which part of the document a batch run covers
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessScope {
    /// Only the output of the most recent command
    #[default]
    Preceding,
    /// The entire document
    All,
}

impl std::fmt::Display for ProcessScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preceding => write!(f, "preceding"),
            Self::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for ProcessScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "preceding" => Ok(Self::Preceding),
            "all" => Ok(Self::All),
            _ => Err(anyhow!("Invalid process scope: {}", s)),
        }
    }
}

/// Batch scan settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScanConfig {
    /// Preceding command only, or the whole document
    #[serde(default)]
    pub process: ProcessScope,

    /// Translate only selected items; `process` and `subtypes` are ignored
    #[serde(default)]
    pub selected_only: bool,

    /// Table subtypes to translate, `*` for all
    #[serde(default = "default_subtypes")]
    pub subtypes: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            process: ProcessScope::default(),
            selected_only: false,
            subtypes: default_subtypes(),
        }
    }
}

impl ScanConfig {
    /// Subtype filter built from the configured names
    pub fn subtype_filter(&self) -> SubtypeFilter {
        SubtypeFilter::new(&self.subtypes)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_subtypes() -> Vec<String> {
    vec!["*".to_string()]
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Config = FileManager::read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if FileManager::file_exists(&path) {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if let Some(folder) = &self.definitions_folder {
            if folder.as_os_str().is_empty() {
                return Err(anyhow!("definitions_folder must not be empty"));
            }
        }
        if self.scan.subtypes.iter().any(|s| s.trim().is_empty()) {
            return Err(anyhow!("scan.subtypes must not contain empty names"));
        }
        Ok(())
    }
}

/// Pick the definitions folder.
///
/// Precedence: explicit folder, then the environment value, then
/// `<install>/extensions`, then `./extensions`. Trailing separators are
/// stripped from the first two.
pub fn resolve_definitions_folder(
    explicit: Option<&Path>,
    env_value: Option<&str>,
    install_path: Option<&Path>,
) -> PathBuf {
    if let Some(folder) = explicit {
        return FileManager::trim_folder(&folder.to_string_lossy());
    }
    if let Some(folder) = env_value.filter(|v| !v.is_empty()) {
        return FileManager::trim_folder(folder);
    }
    match install_path {
        Some(install) => install.join(DEFAULT_SUBFOLDER),
        None => PathBuf::from(".").join(DEFAULT_SUBFOLDER),
    }
}

/// `resolve_definitions_folder` reading the environment variable
pub fn definitions_folder_from_env(explicit: Option<&Path>, install_path: Option<&Path>) -> PathBuf {
    let env_value = std::env::var(TRANSLATOR_ENV).ok();
    resolve_definitions_folder(explicit, env_value.as_deref(), install_path)
}
