//! Conversion configuration.
//!
//! Defaults come from an optional YAML file, searched in this order:
//! an explicit path, `$GEOSTRETCH_CONFIG`, `./config/<name>`, `./<name>`,
//! then `<user config dir>/geostretch/<name>`.

mod defaults;


pub use defaults::ConvertDefaults;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StretchError};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "GEOSTRETCH_CONFIG";

/// Candidate config file names searched on disk.
const CONFIG_FILENAMES: &[&str] = &["geostretch.yml", "geostretch.yaml"];

/// Complete configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StretchConfig {
    pub defaults: ConvertDefaults,
}

impl StretchConfig {
    fn sanitize(mut self) -> (Self, Vec<String>) {
        let warnings = self.defaults.sanitize();
        (self, warnings)
    }
}

/// Loaded configuration, the file it came from, and anything worth warning about.
#[derive(Debug)]
pub struct ConfigHandle {
    pub config: StretchConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ConfigHandle {
    fn with_config(config: StretchConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }

    /// Log collected warnings and the config source.
    pub fn log_usage(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
        match &self.source {
            Some(path) => debug!("Using config {}", path.display()),
            None => debug!("Using built-in defaults"),
        }
    }
}

/// Parse a YAML config document.
pub fn parse_config(contents: &str) -> std::result::Result<StretchConfig, serde_yaml::Error> {
    serde_yaml::from_str(contents)
}

/// Load configuration from disk.
///
/// An explicit `custom_path` must exist and parse. Discovered files that fail
/// to parse are skipped with a warning.
pub fn load_config(custom_path: Option<&Path>) -> Result<ConfigHandle> {
    if let Some(path) = custom_path {
        let contents = fs::read_to_string(path).map_err(|e| {
            StretchError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = parse_config(&contents).map_err(|e| {
            StretchError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        let (config, warnings) = config.sanitize();
        return Ok(ConfigHandle::with_config(
            config,
            Some(path.to_path_buf()),
            warnings,
        ));
    }

    Ok(load_from_candidates(get_config_candidates()))
}

/// First candidate that exists and parses wins.
pub(crate) fn load_from_candidates(candidates: Vec<PathBuf>) -> ConfigHandle {
    let mut warnings = Vec::new();

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match parse_config(&contents) {
                Ok(config) => {
                    let (config, sanitize_warnings) = config.sanitize();
                    warnings.extend(sanitize_warnings);
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return ConfigHandle::with_config(config, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    ConfigHandle::with_config(StretchConfig::default(), None, warnings)
}

fn get_config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(config_dir.join("geostretch").join(name));
        }
    }

    candidates
}
