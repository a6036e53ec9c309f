//! Settings loading from YAML files
//!
//! Every field has a default, so an absent or partial config file is fine.
//! The CLI layers its flags on top of whatever is loaded here.

use crate::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Well-known location of the service manifest
pub const DEFAULT_MANIFEST_URL: &str = "https://references.taskcluster.net/manifest.json";

const CONFIG_DIR: &str = ".taskcluster-cli";

/// How the status report treats services that answer `alive: false`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    /// Report every polled service as alive or down
    #[default]
    Explicit,
    /// Report only alive services and stay silent about the rest
    SilentDown,
}

/// Runtime settings for status checks and API generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL of the service manifest
    pub manifest_url: String,

    /// Location of the endpoint cache file
    pub cache_path: PathBuf,

    /// Age after which the endpoint cache is refreshed
    pub cache_max_age_secs: u64,

    /// Deadline for a single HTTP request
    pub request_timeout_secs: u64,

    /// Deadline for a whole refresh, poll or generation cycle
    pub cycle_timeout_secs: u64,

    /// Maximum number of in-flight requests per fan-out stage
    pub concurrency: usize,

    pub report_mode: ReportMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            cache_path: default_cache_path(),
            cache_max_age_secs: 24 * 60 * 60,
            request_timeout_secs: 30,
            cycle_timeout_secs: 120,
            concurrency: 8,
            report_mode: ReportMode::Explicit,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let settings: Settings = serde_yaml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path` if given, else from the default location if that
    /// file exists, else fall back to defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(default) if default.is_file() => Self::load(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(CliError::Config("concurrency must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 || self.cycle_timeout_secs == 0 {
            return Err(CliError::Config("timeouts must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cycle_timeout(&self) -> Duration {
        Duration::from_secs(self.cycle_timeout_secs)
    }
}

fn config_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
}

/// `~/.taskcluster-cli/cmds/status/cache.json`
pub fn default_cache_path() -> PathBuf {
    config_root().join("cmds").join("status").join("cache.json")
}

/// `~/.taskcluster-cli/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.manifest_url, DEFAULT_MANIFEST_URL);
        assert_eq!(settings.cache_max_age(), Duration::from_secs(86_400));
        assert!(settings.cache_path.ends_with("cmds/status/cache.json"));
        assert_eq!(settings.report_mode, ReportMode::Explicit);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_partial_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "manifest_url: https://manifest.example/manifest.json\nconcurrency: 2\nreport_mode: silent-down"
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.manifest_url, "https://manifest.example/manifest.json");
        assert_eq!(settings.concurrency, 2);
        assert_eq!(settings.report_mode, ReportMode::SilentDown);
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "concurrency: 0").unwrap();

        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_resolve_missing_explicit_file_fails() {
        let result = Settings::resolve(Some(Path::new("/nonexistent/taskcluster.yaml")));
        assert!(result.is_err());
    }
}
