/// Validator configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "sxs.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidatorConfig {
    #[serde(default = "default_batch")]
    pub batch: BatchSettings,

    #[serde(default)]
    pub staging: StagingSettings,

    #[serde(default = "default_output")]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BatchSettings {
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Per-file limit; unset means no limit
    #[serde(default)]
    pub file_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StagingSettings {
    /// Directory for staged uploads; system temp dir when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl ValidatorConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `sxs.toml` in the working
    /// directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    fn load_from(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. SXS_BATCH__FILE_TIMEOUT_SECS
        settings = settings.add_source(
            config::Environment::with_prefix("SXS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.batch.workers == 0 {
            return Err(CliError::Config(
                "batch.workers must be at least 1".to_string(),
            ));
        }

        if self.batch.workers > sxs_audio::MAX_WORKERS {
            return Err(CliError::Config(format!(
                "batch.workers must be at most {}",
                sxs_audio::MAX_WORKERS
            )));
        }

        if self.batch.file_timeout_secs == Some(0) {
            return Err(CliError::Config(
                "batch.file_timeout_secs must be positive (omit it to disable)".to_string(),
            ));
        }

        if let Some(dir) = &self.staging.directory {
            if !dir.is_dir() {
                return Err(CliError::Config(format!(
                    "staging directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    pub fn file_timeout(&self) -> Option<Duration> {
        self.batch.file_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            batch: default_batch(),
            staging: StagingSettings::default(),
            output: default_output(),
        }
    }
}

// Default values
fn default_batch() -> BatchSettings {
    BatchSettings {
        workers: default_workers(),
        file_timeout_secs: None,
    }
}

fn default_workers() -> usize {
    num_cpus::get().max(1)
}

fn default_output() -> OutputSettings {
    OutputSettings {
        pretty: default_pretty(),
    }
}

fn default_pretty() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_are_valid() {
        let config = ValidatorConfig::default();
        assert!(config.batch.workers >= 1);
        assert_eq!(config.file_timeout(), None);
        assert!(config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_sections_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sxs.toml");
        std::fs::write(
            &path,
            format!(
                "[batch]\nworkers = 3\nfile_timeout_secs = 20\n\n[staging]\ndirectory = {:?}\n\n[output]\npretty = false\n",
                dir.path().display().to_string()
            ),
        )
        .unwrap();

        let config = ValidatorConfig::load_from(Some(&path), env(&[])).unwrap();
        assert_eq!(config.batch.workers, 3);
        assert_eq!(config.file_timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.staging.directory.as_deref(), Some(dir.path()));
        assert!(!config.output.pretty);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sxs.toml");
        std::fs::write(&path, "[batch]\nworkers = 3\n").unwrap();

        let config = ValidatorConfig::load_from(
            Some(&path),
            env(&[("SXS_BATCH__WORKERS", "7"), ("SXS_OUTPUT__PRETTY", "false")]),
        )
        .unwrap();
        assert_eq!(config.batch.workers, 7);
        assert!(!config.output.pretty);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = ValidatorConfig::load_from(Some(Path::new("/nonexistent/sxs.toml")), env(&[]))
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn rejects_zero_workers_and_timeouts() {
        let mut config = ValidatorConfig::default();
        config.batch.workers = 0;
        assert!(config.validate().is_err());

        let mut config = ValidatorConfig::default();
        config.batch.file_timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_worker_counts_beyond_the_pool_limit() {
        let mut config = ValidatorConfig::default();
        config.batch.workers = 2_305_843_009_213_693_952;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("batch.workers must be at most"));

        config.batch.workers = sxs_audio::MAX_WORKERS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_missing_staging_directory() {
        let mut config = ValidatorConfig::default();
        config.staging.directory = Some(PathBuf::from("/nonexistent/sxs-staging"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("staging directory does not exist"));
    }
}
