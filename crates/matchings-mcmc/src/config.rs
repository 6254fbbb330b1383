use std::fs;
use std::path::{Path, PathBuf};

use matchings_core::errors::ErrorInfo;
use matchings_core::MatchingsError;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing a single chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of recorded-phase steps to execute after burn-in.
    pub sweeps: usize,
    /// Number of initial steps excluded from visit statistics.
    #[serde(default)]
    pub burn_in: usize,
    /// Interval at which post burn-in states are recorded.
    #[serde(default = "default_thinning")]
    pub thinning: usize,
    /// Master seed and label.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Output directory configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_thinning() -> usize {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sweeps: 1_000,
            burn_in: 0,
            thinning: default_thinning(),
            seed_policy: SeedPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl RunConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MatchingsError> {
        let config: RunConfig = serde_yaml::from_str(yaml).map_err(|err| {
            MatchingsError::Config(ErrorInfo::new("config-parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML file.
    pub fn load(path: &Path) -> Result<Self, MatchingsError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            MatchingsError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, MatchingsError> {
        serde_yaml::to_string(self).map_err(|err| {
            MatchingsError::Serde(ErrorInfo::new("config-serialize", err.to_string()))
        })
    }

    /// Rejects configurations that cannot drive a chain.
    pub fn validate(&self) -> Result<(), MatchingsError> {
        if self.sweeps == 0 {
            return Err(MatchingsError::Config(
                ErrorInfo::new("zero-sweeps", "sweeps must be positive")
                    .with_hint("set sweeps to the number of recorded steps"),
            ));
        }
        if self.thinning == 0 {
            return Err(MatchingsError::Config(
                ErrorInfo::new("zero-thinning", "thinning must be positive")
                    .with_hint("use thinning: 1 to record every step"),
            ));
        }
        if self.burn_in.checked_add(self.sweeps).is_none() {
            return Err(MatchingsError::Config(
                ErrorInfo::new("step-count-overflow", "burn_in + sweeps overflows usize")
                    .with_context("burn_in", self.burn_in)
                    .with_context("sweeps", self.sweeps),
            ));
        }
        Ok(())
    }

    /// Returns the configuration with its master seed replaced.
    pub fn with_master_seed(mut self, master_seed: u64) -> Self {
        self.seed_policy.master_seed = master_seed;
        self
    }

    /// Total number of steps including burn-in. Saturates on configs that
    /// [`RunConfig::validate`] rejects.
    pub fn total_steps(&self) -> usize {
        self.burn_in.saturating_add(self.sweeps)
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x5EED_0F_4A7C_11E5_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Output directory layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for run artefacts. Nothing is written when unset.
    #[serde(default)]
    pub run_directory: Option<PathBuf>,
    /// Metrics filename relative to `run_directory`.
    #[serde(default = "default_metrics_filename")]
    pub metrics_file: PathBuf,
    /// Manifest filename relative to `run_directory`.
    #[serde(default = "default_manifest_filename")]
    pub manifest_file: PathBuf,
}

fn default_metrics_filename() -> PathBuf {
    PathBuf::from("metrics.csv")
}

fn default_manifest_filename() -> PathBuf {
    PathBuf::from("manifest.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            run_directory: None,
            metrics_file: default_metrics_filename(),
            manifest_file: default_manifest_filename(),
        }
    }
}
