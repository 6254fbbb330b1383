use std::fs;
use std::path::{Path, PathBuf};

use matchings_core::errors::ErrorInfo;
use matchings_core::MatchingsError;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;

/// Structured manifest describing a completed chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Configuration used for the run.
    pub config: RunConfig,
    /// Master seed the chain stream was derived from.
    pub master_seed: u64,
    /// Optional seed label captured from the configuration.
    pub seed_label: Option<String>,
    /// Canonical hash of the terminal state.
    pub state_hash: String,
    /// Proposals issued, burn-in included.
    pub proposed: usize,
    /// Proposals accepted, burn-in included.
    pub accepted: usize,
    /// Metrics file produced during the run (relative to run directory).
    pub metrics_file: Option<PathBuf>,
}

impl RunManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), MatchingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                MatchingsError::Serde(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            MatchingsError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            MatchingsError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, MatchingsError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            MatchingsError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            MatchingsError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display()),
            )
        })
    }
}
