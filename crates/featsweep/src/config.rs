//! Configuration file support for featsweep (.featsweep.toml)
//!
//! All configuration is an explicit structure passed into the engine,
//! with documented defaults; a `.featsweep.toml` in the workspace root
//! can override the exclusion list and coverage artifact names.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Feature flags excluded from powerset enumeration by default.
///
/// `internal-docs` exists only to gate doc-internal items and is never
/// worth toggling through the combination space.
pub const DEFAULT_EXCLUDED_FEATURES: &[&str] = &["internal-docs"];

/// Environment variable overriding the cargo executable name.
pub const CARGO_BIN_ENV: &str = "FEATSWEEP_CARGO_BIN";

/// Fixed-name coverage report artifacts, written to the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageOutputs {
    /// LCOV report for the all-targets test run.
    #[serde(default = "default_lcov")]
    pub lcov: String,
    /// LCOV report for the doctest run.
    #[serde(default = "default_lcov_doctest", rename = "lcov-doctest")]
    pub lcov_doctest: String,
}

impl Default for CoverageOutputs {
    fn default() -> Self {
        Self {
            lcov: default_lcov(),
            lcov_doctest: default_lcov_doctest(),
        }
    }
}

fn default_lcov() -> String {
    "lcov.info".to_string()
}

fn default_lcov_doctest() -> String {
    "lcov-doctest.info".to_string()
}

/// Everything the sweep engine needs to know, resolved up front.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Workspace root; delegated commands run here and coverage
    /// artifacts land here.
    pub workspace_root: PathBuf,
    /// Cargo executable name, overridable via `FEATSWEEP_CARGO_BIN`.
    pub cargo_bin: String,
    /// Feature names never toggled during enumeration.
    pub excluded_features: Vec<String>,
    /// Toolchain selector tokens (`+nightly` etc.) prepended verbatim
    /// to every cargo invocation.
    pub toolchain: Vec<String>,
    pub coverage: CoverageOutputs,
}

impl SweepConfig {
    /// Defaults for a workspace root: cargo from the environment
    /// override (or `cargo`), the reference exclusion list, no
    /// toolchain selectors.
    pub fn new(workspace_root: PathBuf) -> Self {
        Self {
            workspace_root,
            cargo_bin: cargo_program(),
            excluded_features: DEFAULT_EXCLUDED_FEATURES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            toolchain: Vec::new(),
            coverage: CoverageOutputs::default(),
        }
    }

    /// Apply a loaded config file on top of the defaults.
    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(exclude) = file.features.exclude {
            self.excluded_features = exclude;
        }
        if let Some(coverage) = file.coverage {
            self.coverage = coverage;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.cargo_bin.trim().is_empty() {
            bail!("cargo executable name cannot be empty");
        }

        for name in &self.excluded_features {
            if name.trim().is_empty() {
                bail!("excluded feature names cannot be empty");
            }
        }

        let mut seen: Vec<&String> = Vec::new();
        for name in &self.excluded_features {
            if seen.contains(&name) {
                bail!("duplicate excluded feature: {name}");
            }
            seen.push(name);
        }

        if self.coverage.lcov.trim().is_empty() || self.coverage.lcov_doctest.trim().is_empty() {
            bail!("coverage artifact names cannot be empty");
        }
        if self.coverage.lcov == self.coverage.lcov_doctest {
            bail!("coverage artifact names must be distinct");
        }

        Ok(())
    }
}

/// Configuration loaded from .featsweep.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub features: FeaturesSection,
    #[serde(default)]
    pub coverage: Option<CoverageOutputs>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturesSection {
    /// Replaces the default exclusion list when present.
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

impl FileConfig {
    /// Load configuration from the workspace root.
    ///
    /// Returns `Ok(None)` if no config file exists.
    pub fn load_from_workspace(workspace_root: &Path) -> Result<Option<Self>> {
        let config_path = workspace_root.join(".featsweep.toml");
        if !config_path.exists() {
            return Ok(None);
        }
        Self::load_from_file(&config_path).map(Some)
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

/// Cargo executable name, honoring the environment override.
pub fn cargo_program() -> String {
    env::var(CARGO_BIN_ENV).unwrap_or_else(|_| "cargo".to_string())
}
