//! Feature-flag discovery via `cargo_metadata` and exclusion handling.
//!
//! Powerset enumeration itself is delegated to `cargo hack`; this
//! module owns what the driver is responsible for: knowing which
//! features the workspace declares, applying the exclusion list as a
//! set difference, and rendering the `--exclude-features` argument.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cargo_metadata::MetadataCommand;

/// Ordered sequence of unique feature-flag names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    names: Vec<String>,
}

impl FeatureSet {
    /// Build a set from raw names, deduplicating while preserving the
    /// first occurrence's position.
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            if !out.contains(&name) {
                out.push(name);
            }
        }
        Self { names: out }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Set difference: the features that remain toggleable once the
    /// exclusion list is applied. Order is preserved.
    pub fn minus(&self, excluded: &[String]) -> FeatureSet {
        FeatureSet {
            names: self
                .names
                .iter()
                .filter(|n| !excluded.contains(n))
                .cloned()
                .collect(),
        }
    }

    /// Size of the conceptual combination space (`2^n`), saturating
    /// for absurdly feature-rich workspaces.
    pub fn combination_count(&self) -> u128 {
        if self.names.len() >= 128 {
            u128::MAX
        } else {
            1u128 << self.names.len()
        }
    }
}

/// Workspace metadata relevant to a sweep.
#[derive(Debug, Clone)]
pub struct WorkspaceFeatures {
    pub workspace_root: PathBuf,
    pub features: FeatureSet,
}

/// Read the declared feature flags for every workspace member.
///
/// Features are unioned across members and sorted, so the set is
/// stable regardless of member ordering in the workspace manifest.
pub fn load_workspace(manifest_path: &Path) -> Result<WorkspaceFeatures> {
    let metadata = MetadataCommand::new()
        .manifest_path(manifest_path)
        .no_deps()
        .exec()
        .with_context(|| format!("failed to read cargo metadata from {}", manifest_path.display()))?;

    let mut names: Vec<String> = metadata
        .workspace_packages()
        .iter()
        .flat_map(|p| p.features.keys().cloned())
        .collect();
    names.sort();
    names.dedup();

    Ok(WorkspaceFeatures {
        workspace_root: metadata.workspace_root.into_std_path_buf(),
        features: FeatureSet { names },
    })
}

/// Render the exclusion list as the comma-joined argument value passed
/// to `cargo hack --exclude-features`.
///
/// An empty list renders as the empty string; callers must then omit
/// the flag entirely rather than pass a malformed argument.
pub fn exclusion_arg(excluded: &[String]) -> String {
    excluded.join(",")
}
