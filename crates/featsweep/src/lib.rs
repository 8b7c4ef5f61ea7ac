//! # featsweep
//!
//! A feature-powerset build/test driver for Cargo workspaces.
//!
//! featsweep validates a crate against the on/off combinations of its
//! declared feature flags. It delegates powerset enumeration to
//! `cargo hack`, owns the exclusion-list computation, and runs each
//! mode as a fixed, deterministic sequence of cargo invocations with
//! fail-fast semantics — any single failing combination is a real
//! incompatibility that must not be masked.
//!
//! ## Pipeline
//!
//! The core flow is **discover → plan → probe → dispatch**:
//!
//! 1. [`features::load_workspace`] reads the declared feature flags of
//!    every workspace member via `cargo_metadata`.
//! 2. [`cargo::plan_invocations`] maps a [`types::CommandMode`] to its
//!    delegated cargo command sequence, applying the exclusion list.
//! 3. [`engine::run`] probes for the required cargo subcommands
//!    (`cargo hack`, `cargo nextest`, `cargo llvm-cov`), then executes
//!    the sequence in order, aborting on the first non-zero exit.
//!
//! ## Example
//!
//! ```ignore
//! use featsweep::{config::SweepConfig, engine, features, types::CommandMode};
//!
//! let ws = features::load_workspace("Cargo.toml".as_ref())?;
//! let config = SweepConfig::new(ws.workspace_root.clone());
//! let report = engine::run(CommandMode::Build, &ws.features, &config, &mut reporter)?;
//! ```
//!
//! ## Key Types
//!
//! - `CommandMode` — which action a sweep performs (build, test,
//!   nextest, doctest, coverage)
//! - `SweepConfig` — explicit configuration with documented defaults
//! - `FeatureSet` — ordered, unique feature-flag names
//! - `RunReport` / `SweepError` — outcome and fatal error taxonomy
//!
//! ## CLI Usage
//!
//! For command-line usage, see the featsweep-cli crate.

/// Delegated cargo command construction and prerequisite probes.
pub mod cargo;

/// Explicit configuration with documented defaults (`.featsweep.toml`).
pub mod config;

/// Sweep execution: probes, sequential dispatch, fail-fast abort.
pub mod engine;

/// Feature-flag discovery and exclusion handling.
pub mod features;

/// Domain types: modes, run reports, error taxonomy.
pub mod types;
