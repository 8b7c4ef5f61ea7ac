//! Delegated cargo command construction.
//!
//! Each [`CommandMode`] maps to a fixed, deterministic sequence of
//! cargo invocations. Nothing here spawns processes; the engine does
//! that, so the argument vectors stay trivially testable.

use crate::config::SweepConfig;
use crate::features;
use crate::types::CommandMode;

/// One planned cargo invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Human-readable command line for diagnostics.
    pub fn render(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(arg);
        }
        out
    }
}

/// A cargo subcommand that must be installed before a mode can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prerequisite {
    /// Display name, e.g. `cargo hack`.
    pub tool: String,
    /// Arguments of the capability probe (after any toolchain selector).
    pub probe_args: Vec<String>,
    /// Remediation command shown when the probe fails.
    pub install: String,
}

fn prerequisite(subcommand: &str, package: &str) -> Prerequisite {
    Prerequisite {
        tool: format!("cargo {subcommand}"),
        probe_args: vec![subcommand.to_string(), "--version".to_string()],
        install: format!("cargo install {package} --locked"),
    }
}

/// The cargo subcommands a mode depends on, probed before any
/// enumeration begins.
pub fn prerequisites(mode: CommandMode) -> Vec<Prerequisite> {
    match mode {
        CommandMode::Build | CommandMode::Test => vec![prerequisite("hack", "cargo-hack")],
        CommandMode::Nextest => vec![
            prerequisite("hack", "cargo-hack"),
            prerequisite("nextest", "cargo-nextest"),
        ],
        CommandMode::Doctest => Vec::new(),
        CommandMode::Coverage => vec![prerequisite("llvm-cov", "cargo-llvm-cov")],
    }
}

/// Plan the invocation sequence for one mode.
///
/// Powerset modes pass `--exclude-features` only when the exclusion
/// list is non-empty; an empty list must not produce a dangling flag.
pub fn plan_invocations(mode: CommandMode, config: &SweepConfig) -> Vec<Invocation> {
    match mode {
        CommandMode::Build => vec![
            powerset(config, &["build"]),
            powerset(config, &["build", "--all-targets"]),
        ],
        CommandMode::Test => vec![powerset(config, &["test", "--all-targets"])],
        CommandMode::Nextest => vec![powerset(config, &["nextest", "run", "--all-targets"])],
        CommandMode::Doctest => vec![invocation(
            config,
            &["test", "--doc", "--all-features"],
        )],
        CommandMode::Coverage => vec![
            invocation(
                config,
                &[
                    "llvm-cov",
                    "--all-features",
                    "--all-targets",
                    "--lcov",
                    "--output-path",
                    config.coverage.lcov.as_str(),
                ],
            ),
            invocation(
                config,
                &[
                    "llvm-cov",
                    "--doc",
                    "--all-features",
                    "--lcov",
                    "--output-path",
                    config.coverage.lcov_doctest.as_str(),
                ],
            ),
        ],
    }
}

/// The capability probe for one prerequisite, with toolchain selectors
/// applied the same way as the real invocations.
pub fn probe_invocation(config: &SweepConfig, prereq: &Prerequisite) -> Invocation {
    let probe_args: Vec<&str> = prereq.probe_args.iter().map(String::as_str).collect();
    invocation(config, &probe_args)
}

fn invocation(config: &SweepConfig, args: &[&str]) -> Invocation {
    let mut all: Vec<String> = config.toolchain.clone();
    all.extend(args.iter().map(|s| s.to_string()));
    Invocation {
        program: config.cargo_bin.clone(),
        args: all,
    }
}

fn powerset(config: &SweepConfig, hack_args: &[&str]) -> Invocation {
    let mut args: Vec<&str> = vec!["hack"];
    args.extend_from_slice(hack_args);
    args.push("--feature-powerset");

    let excluded = features::exclusion_arg(&config.excluded_features);
    let mut inv = invocation(config, &args);
    if !excluded.is_empty() {
        inv.args.push("--exclude-features".to_string());
        inv.args.push(excluded);
    }
    inv
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config() -> SweepConfig {
        SweepConfig {
            workspace_root: PathBuf::from("."),
            cargo_bin: "cargo".to_string(),
            excluded_features: vec!["internal-docs".to_string()],
            toolchain: Vec::new(),
            coverage: crate::config::CoverageOutputs::default(),
        }
    }

    #[test]
    fn build_mode_plans_powerset_build_then_all_targets() {
        let invs = plan_invocations(CommandMode::Build, &config());
        assert_eq!(invs.len(), 2);
        assert_eq!(
            invs[0].render(),
            "cargo hack build --feature-powerset --exclude-features internal-docs"
        );
        assert_eq!(
            invs[1].render(),
            "cargo hack build --all-targets --feature-powerset --exclude-features internal-docs"
        );
    }

    #[test]
    fn test_mode_covers_all_target_kinds() {
        let invs = plan_invocations(CommandMode::Test, &config());
        assert_eq!(invs.len(), 1);
        assert_eq!(
            invs[0].render(),
            "cargo hack test --all-targets --feature-powerset --exclude-features internal-docs"
        );
    }

    #[test]
    fn nextest_mode_uses_the_alternate_runner() {
        let invs = plan_invocations(CommandMode::Nextest, &config());
        assert_eq!(invs.len(), 1);
        assert_eq!(
            invs[0].render(),
            "cargo hack nextest run --all-targets --feature-powerset --exclude-features internal-docs"
        );
    }

    #[test]
    fn doctest_mode_runs_once_with_all_features() {
        let invs = plan_invocations(CommandMode::Doctest, &config());
        assert_eq!(invs.len(), 1);
        assert_eq!(invs[0].render(), "cargo test --doc --all-features");
    }

    #[test]
    fn coverage_mode_plans_two_reports() {
        let invs = plan_invocations(CommandMode::Coverage, &config());
        assert_eq!(invs.len(), 2);
        assert_eq!(
            invs[0].render(),
            "cargo llvm-cov --all-features --all-targets --lcov --output-path lcov.info"
        );
        assert_eq!(
            invs[1].render(),
            "cargo llvm-cov --doc --all-features --lcov --output-path lcov-doctest.info"
        );
    }

    #[test]
    fn empty_exclusion_list_omits_the_flag_entirely() {
        let mut cfg = config();
        cfg.excluded_features.clear();

        for inv in plan_invocations(CommandMode::Build, &cfg) {
            assert!(!inv.render().contains("--exclude-features"));
            assert!(!inv.render().contains(','));
        }
    }

    #[test]
    fn multiple_exclusions_are_one_comma_joined_value() {
        let mut cfg = config();
        cfg.excluded_features = vec!["internal-docs".to_string(), "unstable".to_string()];

        let invs = plan_invocations(CommandMode::Test, &cfg);
        let pos = invs[0]
            .args
            .iter()
            .position(|a| a == "--exclude-features")
            .expect("flag present");
        assert_eq!(invs[0].args[pos + 1], "internal-docs,unstable");
    }

    #[test]
    fn toolchain_selectors_are_prepended_verbatim() {
        let mut cfg = config();
        cfg.toolchain = vec!["+nightly".to_string()];

        let invs = plan_invocations(CommandMode::Build, &cfg);
        assert!(invs[0].render().starts_with("cargo +nightly hack build"));

        let probe = probe_invocation(&cfg, &prerequisites(CommandMode::Build)[0]);
        assert_eq!(probe.render(), "cargo +nightly hack --version");
    }

    #[test]
    fn prerequisites_match_the_mode() {
        assert_eq!(prerequisites(CommandMode::Build).len(), 1);
        assert_eq!(prerequisites(CommandMode::Build)[0].tool, "cargo hack");
        assert_eq!(
            prerequisites(CommandMode::Build)[0].install,
            "cargo install cargo-hack --locked"
        );

        let nt = prerequisites(CommandMode::Nextest);
        assert_eq!(nt.len(), 2);
        assert_eq!(nt[1].tool, "cargo nextest");

        assert!(prerequisites(CommandMode::Doctest).is_empty());

        let cov = prerequisites(CommandMode::Coverage);
        assert_eq!(cov.len(), 1);
        assert_eq!(cov[0].install, "cargo install cargo-llvm-cov --locked");
    }

    #[test]
    fn custom_cargo_bin_is_used_for_every_invocation() {
        let mut cfg = config();
        cfg.cargo_bin = "/opt/bin/cargo".to_string();

        for mode in [
            CommandMode::Build,
            CommandMode::Test,
            CommandMode::Nextest,
            CommandMode::Doctest,
            CommandMode::Coverage,
        ] {
            for inv in plan_invocations(mode, &cfg) {
                assert_eq!(inv.program, "/opt/bin/cargo");
            }
        }
    }
}
