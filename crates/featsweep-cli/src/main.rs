use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use featsweep::config::{FileConfig, SweepConfig};
use featsweep::engine::{self, Reporter};
use featsweep::features;
use featsweep::types::{CommandMode, SweepError};

#[derive(Parser, Debug)]
#[command(name = "featsweep", version)]
#[command(about = "Feature-powerset build/test driver for Cargo workspaces")]
#[command(after_help = "\
TASKS:
  b,  build    powerset build, then powerset build --all-targets
  t,  test     powerset test across all target kinds
  nt, nextest  powerset test via cargo-nextest
  dt, doctest  doctests once, with all features enabled
  coverage     lcov reports for all-targets tests and doctests

Tokens starting with `+` (e.g. `+nightly`) select the toolchain and are
passed through to every cargo invocation. Tasks run in the order given;
the first failure aborts everything still pending.")]
struct Cli {
    /// Path to the workspace Cargo.toml
    #[arg(long, default_value = "Cargo.toml")]
    manifest_path: PathBuf,

    /// Tasks to run, in order (see TASKS below)
    #[arg(value_name = "TASK")]
    tokens: Vec<String>,
}

struct CliReporter;

impl Reporter for CliReporter {
    fn info(&mut self, msg: &str) {
        eprintln!("[info] {msg}");
    }

    fn warn(&mut self, msg: &str) {
        eprintln!("[warn] {msg}");
    }

    fn error(&mut self, msg: &str) {
        eprintln!("[error] {msg}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Resolve the whole token list before anything runs, so a trailing
    // unknown token is caught before any earlier valid task starts.
    let mut toolchain: Vec<String> = Vec::new();
    let mut modes: Vec<CommandMode> = Vec::new();
    for token in &cli.tokens {
        if token.starts_with('+') {
            toolchain.push(token.clone());
            continue;
        }
        match CommandMode::from_token(token) {
            Some(mode) => modes.push(mode),
            None => {
                eprintln!("[error] unknown task: {token}");
                print_usage();
                return ExitCode::from(1);
            }
        }
    }

    if modes.is_empty() {
        print_usage();
        return ExitCode::from(1);
    }

    match sweep(&cli, toolchain, &modes) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[error] {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn sweep(cli: &Cli, toolchain: Vec<String>, modes: &[CommandMode]) -> Result<()> {
    let mut reporter = CliReporter;

    let ws = features::load_workspace(&cli.manifest_path)?;

    let mut config = SweepConfig::new(ws.workspace_root.clone());
    config.toolchain = toolchain;
    if let Some(file) = FileConfig::load_from_workspace(&ws.workspace_root)? {
        config.apply_file(file);
    }
    config.validate().context("invalid configuration")?;

    for mode in modes {
        engine::run(*mode, &ws.features, &config, &mut reporter)?;
    }

    Ok(())
}

fn print_usage() {
    eprintln!("{}", Cli::command().render_long_help());
}

/// Delegated exit codes propagate; everything else is a usage-class 1.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SweepError>() {
        Some(SweepError::DelegatedFailure { exit_code, .. }) => {
            u8::try_from(*exit_code).ok().filter(|c| *c != 0).unwrap_or(1)
        }
        _ => 1,
    }
}
