//! The sweep engine: prerequisite probes, sequential dispatch of the
//! planned invocations, fail-fast abort.

use std::time::Duration;

use anyhow::Result;

use featsweep_process as process;

use crate::cargo::{self, Invocation};
use crate::config::SweepConfig;
use crate::features::FeatureSet;
use crate::types::{CommandMode, InvocationRecord, RunReport, SweepError};

pub trait Reporter {
    fn info(&mut self, msg: &str);
    fn warn(&mut self, msg: &str);
    fn error(&mut self, msg: &str);
}

/// Deferred diagnostic naming the command in flight.
///
/// Armed while a delegated invocation runs and disarmed on success, so
/// every abnormal exit path (delegated failure, spawn error, panic)
/// names the last attempted command on stderr.
struct AbortNotice {
    command: String,
    armed: bool,
}

impl AbortNotice {
    fn new(command: String) -> Self {
        Self { command, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbortNotice {
    fn drop(&mut self) {
        if self.armed {
            eprintln!("[error] aborting: last attempted command was `{}`", self.command);
        }
    }
}

/// Run one mode: probe prerequisites, then execute the planned
/// invocation sequence in order, stopping at the first failure.
pub fn run(
    mode: CommandMode,
    features: &FeatureSet,
    config: &SweepConfig,
    reporter: &mut dyn Reporter,
) -> Result<RunReport> {
    for prereq in cargo::prerequisites(mode) {
        let probe = cargo::probe_invocation(config, &prereq);
        let args: Vec<&str> = probe.args.iter().map(String::as_str).collect();
        let result =
            process::run_captured(&probe.program, &args, Some(&config.workspace_root))?;
        if !result.success {
            return Err(SweepError::MissingPrerequisite {
                tool: prereq.tool,
                install: prereq.install,
            }
            .into());
        }
    }

    if mode.is_powerset() {
        for name in &config.excluded_features {
            if !features.contains(name) {
                reporter.warn(&format!(
                    "excluded feature `{name}` is not declared by any workspace member"
                ));
            }
        }

        let remaining = features.minus(&config.excluded_features);
        reporter.info(&format!(
            "{mode}: sweeping {} feature combinations ({} features after exclusions)",
            remaining.combination_count(),
            remaining.len()
        ));
    }

    let mut invocations = Vec::new();
    for invocation in cargo::plan_invocations(mode, config) {
        invocations.push(dispatch(&invocation, config, reporter)?);
    }

    Ok(RunReport { mode, invocations })
}

fn dispatch(
    invocation: &Invocation,
    config: &SweepConfig,
    reporter: &mut dyn Reporter,
) -> Result<InvocationRecord> {
    let command = invocation.render();
    reporter.info(&format!("running `{command}`"));

    let notice = AbortNotice::new(command.clone());
    let args: Vec<&str> = invocation.args.iter().map(String::as_str).collect();
    let result =
        process::run_streaming(&invocation.program, &args, Some(&config.workspace_root))?;

    if !result.success {
        // The notice stays armed; its Drop emits the abort diagnostic.
        return Err(SweepError::DelegatedFailure {
            command,
            exit_code: result.exit_code.unwrap_or(-1),
        }
        .into());
    }
    notice.disarm();

    reporter.info(&format!(
        "finished in {}",
        humantime::format_duration(Duration::from_millis(result.duration_ms))
    ));

    Ok(InvocationRecord {
        command,
        exit_code: result.exit_code.unwrap_or(0),
        duration_ms: result.duration_ms,
    })
}
