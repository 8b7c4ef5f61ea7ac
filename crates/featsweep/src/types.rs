use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which underlying action a sweep performs.
///
/// `Build`, `Test` and `Nextest` enumerate the feature powerset via
/// `cargo hack`; `Doctest` and `Coverage` run once with all features
/// enabled, since doctests are not combinatorially sensitive and are
/// costly to repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandMode {
    Build,
    Test,
    Nextest,
    Doctest,
    Coverage,
}

impl CommandMode {
    /// Resolve a CLI token (long or short form) into a mode.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "b" | "build" => Some(Self::Build),
            "t" | "test" => Some(Self::Test),
            "nt" | "nextest" => Some(Self::Nextest),
            "dt" | "doctest" => Some(Self::Doctest),
            "coverage" => Some(Self::Coverage),
            _ => None,
        }
    }

    /// Whether this mode enumerates the feature powerset.
    pub fn is_powerset(self) -> bool {
        matches!(self, Self::Build | Self::Test | Self::Nextest)
    }

    /// Canonical long-form token for diagnostics.
    pub fn token(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Test => "test",
            Self::Nextest => "nextest",
            Self::Doctest => "doctest",
            Self::Coverage => "coverage",
        }
    }
}

impl std::fmt::Display for CommandMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Record of one delegated tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRecord {
    /// Rendered command line (program plus arguments).
    pub command: String,
    pub exit_code: i32,
    pub duration_ms: u64,
}

/// Outcome of one mode: every delegated invocation that ran, in order.
///
/// A report is only produced when the whole sequence succeeded; any
/// failure aborts the run with [`SweepError`] instead (fail-fast).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub mode: CommandMode,
    pub invocations: Vec<InvocationRecord>,
}

/// Fatal sweep errors. Nothing is retried; partial success has no
/// meaning when validating a feature powerset.
#[derive(Debug, Error)]
pub enum SweepError {
    /// A required cargo subcommand is not installed.
    #[error("`{tool}` is not available; install it with `{install}`")]
    MissingPrerequisite { tool: String, install: String },

    /// A delegated invocation exited non-zero. Aborts all remaining
    /// invocations and any pending mode tokens.
    #[error("`{command}` failed with exit code {exit_code}")]
    DelegatedFailure { command: String, exit_code: i32 },
}
