//! CLI command definitions and handlers.

pub mod check;

use clap::{Parser, Subcommand};

/// Qualgate - pixel-level photo quality gate
#[derive(Parser)]
#[command(name = "qualgate")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Shared check arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Arguments of the check to run, whether given via `check` or bare.
    pub fn into_check_args(self) -> check::CheckArgs {
        match self.command {
            Some(Commands::Check(args)) => args,
            None => self.check,
        }
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Assess images and print one quality report per image
    Check(check::CheckArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every report met the minimum score and resolution.
    Success,
    /// At least one report fell short.
    BelowThreshold,
    /// A fatal error stopped the run.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::BelowThreshold => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
