//! CLI command definitions for the `ynity` binary.

pub mod status;
pub mod summarize;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Study assistant backend: chat agents, summaries and chapters.
#[derive(Parser)]
#[command(name = "ynity", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to `server.port` from config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to `server.host` from config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Summarize a text file and print the merged summary.
    Summarize {
        /// Path to a UTF-8 text file.
        path: PathBuf,

        /// Summary mode: short, medium, long, bullets, plan, flash, elevator.
        #[arg(short, long, default_value = "long")]
        mode: String,
    },

    /// Show data directory, database and configured endpoints.
    Status,
}

impl Cli {
    /// Default log filter for the verbosity flags, used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn,ynity=info",
            1 => "info,ynity=debug",
            _ => "trace",
        }
    }
}
