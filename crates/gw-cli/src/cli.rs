//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use gw_core::SubjectId;

/// Game session tracker.
///
/// Watches presence changes for game start/stop transitions, logs them as
/// timestamped lines, and reconstructs ranked daily play-time reports from
/// the log.
#[derive(Debug, Parser)]
#[command(name = "gw", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rebuild and print a daily report from a session log.
    Report {
        /// Path to the session log file.
        #[arg(long)]
        log: PathBuf,

        /// Day to report on (UTC, YYYY-MM-DD). Defaults to yesterday.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Emit JSON instead of the text table.
        #[arg(long)]
        json: bool,
    },

    /// Detect a single presence transition and print the session line.
    Emit {
        /// Numeric subject id of the user.
        #[arg(long)]
        subject: SubjectId,

        /// Display name used in the emitted line.
        #[arg(long)]
        name: String,

        /// Game the user was playing before the change.
        #[arg(long)]
        was_playing: Option<String>,

        /// Game the user is playing after the change.
        #[arg(long)]
        now_playing: Option<String>,

        /// Append the emitted line to this log file.
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Run the tracker service on a JSONL event stream from stdin.
    Serve {
        /// Session log path (overrides configuration).
        #[arg(long)]
        log: Option<PathBuf>,
    },
}
