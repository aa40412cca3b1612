//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap.
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Typing Level Tracker CLI
#[derive(Parser, Debug)]
#[command(name = "tltctl")]
#[command(about = "Typing Level Tracker - earn XP and levels for the code you type", long_about = None)]
#[command(version = tlt_common::VERSION)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// State file (overrides config and $TLT_STATE_FILE)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Config file (overrides $TLT_CONFIG and the default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read editor events (JSON lines) from stdin
    Feed {
        /// Tab-separated output for editor plugins
        #[arg(long)]
        machine: bool,
    },

    /// Show the status line
    Status {
        /// Output the progress record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show level details
    Details,

    /// Show XP per language
    Langs,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set a value (section.key=value)
    Set {
        /// Assignment, e.g. guard.repeat_limit=4
        assignment: String,
    },
}
