//! CLI command definitions and handlers

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::run;

/// Jules - browse and drive remote coding sessions from the terminal
///
/// Reads the API key from --api-key, then JULES_API_KEY, then
/// ~/.jules/config.toml.
#[derive(Parser, Debug)]
#[command(name = "jules")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Jules API key
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also show in-progress notifications
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory holding config.toml and logs (default: ~/.jules)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List connected sources
    Sources,

    /// List branches of a source
    Branches {
        /// Source name (default: first source)
        #[arg(long)]
        source: Option<String>,
    },

    /// List sessions started against a source
    Sessions {
        /// Source name (default: first source)
        #[arg(long)]
        source: Option<String>,
    },

    /// Show a session's activity feed, newest first
    Activities {
        session_id: String,

        /// Print only the copy text of the newest activity
        #[arg(long)]
        copy: bool,
    },

    /// Start a new session
    New {
        /// What Jules should work on
        #[arg(short, long)]
        prompt: String,

        /// Source name (default: first source)
        #[arg(long)]
        source: Option<String>,

        /// Starting branch (default: the source's default branch)
        #[arg(long)]
        branch: Option<String>,
    },

    /// Reply to a session
    Send { session_id: String, message: String },
}
