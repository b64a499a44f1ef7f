//! Command-line interface definitions.
//!
//! One binary runs the HTTP API, the Telegram bot, or both, and can print
//! the current race state.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Distance tracker for 24-hour races
#[derive(Parser, Debug)]
#[command(name = "ultratrack")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file (missing file means defaults)
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API and the Telegram bot
    Run,

    /// Run only the HTTP API and mini-app
    Serve,

    /// Run only the Telegram bot
    Bot,

    /// Print the current race state
    Status,
}

impl Commands {
    /// Which long-running parts this command starts, as `(api, bot)`.
    #[must_use]
    pub const fn components(&self) -> Option<(bool, bool)> {
        match self {
            Self::Run => Some((true, true)),
            Self::Serve => Some((true, false)),
            Self::Bot => Some((false, true)),
            Self::Status => None,
        }
    }
}
