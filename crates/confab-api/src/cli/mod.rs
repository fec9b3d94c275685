//! Command-line interface definitions.

pub mod session;

use clap::{Parser, Subcommand};

/// Session-persistent LLM chat relay.
#[derive(Debug, Parser)]
#[command(name = "confab", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print a session's stored history
    History {
        /// The session id to inspect
        session_id: String,

        /// Print raw JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Delete a session's stored history
    Clear {
        /// The session id to clear
        session_id: String,
    },
}
