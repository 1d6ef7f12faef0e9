//! CLI command definitions for the `leadchat` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Customer-support chat backend with lead capture.
#[derive(Parser)]
#[command(name = "leadchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML config file (overrides LEADCHAT_CONFIG).
    #[arg(long, global = true, env = "LEADCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server.
    Serve {
        /// Address to bind (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send one message through the chat pipeline and print the reply.
    Ask {
        /// The message text.
        message: String,

        /// Session to continue.
        #[arg(short, long, default_value = leadchat_types::chat::DEFAULT_SESSION_ID)]
        session: String,
    },

    /// Print the stored turns of a session.
    History {
        /// Session id.
        session: String,
    },

    /// Print the leads captured in a session.
    Leads {
        /// Session id.
        session: String,
    },
}
