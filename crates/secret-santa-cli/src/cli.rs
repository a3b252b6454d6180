//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use secret_santa::DeliveryMode;

#[derive(Debug, Parser)]
#[command(name = "secret-santa", version, about = "Draw secret santa assignments")]
pub struct Cli {
    /// Directory holding config.yaml and, optionally, solver.toml,
    /// email_header.txt, content.txt and email_footer.txt
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Draw assignments for this period, record them and deliver the messages
    Assign {
        #[command(flatten)]
        delivery: DeliveryArgs,

        /// Seed for the random costs, overriding solver.toml
        #[arg(long)]
        seed: Option<u64>,

        /// Period to record, defaults to the current year
        #[arg(long)]
        period: Option<String>,
    },

    /// Deliver the messages for an already recorded period again
    Resend {
        #[command(flatten)]
        delivery: DeliveryArgs,

        /// Period to resend, defaults to the current year
        #[arg(long)]
        period: Option<String>,
    },

    /// Validate the configuration and report its size without solving
    Check,
}

#[derive(Debug, Args)]
pub struct DeliveryArgs {
    /// Address each message to its gifter and send it over SMTP
    #[arg(long, conflicts_with = "test")]
    pub real: bool,

    /// Address every message to the sender and print the draw (default)
    #[arg(long)]
    pub test: bool,

    /// Write real messages as .eml files to this directory instead of sending
    #[arg(long, requires = "real")]
    pub outbox: Option<PathBuf>,
}

impl DeliveryArgs {
    pub fn mode(&self) -> DeliveryMode {
        if self.real {
            DeliveryMode::Real
        } else {
            DeliveryMode::Test
        }
    }
}
