//! # privopt CLI Module
//!
//! This module implements the CLI interface for privopt.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `optimize` - Compare centralized vs. optimized processing for a fleet
//! - `sample` - Same, for a seeded random fleet
//! - `classify` - Classify the privacy risk of a data-access set
//! - `level` - Map a usage label to its numeric level
//! - `track` - Show the raw-data tracking report
//! - `federate` - Run a seeded federated averaging simulation

mod commands;

use clap::{Parser, Subcommand};
use privopt_core::PrivoptError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// privopt - Device Optimization for Privacy-Preserving Mobile Computing
///
/// Classifies the privacy risk of simulated mobile devices and shows the
/// effect of moving their processing on-device.
#[derive(Parser, Debug)]
#[command(name = "privopt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Run the optimization pass over a fleet file (or the built-in fleet)
    Optimize {
        /// Fleet file (TOML or JSON)
        #[arg(short, long)]
        fleet: Option<PathBuf>,

        /// Fleet format (toml, json); inferred from the extension when omitted
        #[arg(short = 't', long)]
        format: Option<String>,
    },

    /// Run the optimization pass over a sampled fleet
    Sample {
        /// Number of devices
        #[arg(short, long, default_value = "3")]
        count: usize,

        /// Random seed
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },

    /// Classify privacy risk
    Classify {
        /// Data categories (comma-separated, e.g. "Location,Personal Information")
        #[arg(short, long, default_value = "")]
        data: String,

        /// Network usage level (Low, Medium, High)
        #[arg(short, long)]
        network: String,

        /// CPU usage level; validated but does not affect the result
        #[arg(short, long)]
        cpu: Option<String>,
    },

    /// Map a usage label to its numeric level
    Level {
        /// Usage label (Low, Medium, High)
        label: String,
    },

    /// Show the raw-data tracking report
    Track,

    /// Run a seeded federated averaging simulation
    Federate {
        /// Number of device updates to average
        #[arg(short, long, default_value_t = privopt_core::primitives::DEFAULT_FEDERATED_ROUNDS)]
        rounds: usize,

        /// Random seed
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), PrivoptError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(&host, port).await,
        Some(Commands::Optimize { fleet, format }) => {
            cmd_optimize(json_mode, fleet.as_deref(), format.as_deref())
        }
        Some(Commands::Sample { count, seed }) => cmd_sample(json_mode, count, seed),
        Some(Commands::Classify { data, network, cpu }) => {
            cmd_classify(json_mode, &data, &network, cpu.as_deref())
        }
        Some(Commands::Level { label }) => cmd_level(json_mode, &label),
        Some(Commands::Track) => cmd_track(json_mode),
        Some(Commands::Federate { rounds, seed }) => cmd_federate(json_mode, rounds, seed),
        None => {
            // No subcommand - show the built-in fleet comparison by default
            cmd_optimize(json_mode, None, None)
        }
    }
}
