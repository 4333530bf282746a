//! # privopt - Device Optimization for Privacy-Preserving Mobile Computing
//!
//! The main binary for the privopt policy engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for fleet comparisons, risk classification and reports
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                apps/privopt (THE BINARY)             │
//! │                                                      │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────┐  │
//! │  │    CLI      │   │  HTTP API   │   │ Fleet files│  │
//! │  │   (clap)    │   │   (axum)    │   │ (toml/json)│  │
//! │  └──────┬──────┘   └──────┬──────┘   └─────┬──────┘  │
//! │         └─────────────────┼────────────────┘         │
//! │                           ▼                          │
//! │                  ┌─────────────────┐                 │
//! │                  │  privopt-core   │                 │
//! │                  │  (THE LOGIC)    │                 │
//! │                  └─────────────────┘                 │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! privopt server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! privopt optimize -f fleet.toml
//! privopt classify --data "Location" --network Medium
//! privopt --json-mode track
//! ```

use clap::Parser;
use privopt::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // PRIVOPT_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PRIVOPT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "privopt=debug,tower_http=debug"
    } else {
        "privopt=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Banner would corrupt JSON output
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the privopt startup banner.
fn print_banner() {
    println!(
        r#"
  privopt v{}
  Device Optimization for Privacy-Preserving Mobile Computing

  Input -> Optimization -> Output
"#,
        env!("CARGO_PKG_VERSION")
    );
}
