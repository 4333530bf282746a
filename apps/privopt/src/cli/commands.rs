//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::{api, fleet};
use privopt_core::{
    Comparison, ComparisonRow, DeviceProfile, PrivoptError, RiskLevel, Session, TrackingReport,
    UsagePolicy, default_fleet, default_trackers, federated, sample_fleet, seeded_rng,
};
use serde::Serialize;
use std::path::Path;

/// Print a value as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<(), PrivoptError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| PrivoptError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(host: &str, port: u16) -> Result<(), PrivoptError> {
    println!("privopt Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!();
    println!("Endpoints:");
    println!("  POST /optimize          - Optimize a submitted fleet");
    println!("  GET  /optimize/default  - Optimize the built-in fleet");
    println!("  POST /sample            - Optimize a sampled fleet");
    println!("  POST /classify          - Classify privacy risk");
    println!("  POST /level             - Map a usage label");
    println!("  GET  /tracking          - Raw-data tracking report");
    println!("  POST /session/login     - Log in (credentials not validated)");
    println!("  POST /federated         - Federated averaging (login required)");
    println!("  GET  /health            - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, Session::new()).await
}

// =============================================================================
// OPTIMIZE / SAMPLE COMMANDS
// =============================================================================

/// Run the optimization pass over a fleet file or the built-in fleet.
pub fn cmd_optimize(
    json_mode: bool,
    fleet_path: Option<&Path>,
    format: Option<&str>,
) -> Result<(), PrivoptError> {
    let fleet = match fleet_path {
        Some(path) => {
            tracing::info!("Loading fleet from {:?}", path);
            fleet::load_fleet(path, format)?
        }
        None => default_fleet(),
    };
    report_comparison(json_mode, &fleet)
}

/// Run the optimization pass over a sampled fleet.
pub fn cmd_sample(json_mode: bool, count: usize, seed: u64) -> Result<(), PrivoptError> {
    tracing::info!("Sampling {} devices (seed {})", count, seed);
    let fleet = sample_fleet(count, &mut seeded_rng(seed))?;
    report_comparison(json_mode, &fleet)
}

fn report_comparison(json_mode: bool, fleet: &[DeviceProfile]) -> Result<(), PrivoptError> {
    let comparison = Comparison::run(fleet)?;

    if json_mode {
        return print_json(&api::ComparisonResponse::from_comparison(&comparison));
    }

    println!("Processing Comparison");
    println!("=====================");
    println!();
    println!("Centralized Processing");
    print_rows(&comparison.centralized);
    println!();
    println!("Optimized (Privacy-Preserving)");
    print_rows(&comparison.optimized);

    println!();
    println!("Network Usage (Before -> After)");
    let series = comparison.network_series();
    for ((label, before), after) in series
        .labels
        .iter()
        .zip(&series.centralized)
        .zip(&series.optimized)
    {
        println!("  {:<12} {} -> {}", label, before, after);
    }

    let summary = comparison.summary();
    println!();
    println!("Privacy Preservation Result");
    println!("  Devices:                {}", summary.devices);
    println!("  Personal data blocked:  {}", summary.personal_data_blocked);
    println!("  Network levels saved:   {}", summary.network_reduction);
    println!("  CPU levels saved:       {}", summary.cpu_reduction);
    for risk in RiskLevel::ALL {
        println!(
            "  {:<6} risk:            {} -> {}",
            risk,
            summary.risk_before.count(risk),
            summary.risk_after.count(risk)
        );
    }

    Ok(())
}

fn print_rows(rows: &[ComparisonRow]) {
    println!(
        "  {:<12} {:<14} {:>3} {:>7}  {}",
        "Device", "App", "CPU", "Network", "Privacy Risk"
    );
    if rows.is_empty() {
        println!("  (no devices)");
    }
    for row in rows {
        println!(
            "  {:<12} {:<14} {:>3} {:>7}  {}",
            row.device, row.app, row.cpu, row.network, row.risk
        );
    }
}

// =============================================================================
// CLASSIFY / LEVEL COMMANDS
// =============================================================================

/// Classify the privacy risk of a data-access list and network level.
pub fn cmd_classify(
    json_mode: bool,
    data: &str,
    network: &str,
    cpu: Option<&str>,
) -> Result<(), PrivoptError> {
    let request = api::ClassifyRequest {
        data: data
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        network: network.to_string(),
        cpu: cpu.map(str::to_string),
    };
    let risk = request.classify()?;

    if json_mode {
        return print_json(&api::ClassifyResponse::success(risk));
    }
    println!("Privacy Risk: {}", risk);
    Ok(())
}

/// Print the numeric level of a usage label.
pub fn cmd_level(json_mode: bool, label: &str) -> Result<(), PrivoptError> {
    let level = UsagePolicy::to_level(label)?;

    if json_mode {
        return print_json(&api::LevelResponse::success(level.value()));
    }
    println!("{} = {}", level, level.value());
    Ok(())
}

// =============================================================================
// TRACK COMMAND
// =============================================================================

/// Print the raw-data tracking report for the built-in trackers.
pub fn cmd_track(json_mode: bool) -> Result<(), PrivoptError> {
    let report = TrackingReport::build(&default_trackers());

    if json_mode {
        return print_json(&report);
    }

    let yes_no = |b: bool| if b { "Yes" } else { "No" };

    println!("Detected Devices / Applications");
    println!("===============================");
    println!(
        "  {:<18} {:<8} {:<8} {:<8} {:<8} {}",
        "Name", "Location", "Personal", "Usage", "Raw", "Risk"
    );
    for row in &report.rows {
        let r = &row.record;
        println!(
            "  {:<18} {:<8} {:<8} {:<8} {:<8} {}",
            r.name,
            yes_no(r.tracks_location),
            yes_no(r.tracks_personal_info),
            yes_no(r.tracks_usage_data),
            yes_no(r.tracks_raw_data),
            row.risk
        );
    }

    println!();
    if report.raw_trackers.is_empty() {
        println!("No devices detected tracking raw data");
    } else {
        for name in &report.raw_trackers {
            println!("WARNING: {} is tracking RAW USER DATA", name);
        }
    }

    println!();
    println!("Total Devices:     {}", report.total);
    println!("Raw Data Tracking: {}", report.raw_tracking);
    println!("Privacy Status:    {}", report.status);
    Ok(())
}

// =============================================================================
// FEDERATE COMMAND
// =============================================================================

/// Run a seeded federated averaging simulation.
pub fn cmd_federate(json_mode: bool, rounds: usize, seed: u64) -> Result<(), PrivoptError> {
    tracing::info!("Federated simulation: {} rounds (seed {})", rounds, seed);
    let outcome = federated::simulate(rounds, &mut seeded_rng(seed))?;

    if json_mode {
        return print_json(&api::FederatedResponse::success(outcome));
    }

    println!("Federated Model Updates");
    println!("=======================");
    for update in &outcome.updates {
        println!("  Device {:<4} {:>5} bp", update.device, update.value);
    }
    println!();
    println!("Global model update: {} bp", outcome.global_update);
    Ok(())
}
