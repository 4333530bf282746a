//! # Comparison Module
//!
//! Before/after assembly for a fleet of device profiles.
//!
//! - One synchronous pass over the fleet, preserving row order
//! - Output is raw structure only (rows, numeric series, counters)
//! - No formatting logic in the Core

use crate::policy::UsagePolicy;
use crate::primitives::MAX_FLEET_SIZE;
use crate::{DataCategory, DeviceProfile, PrivoptError, RiskLevel};
use serde::{Deserialize, Serialize};

// =============================================================================
// ROWS & SERIES
// =============================================================================

/// One row of a processing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub device: String,
    pub app: String,
    /// CPU level (1..=3).
    pub cpu: u8,
    /// Network level (1..=3).
    pub network: u8,
    pub risk: RiskLevel,
}

impl ComparisonRow {
    /// Project a profile onto a table row.
    #[must_use]
    pub fn from_profile(profile: &DeviceProfile) -> Self {
        Self {
            device: profile.name.clone(),
            app: profile.app.clone(),
            cpu: profile.cpu.value(),
            network: profile.network.value(),
            risk: profile.risk(),
        }
    }
}

/// Chart-ready pair of numeric series indexed by device label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LevelSeries {
    pub labels: Vec<String>,
    pub centralized: Vec<u8>,
    pub optimized: Vec<u8>,
}

/// Count of rows per risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskDistribution {
    fn from_rows(rows: &[ComparisonRow]) -> Self {
        rows.iter().fold(Self::default(), |mut dist, row| {
            match row.risk {
                RiskLevel::Low => dist.low += 1,
                RiskLevel::Medium => dist.medium += 1,
                RiskLevel::High => dist.high += 1,
            }
            dist
        })
    }

    /// Number of rows for a given level.
    #[must_use]
    pub fn count(&self, risk: RiskLevel) -> usize {
        match risk {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }
}

/// Aggregate outcome of an optimization pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OptimizationSummary {
    pub devices: usize,
    /// Devices whose personal-information access was blocked.
    pub personal_data_blocked: usize,
    /// Sum of per-device network level reductions.
    pub network_reduction: u32,
    /// Sum of per-device CPU level reductions.
    pub cpu_reduction: u32,
    pub risk_before: RiskDistribution,
    pub risk_after: RiskDistribution,
}

// =============================================================================
// COMPARISON
// =============================================================================

/// Centralized vs. optimized tables for one fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Comparison {
    pub centralized: Vec<ComparisonRow>,
    pub optimized: Vec<ComparisonRow>,
    personal_data_blocked: usize,
}

impl Comparison {
    /// Run the optimization pass over a fleet.
    ///
    /// Every profile is validated before any row is produced; the first
    /// invalid profile aborts the pass with no partial result.
    pub fn run(fleet: &[DeviceProfile]) -> Result<Self, PrivoptError> {
        if fleet.len() > MAX_FLEET_SIZE {
            return Err(PrivoptError::InvalidInput(format!(
                "fleet size {} exceeds maximum {}",
                fleet.len(),
                MAX_FLEET_SIZE
            )));
        }
        for profile in fleet {
            UsagePolicy::validate(profile)?;
        }

        let mut comparison = Self {
            centralized: Vec::with_capacity(fleet.len()),
            optimized: Vec::with_capacity(fleet.len()),
            personal_data_blocked: 0,
        };

        for profile in fleet {
            let optimized = UsagePolicy::optimize(profile);
            if profile.accesses(DataCategory::PersonalInformation)
                && !optimized.accesses(DataCategory::PersonalInformation)
            {
                comparison.personal_data_blocked += 1;
            }
            comparison
                .centralized
                .push(ComparisonRow::from_profile(profile));
            comparison
                .optimized
                .push(ComparisonRow::from_profile(&optimized));
        }

        Ok(comparison)
    }

    /// Number of devices in the pass.
    #[must_use]
    pub fn len(&self) -> usize {
        self.centralized.len()
    }

    /// Check if the pass covered no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centralized.is_empty()
    }

    /// Network usage before vs. after, per device.
    #[must_use]
    pub fn network_series(&self) -> LevelSeries {
        self.series(|row| row.network)
    }

    /// CPU usage before vs. after, per device.
    #[must_use]
    pub fn cpu_series(&self) -> LevelSeries {
        self.series(|row| row.cpu)
    }

    fn series(&self, level: impl Fn(&ComparisonRow) -> u8) -> LevelSeries {
        LevelSeries {
            labels: self.centralized.iter().map(|r| r.device.clone()).collect(),
            centralized: self.centralized.iter().map(&level).collect(),
            optimized: self.optimized.iter().map(&level).collect(),
        }
    }

    /// Aggregate counters for the privacy confirmation block.
    #[must_use]
    pub fn summary(&self) -> OptimizationSummary {
        let (network_reduction, cpu_reduction) = self
            .centralized
            .iter()
            .zip(&self.optimized)
            .fold((0u32, 0u32), |(net, cpu), (before, after)| {
                (
                    net.saturating_add(u32::from(before.network.saturating_sub(after.network))),
                    cpu.saturating_add(u32::from(before.cpu.saturating_sub(after.cpu))),
                )
            });

        OptimizationSummary {
            devices: self.len(),
            personal_data_blocked: self.personal_data_blocked,
            network_reduction,
            cpu_reduction,
            risk_before: RiskDistribution::from_rows(&self.centralized),
            risk_after: RiskDistribution::from_rows(&self.optimized),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UsageLevel;

    fn instagram() -> DeviceProfile {
        DeviceProfile::new("Device 1", "Instagram", UsageLevel::High, UsageLevel::High)
            .with_data([DataCategory::Location, DataCategory::PersonalInformation])
    }

    #[test]
    fn empty_fleet_produces_empty_tables() {
        let comparison = Comparison::run(&[]).expect("run");
        assert!(comparison.is_empty());
        assert_eq!(comparison.summary(), OptimizationSummary::default());
        assert!(comparison.network_series().labels.is_empty());
    }

    #[test]
    fn instagram_rows() {
        let comparison = Comparison::run(&[instagram()]).expect("run");

        let before = &comparison.centralized[0];
        assert_eq!((before.cpu, before.network, before.risk), (3, 3, RiskLevel::High));

        let after = &comparison.optimized[0];
        assert_eq!((after.cpu, after.network, after.risk), (2, 1, RiskLevel::Medium));
        assert_eq!(after.device, "Device 1");
        assert_eq!(after.app, "Instagram");
    }

    #[test]
    fn series_follow_row_order() {
        let fleet = vec![
            instagram(),
            DeviceProfile::new("Device 2", "Facebook", UsageLevel::Low, UsageLevel::Medium),
        ];
        let comparison = Comparison::run(&fleet).expect("run");

        let network = comparison.network_series();
        assert_eq!(network.labels, vec!["Device 1", "Device 2"]);
        assert_eq!(network.centralized, vec![3, 2]);
        assert_eq!(network.optimized, vec![1, 1]);

        let cpu = comparison.cpu_series();
        assert_eq!(cpu.centralized, vec![3, 1]);
        assert_eq!(cpu.optimized, vec![2, 1]);
    }

    #[test]
    fn summary_counts_reductions() {
        let fleet = vec![
            instagram(),
            DeviceProfile::new("Device 2", "Facebook", UsageLevel::Low, UsageLevel::Medium),
        ];
        let summary = Comparison::run(&fleet).expect("run").summary();

        assert_eq!(summary.devices, 2);
        assert_eq!(summary.personal_data_blocked, 1);
        assert_eq!(summary.network_reduction, 3);
        assert_eq!(summary.cpu_reduction, 1);
        assert_eq!(summary.risk_before.count(RiskLevel::High), 1);
        assert_eq!(summary.risk_before.count(RiskLevel::Low), 1);
        assert_eq!(summary.risk_after.count(RiskLevel::Medium), 1);
        assert_eq!(summary.risk_after.count(RiskLevel::High), 0);
    }

    #[test]
    fn oversized_fleet_rejected() {
        let fleet = vec![
            DeviceProfile::new("Device", "App", UsageLevel::Low, UsageLevel::Low);
            MAX_FLEET_SIZE + 1
        ];
        assert!(matches!(
            Comparison::run(&fleet),
            Err(PrivoptError::InvalidInput(_))
        ));
    }

    #[test]
    fn invalid_profile_aborts_pass() {
        let fleet = vec![
            instagram(),
            DeviceProfile::new("", "App", UsageLevel::Low, UsageLevel::Low),
        ];
        assert!(Comparison::run(&fleet).is_err());
    }
}
