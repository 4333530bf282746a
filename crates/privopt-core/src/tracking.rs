//! # Tracking Module
//!
//! Raw-data tracking report for detected apps.
//!
//! The tracker report uses its own rule set, which differs from
//! [`UsagePolicy::classify_risk`](crate::policy::UsagePolicy::classify_risk):
//!
//! | Condition | Risk |
//! |-----------|------|
//! | tracks raw data | High |
//! | tracks personal info | Medium |
//! | otherwise | Low |

use crate::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// TRACKER RECORD
// =============================================================================

/// What a detected app or system service tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerRecord {
    pub name: String,
    pub tracks_location: bool,
    pub tracks_personal_info: bool,
    pub tracks_usage_data: bool,
    pub tracks_raw_data: bool,
}

impl TrackerRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: bool,
        personal_info: bool,
        usage_data: bool,
        raw_data: bool,
    ) -> Self {
        Self {
            name: name.into(),
            tracks_location: location,
            tracks_personal_info: personal_info,
            tracks_usage_data: usage_data,
            tracks_raw_data: raw_data,
        }
    }
}

/// Classify a tracker record.
#[must_use]
pub fn classify_tracker(record: &TrackerRecord) -> RiskLevel {
    if record.tracks_raw_data {
        RiskLevel::High
    } else if record.tracks_personal_info {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// The simulated apps of the tracking dashboard.
#[must_use]
pub fn default_trackers() -> Vec<TrackerRecord> {
    vec![
        TrackerRecord::new("Location Tracker", true, false, true, true),
        TrackerRecord::new("Social Media App", true, true, true, true),
        TrackerRecord::new("Fitness App", false, false, true, false),
        TrackerRecord::new("Camera Service", false, false, false, false),
        TrackerRecord::new("System Analytics", false, false, true, true),
        TrackerRecord::new("Music Player", false, false, false, false),
    ]
}

// =============================================================================
// REPORT
// =============================================================================

/// Overall privacy status of a set of trackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyStatus {
    Safe,
    AtRisk,
}

impl fmt::Display for PrivacyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => f.pad("Safe"),
            Self::AtRisk => f.pad("At Risk"),
        }
    }
}

/// A record together with its derived risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerRow {
    #[serde(flatten)]
    pub record: TrackerRecord,
    pub risk: RiskLevel,
}

/// Tracking report: classified rows, raw-data trackers and status counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub rows: Vec<TrackerRow>,
    /// Names of records that track raw data, in input order.
    pub raw_trackers: Vec<String>,
    pub total: usize,
    pub raw_tracking: usize,
    pub status: PrivacyStatus,
}

impl TrackingReport {
    /// Classify every record and collect the summary counters.
    #[must_use]
    pub fn build(records: &[TrackerRecord]) -> Self {
        let rows: Vec<TrackerRow> = records
            .iter()
            .map(|record| TrackerRow {
                record: record.clone(),
                risk: classify_tracker(record),
            })
            .collect();

        let raw_trackers: Vec<String> = records
            .iter()
            .filter(|r| r.tracks_raw_data)
            .map(|r| r.name.clone())
            .collect();

        let status = if raw_trackers.is_empty() {
            PrivacyStatus::Safe
        } else {
            PrivacyStatus::AtRisk
        };

        Self {
            total: rows.len(),
            raw_tracking: raw_trackers.len(),
            rows,
            raw_trackers,
            status,
        }
    }
}
