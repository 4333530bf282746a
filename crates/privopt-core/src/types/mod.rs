//! # Core Type Definitions
//!
//! This module contains all core types for the privopt policy engine:
//! - Resource tiers (`UsageLevel`)
//! - Declared data access (`DataCategory`, `DataAccess`)
//! - Input records (`DeviceProfile`, `ProcessingMode`)
//! - Derived classification (`RiskLevel`)
//! - Error types (`PrivoptError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer representations only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeSet`
//! - Serialize as their display labels ("Personal Information", "High")

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// USAGE LEVEL
// =============================================================================

/// Ordinal resource-consumption tier for CPU or network.
///
/// `Low < Medium < High`, with numeric values 1, 2 and 3.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[repr(u8)]
pub enum UsageLevel {
    #[default]
    Low = 1,
    Medium = 2,
    High = 3,
}

impl UsageLevel {
    /// All levels in ascending order.
    pub const ALL: [UsageLevel; 3] = [UsageLevel::Low, UsageLevel::Medium, UsageLevel::High];

    /// Numeric value of the level (1..=3).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Inverse of [`UsageLevel::value`].
    pub fn from_value(value: u8) -> Result<Self, PrivoptError> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(PrivoptError::InvalidInput(format!(
                "usage level {} out of range 1..=3",
                other
            ))),
        }
    }

    /// One tier lower, flooring at `Low`.
    #[must_use]
    pub const fn step_down(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium | Self::Low => Self::Low,
        }
    }

    /// Display label of the level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for UsageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for UsageLevel {
    type Err = PrivoptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(PrivoptError::InvalidInput(format!(
                "unknown usage level '{}' (expected Low, Medium or High)",
                other
            ))),
        }
    }
}

// =============================================================================
// DATA CATEGORY
// =============================================================================

/// Class of information a simulated app declares access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataCategory {
    #[serde(rename = "Location")]
    Location,
    #[serde(rename = "Personal Information")]
    PersonalInformation,
    #[serde(rename = "Usage Data")]
    UsageData,
}

impl DataCategory {
    /// All categories in their canonical order.
    pub const ALL: [DataCategory; 3] = [
        DataCategory::Location,
        DataCategory::PersonalInformation,
        DataCategory::UsageData,
    ];

    /// Display label of the category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::PersonalInformation => "Personal Information",
            Self::UsageData => "Usage Data",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for DataCategory {
    type Err = PrivoptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| PrivoptError::InvalidInput(format!("unknown data category '{}'", s)))
    }
}

/// Set of data categories a device accesses.
/// BTreeSet keeps iteration (and therefore output) ordering deterministic.
pub type DataAccess = BTreeSet<DataCategory>;

// =============================================================================
// RISK LEVEL
// =============================================================================

/// Derived three-tier privacy-risk classification.
///
/// Never stored on a profile; always recomputed from its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// All risk levels in ascending order.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

// =============================================================================
// PROCESSING MODE
// =============================================================================

/// Where a profile's data is processed.
///
/// Input profiles are `Centralized` unless stated otherwise; the
/// optimization transform produces `OnDevice` profiles and never steps
/// the CPU tier of an `OnDevice` profile down.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    #[default]
    Centralized,
    OnDevice,
}

// =============================================================================
// DEVICE PROFILE
// =============================================================================

/// A simulated device running one app.
///
/// Immutable input record: built fresh for each pass and discarded after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Display label ("Device 1").
    pub name: String,
    /// App running on the device.
    pub app: String,
    /// Declared data access.
    #[serde(default, rename = "data")]
    pub data_accessed: DataAccess,
    /// CPU usage tier.
    pub cpu: UsageLevel,
    /// Network usage tier.
    pub network: UsageLevel,
    /// Processing mode; absent in input files, where it defaults to centralized.
    #[serde(default)]
    pub mode: ProcessingMode,
}

impl DeviceProfile {
    /// Create a new profile with no declared data access.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        app: impl Into<String>,
        cpu: UsageLevel,
        network: UsageLevel,
    ) -> Self {
        Self {
            name: name.into(),
            app: app.into(),
            data_accessed: DataAccess::new(),
            cpu,
            network,
            mode: ProcessingMode::Centralized,
        }
    }

    /// Builder-style helper to declare data access.
    #[must_use]
    pub fn with_data(mut self, data: impl IntoIterator<Item = DataCategory>) -> Self {
        self.data_accessed.extend(data);
        self
    }

    /// Builder-style helper to set the processing mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check whether the profile declares access to `category`.
    #[must_use]
    pub fn accesses(&self, category: DataCategory) -> bool {
        self.data_accessed.contains(&category)
    }

    /// Privacy risk of this profile, derived from its data access and network tier.
    #[must_use]
    pub fn risk(&self) -> RiskLevel {
        crate::policy::UsagePolicy::classify_risk(&self.data_accessed, self.network)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the privopt system.
///
/// - No silent failures
/// - Use `Result<T, PrivoptError>` for fallible operations
/// - The CORE should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum PrivoptError {
    /// An enum label, count or field was outside its allowed domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A session-gated operation was attempted while logged out.
    #[error("Not logged in")]
    NotLoggedIn,

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_level_values() {
        assert_eq!(UsageLevel::Low.value(), 1);
        assert_eq!(UsageLevel::Medium.value(), 2);
        assert_eq!(UsageLevel::High.value(), 3);
    }

    #[test]
    fn usage_level_ordering() {
        assert!(UsageLevel::Low < UsageLevel::Medium);
        assert!(UsageLevel::Medium < UsageLevel::High);
    }

    #[test]
    fn usage_level_from_value_rejects_out_of_range() {
        assert!(matches!(
            UsageLevel::from_value(0),
            Err(PrivoptError::InvalidInput(_))
        ));
        assert!(matches!(
            UsageLevel::from_value(4),
            Err(PrivoptError::InvalidInput(_))
        ));
    }

    #[test]
    fn usage_level_step_down_floors_at_low() {
        assert_eq!(UsageLevel::High.step_down(), UsageLevel::Medium);
        assert_eq!(UsageLevel::Medium.step_down(), UsageLevel::Low);
        assert_eq!(UsageLevel::Low.step_down(), UsageLevel::Low);
    }

    #[test]
    fn usage_level_parse_is_case_sensitive() {
        assert!("low".parse::<UsageLevel>().is_err());
        assert!(" High".parse::<UsageLevel>().is_err());
    }

    #[test]
    fn data_category_labels_parse_back() {
        for category in DataCategory::ALL {
            let parsed: DataCategory = category.label().parse().expect("parse");
            assert_eq!(parsed, category);
        }
        assert!("PersonalInformation".parse::<DataCategory>().is_err());
    }

    #[test]
    fn data_category_serializes_as_label() {
        let json = serde_json::to_string(&DataCategory::PersonalInformation).expect("json");
        assert_eq!(json, "\"Personal Information\"");
    }

    #[test]
    fn profile_builder_and_access() {
        let profile = DeviceProfile::new("Device 1", "Instagram", UsageLevel::High, UsageLevel::Low)
            .with_data([DataCategory::Location]);

        assert!(profile.accesses(DataCategory::Location));
        assert!(!profile.accesses(DataCategory::UsageData));
        assert_eq!(profile.risk(), RiskLevel::Medium);
    }

    #[test]
    fn profile_deserializes_with_missing_data() {
        let json = r#"{"name":"Device 2","app":"Facebook","cpu":"Medium","network":"High"}"#;
        let profile: DeviceProfile = serde_json::from_str(json).expect("json");
        assert!(profile.data_accessed.is_empty());
        assert_eq!(profile.network, UsageLevel::High);
        assert_eq!(profile.mode, ProcessingMode::Centralized);
    }
}
