//! # privopt-core
//!
//! The deterministic policy engine for privopt - THE LOGIC.
//!
//! This crate classifies the privacy risk of simulated mobile devices and
//! projects each device onto its optimized, on-device-processing form.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is pure: every operation is a total function of its inputs
//! - Has NO async, NO network, NO file I/O
//! - Uses integer arithmetic only
//! - Takes randomness only from an explicit `rand::Rng` supplied by the caller
//!
//! ## Example
//!
//! ```
//! use privopt_core::{DataCategory, DeviceProfile, RiskLevel, UsageLevel, UsagePolicy};
//!
//! let profile = DeviceProfile::new("Device 1", "Instagram", UsageLevel::High, UsageLevel::High)
//!     .with_data([DataCategory::Location, DataCategory::PersonalInformation]);
//! assert_eq!(profile.risk(), RiskLevel::High);
//!
//! let optimized = UsagePolicy::optimize(&profile);
//! assert_eq!(optimized.cpu, UsageLevel::Medium);
//! assert_eq!(optimized.network, UsageLevel::Low);
//! assert_eq!(optimized.risk(), RiskLevel::Medium);
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod comparison;
pub mod federated;
pub mod policy;
pub mod primitives;
pub mod session;
pub mod tracking;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    DataAccess, DataCategory, DeviceProfile, PrivoptError, ProcessingMode, RiskLevel, UsageLevel,
};

// =============================================================================
// RE-EXPORTS: Policy Engine
// =============================================================================

pub use catalog::{APP_CATALOG, default_fleet, sample_fleet, seeded_rng};
pub use comparison::{
    Comparison, ComparisonRow, LevelSeries, OptimizationSummary, RiskDistribution,
};
pub use federated::{FederatedOutcome, ModelUpdate};
pub use policy::UsagePolicy;
pub use session::Session;
pub use tracking::{
    PrivacyStatus, TrackerRecord, TrackerRow, TrackingReport, classify_tracker, default_trackers,
};
