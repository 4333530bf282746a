//! # Policy Module
//!
//! Usage-level mapping, privacy-risk classification and the optimization
//! transform for the privopt CORE.
//!
//! - Pure, total functions over small enumerations
//! - No state, no I/O, no randomness
//! - Invalid labels fail fast with `PrivoptError::InvalidInput`

use crate::primitives::MAX_LABEL_LENGTH;
use crate::{
    DataAccess, DataCategory, DeviceProfile, PrivoptError, ProcessingMode, RiskLevel, UsageLevel,
};

/// The UsagePolicy holds the fixed rules applied to every device profile.
///
/// The UsagePolicy:
/// - Maps usage labels to levels
/// - Classifies privacy risk from data access and network tier
/// - Projects a profile onto its optimized (on-device processing) form
pub struct UsagePolicy;

impl UsagePolicy {
    /// Map a usage label ("Low", "Medium", "High") to its level.
    ///
    /// Any other string, including different casing, is rejected.
    pub fn to_level(label: &str) -> Result<UsageLevel, PrivoptError> {
        label.parse()
    }

    /// Parse a single data category label.
    pub fn parse_category(label: &str) -> Result<DataCategory, PrivoptError> {
        label.parse()
    }

    /// Parse a list of data category labels into a set.
    ///
    /// Duplicates collapse. The first unknown label aborts the whole parse.
    pub fn parse_categories<I, S>(labels: I) -> Result<DataAccess, PrivoptError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| Self::parse_category(label.as_ref()))
            .collect()
    }

    /// Classify privacy risk.
    ///
    /// Rules, in order:
    /// 1. Personal information accessed, or network tier `High` => `High`
    /// 2. Location accessed => `Medium`
    /// 3. Otherwise => `Low`
    #[must_use]
    pub fn classify_risk(data: &DataAccess, network: UsageLevel) -> RiskLevel {
        if data.contains(&DataCategory::PersonalInformation) || network == UsageLevel::High {
            RiskLevel::High
        } else if data.contains(&DataCategory::Location) {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Project a profile onto its optimized form.
    ///
    /// - CPU drops one tier, flooring at `Low`
    /// - Network becomes `Low`
    /// - Personal information access is removed
    ///
    /// The result is marked `OnDevice`. An `OnDevice` input keeps its CPU
    /// tier but still loses network and personal-information access, so
    /// optimizing twice equals optimizing once.
    #[must_use]
    pub fn optimize(profile: &DeviceProfile) -> DeviceProfile {
        let cpu = match profile.mode {
            ProcessingMode::Centralized => profile.cpu.step_down(),
            ProcessingMode::OnDevice => profile.cpu,
        };

        let mut data_accessed = profile.data_accessed.clone();
        data_accessed.remove(&DataCategory::PersonalInformation);

        DeviceProfile {
            name: profile.name.clone(),
            app: profile.app.clone(),
            data_accessed,
            cpu,
            network: UsageLevel::Low,
            mode: ProcessingMode::OnDevice,
        }
    }

    /// Validate the free-text labels of a profile.
    ///
    /// The enum fields are valid by construction; only `name` and `app`
    /// need bounds checks.
    pub fn validate(profile: &DeviceProfile) -> Result<(), PrivoptError> {
        for (field, value) in [("name", &profile.name), ("app", &profile.app)] {
            if value.trim().is_empty() {
                return Err(PrivoptError::InvalidInput(format!(
                    "device {} must not be empty",
                    field
                )));
            }
            if value.len() > MAX_LABEL_LENGTH {
                return Err(PrivoptError::InvalidInput(format!(
                    "device {} length {} exceeds maximum {} bytes",
                    field,
                    value.len(),
                    MAX_LABEL_LENGTH
                )));
            }
        }
        Ok(())
    }
}
