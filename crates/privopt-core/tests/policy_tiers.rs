//! # Policy Tier Tests (T0-T3)
//!
//! Scenario checks for the fixed policy rules. If ANY tier fails, the
//! dashboard outputs built on top of the core are wrong.
//!
//! ## Tiers
//! - T0: Label Mapping
//! - T1: Risk Classification
//! - T2: Optimization Transform
//! - T3: End-to-End Fleet Pass

use privopt_core::{
    Comparison, DataAccess, DataCategory, DeviceProfile, PrivoptError, RiskLevel, UsageLevel,
    UsagePolicy,
};

fn data(categories: &[DataCategory]) -> DataAccess {
    categories.iter().copied().collect()
}

// =============================================================================
// TIER T0: LABEL MAPPING
// =============================================================================

mod t0_label_mapping {
    use super::*;

    /// T0.1: The label mapping is a bijection onto 1..=3.
    #[test]
    fn labels_map_one_to_one() {
        let pairs = [("Low", 1u8), ("Medium", 2), ("High", 3)];
        for (label, value) in pairs {
            let level = UsagePolicy::to_level(label).expect("label");
            assert_eq!(level.value(), value);
            assert_eq!(level.label(), label);
        }
    }

    /// T0.2: Unknown usage labels fail with InvalidInput.
    #[test]
    fn unknown_label_is_invalid_input() {
        let err = UsagePolicy::to_level("Very High").expect_err("must fail");
        assert!(matches!(err, PrivoptError::InvalidInput(_)));
        assert!(err.to_string().contains("Very High"));
    }

    /// T0.3: Unknown data categories fail with InvalidInput.
    #[test]
    fn unknown_category_is_invalid_input() {
        let err = UsagePolicy::parse_category("Contacts").expect_err("must fail");
        assert!(matches!(err, PrivoptError::InvalidInput(_)));
    }
}

// =============================================================================
// TIER T1: RISK CLASSIFICATION
// =============================================================================

mod t1_risk_classification {
    use super::*;

    /// T1.1: Personal information alone is High.
    #[test]
    fn personal_information_is_high() {
        let risk = UsagePolicy::classify_risk(
            &data(&[DataCategory::PersonalInformation]),
            UsageLevel::Low,
        );
        assert_eq!(risk, RiskLevel::High);
    }

    /// T1.2: Location on a Medium network is Medium.
    #[test]
    fn location_is_medium() {
        let risk = UsagePolicy::classify_risk(&data(&[DataCategory::Location]), UsageLevel::Medium);
        assert_eq!(risk, RiskLevel::Medium);
    }

    /// T1.3: No data on a Low network is Low.
    #[test]
    fn nothing_is_low() {
        assert_eq!(
            UsagePolicy::classify_risk(&DataAccess::new(), UsageLevel::Low),
            RiskLevel::Low
        );
    }

    /// T1.4: A High network dominates Location.
    #[test]
    fn high_network_dominates_location() {
        let risk = UsagePolicy::classify_risk(&data(&[DataCategory::Location]), UsageLevel::High);
        assert_eq!(risk, RiskLevel::High);
    }

    /// T1.5: A High network alone is High.
    #[test]
    fn high_network_alone_is_high() {
        assert_eq!(
            UsagePolicy::classify_risk(&DataAccess::new(), UsageLevel::High),
            RiskLevel::High
        );
    }
}

// =============================================================================
// TIER T2: OPTIMIZATION TRANSFORM
// =============================================================================

mod t2_optimization {
    use super::*;

    /// T2.1: Every CPU level maps to max(1, cpu - 1).
    #[test]
    fn cpu_floors_at_one() {
        let expected = [
            (UsageLevel::Low, UsageLevel::Low),
            (UsageLevel::Medium, UsageLevel::Low),
            (UsageLevel::High, UsageLevel::Medium),
        ];
        for (cpu, after) in expected {
            let p = DeviceProfile::new("Device", "App", cpu, UsageLevel::Medium);
            assert_eq!(UsagePolicy::optimize(&p).cpu, after);
        }
    }

    /// T2.2: The optimized risk is computed on the filtered set with a Low network.
    #[test]
    fn risk_recomputed_after_filtering() {
        let p = DeviceProfile::new("Device", "App", UsageLevel::Low, UsageLevel::High)
            .with_data([DataCategory::PersonalInformation, DataCategory::UsageData]);
        let optimized = UsagePolicy::optimize(&p);
        assert_eq!(optimized.data_accessed, data(&[DataCategory::UsageData]));
        assert_eq!(optimized.risk(), RiskLevel::Low);
    }

    /// T2.3: Re-applying the transform changes nothing.
    #[test]
    fn idempotent() {
        let p = DeviceProfile::new("Device", "App", UsageLevel::High, UsageLevel::High)
            .with_data(DataCategory::ALL);
        let once = UsagePolicy::optimize(&p);
        assert_eq!(UsagePolicy::optimize(&once), once);
    }
}

// =============================================================================
// TIER T3: END-TO-END FLEET PASS
// =============================================================================

mod t3_end_to_end {
    use super::*;

    /// T3.1: Instagram with Location + Personal Information on High/High.
    #[test]
    fn instagram_example() {
        let instagram = DeviceProfile::new("Device 1", "Instagram", UsageLevel::High, UsageLevel::High)
            .with_data([DataCategory::Location, DataCategory::PersonalInformation]);

        let comparison = Comparison::run(&[instagram]).expect("run");

        let before = &comparison.centralized[0];
        assert_eq!(before.risk, RiskLevel::High);
        assert_eq!(before.cpu, 3);
        assert_eq!(before.network, 3);

        let after = &comparison.optimized[0];
        assert_eq!(after.risk, RiskLevel::Medium);
        assert_eq!(after.cpu, 2);
        assert_eq!(after.network, 1);
    }

    /// T3.2: The default fleet is Low risk before and after.
    #[test]
    fn default_fleet_is_low_risk() {
        let comparison = Comparison::run(&privopt_core::default_fleet()).expect("run");
        assert_eq!(comparison.len(), 3);
        assert!(comparison.centralized.iter().all(|r| r.risk == RiskLevel::Low));
        assert!(comparison.optimized.iter().all(|r| r.risk == RiskLevel::Low));
        assert_eq!(comparison.summary().network_reduction, 0);
    }
}
