//! # Catalog Module
//!
//! Built-in device fleets.
//!
//! - `default_fleet`: the three fixed devices of the optimization dashboard
//! - `sample_fleet`: a lightly randomized fleet of any size up to
//!   `MAX_FLEET_SIZE`, drawn from a caller-supplied random source
//!
//! The random source is always explicit. Pass [`seeded_rng`] for
//! reproducible output.

use crate::primitives::MAX_FLEET_SIZE;
use crate::{DataCategory, DeviceProfile, PrivoptError, UsageLevel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Apps a sampled device may run.
pub const APP_CATALOG: [&str; 6] = [
    "Instagram",
    "Facebook",
    "Google Maps",
    "WhatsApp",
    "YouTube",
    "Spotify",
];

/// Fixed devices shown by the optimization dashboard.
const DEFAULT_DEVICES: [(&str, &str); 3] = [
    ("Device 1", "Instagram"),
    ("Device 2", "Facebook"),
    ("Device 3", "Google Maps"),
];

/// The default fleet, in the state its input widgets start in:
/// no data access, `Low` CPU and `Low` network.
#[must_use]
pub fn default_fleet() -> Vec<DeviceProfile> {
    DEFAULT_DEVICES
        .iter()
        .map(|(name, app)| DeviceProfile::new(*name, *app, UsageLevel::Low, UsageLevel::Low))
        .collect()
}

/// Deterministic random source for sampling and federated simulation.
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Build a sampled fleet of `count` devices named `Device 1..=count`.
///
/// Each device runs a catalog app, accesses each data category with
/// probability 1/2, and has uniformly drawn CPU and network tiers.
pub fn sample_fleet<R: Rng>(
    count: usize,
    rng: &mut R,
) -> Result<Vec<DeviceProfile>, PrivoptError> {
    if count > MAX_FLEET_SIZE {
        return Err(PrivoptError::InvalidInput(format!(
            "device count {} exceeds maximum {}",
            count, MAX_FLEET_SIZE
        )));
    }

    let fleet = (1..=count)
        .map(|i| {
            let app = APP_CATALOG[rng.gen_range(0..APP_CATALOG.len())];
            let cpu = UsageLevel::ALL[rng.gen_range(0..UsageLevel::ALL.len())];
            let network = UsageLevel::ALL[rng.gen_range(0..UsageLevel::ALL.len())];
            let data: Vec<DataCategory> = DataCategory::ALL
                .into_iter()
                .filter(|_| rng.gen_bool(0.5))
                .collect();

            DeviceProfile::new(format!("Device {}", i), app, cpu, network).with_data(data)
        })
        .collect();

    Ok(fleet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fleet_matches_dashboard() {
        let fleet = default_fleet();
        let apps: Vec<_> = fleet.iter().map(|p| p.app.as_str()).collect();
        assert_eq!(apps, vec!["Instagram", "Facebook", "Google Maps"]);
        assert!(fleet.iter().all(|p| p.data_accessed.is_empty()));
        assert!(fleet.iter().all(|p| p.cpu == UsageLevel::Low));
    }

    #[test]
    fn same_seed_same_fleet() {
        let a = sample_fleet(6, &mut seeded_rng(42)).expect("sample");
        let b = sample_fleet(6, &mut seeded_rng(42)).expect("sample");
        assert_eq!(a, b);
    }

    #[test]
    fn sampled_devices_are_numbered_from_one() {
        let fleet = sample_fleet(3, &mut seeded_rng(7)).expect("sample");
        let names: Vec<_> = fleet.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Device 1", "Device 2", "Device 3"]);
        assert!(fleet.iter().all(|p| APP_CATALOG.contains(&p.app.as_str())));
    }

    #[test]
    fn zero_devices_is_empty() {
        let fleet = sample_fleet(0, &mut seeded_rng(1)).expect("sample");
        assert!(fleet.is_empty());
    }

    #[test]
    fn oversized_count_rejected() {
        let result = sample_fleet(MAX_FLEET_SIZE + 1, &mut seeded_rng(1));
        assert!(matches!(result, Err(PrivoptError::InvalidInput(_))));
    }
}
