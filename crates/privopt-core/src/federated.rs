//! # Federated Module
//!
//! Reproducible stand-in for federated model averaging.
//!
//! Each round one device contributes a model update drawn from the
//! caller's random source. The global update is the floor of their
//! integer mean. Values are basis points (`0..=MODEL_UPDATE_SCALE`), so no
//! floating-point arithmetic is involved.

use crate::primitives::{MAX_FEDERATED_ROUNDS, MODEL_UPDATE_SCALE};
use crate::PrivoptError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single device's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelUpdate {
    /// 1-based device index.
    pub device: usize,
    /// Update value in basis points.
    pub value: u32,
}

/// Result of a federated simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedOutcome {
    pub updates: Vec<ModelUpdate>,
    /// Floor mean of all update values; 0 when there are no updates.
    pub global_update: u32,
}

impl FederatedOutcome {
    /// Number of rounds completed.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.updates.len()
    }
}

/// Run `rounds` rounds of update collection and average the results.
pub fn simulate<R: Rng>(rounds: usize, rng: &mut R) -> Result<FederatedOutcome, PrivoptError> {
    if rounds > MAX_FEDERATED_ROUNDS {
        return Err(PrivoptError::InvalidInput(format!(
            "federated rounds {} exceeds maximum {}",
            rounds, MAX_FEDERATED_ROUNDS
        )));
    }

    let updates: Vec<ModelUpdate> = (1..=rounds)
        .map(|device| ModelUpdate {
            device,
            value: rng.gen_range(0..=MODEL_UPDATE_SCALE),
        })
        .collect();

    Ok(FederatedOutcome {
        global_update: average(&updates),
        updates,
    })
}

fn average(updates: &[ModelUpdate]) -> u32 {
    if updates.is_empty() {
        return 0;
    }
    let sum: u64 = updates.iter().map(|u| u64::from(u.value)).sum();
    // Mean of values bounded by MODEL_UPDATE_SCALE always fits in u32.
    (sum / updates.len() as u64) as u32
}
