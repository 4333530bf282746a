//! # Innate Primitives
//!
//! Hardcoded runtime constants for the privopt CORE.
//!
//! These primitives are compiled into the binary and are immutable at runtime.

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of devices processed in a single pass.
///
/// Fleets larger than this are rejected before any row is computed.
pub const MAX_FLEET_SIZE: usize = 1000;

/// Maximum length for device and app labels.
pub const MAX_LABEL_LENGTH: usize = 256;

// =============================================================================
// FEDERATED SIMULATION
// =============================================================================

/// Number of device updates averaged when no round count is given.
pub const DEFAULT_FEDERATED_ROUNDS: usize = 5;

/// Upper bound on federated rounds per request.
pub const MAX_FEDERATED_ROUNDS: usize = 100;

/// Scale of a model update: values are basis points in `0..=MODEL_UPDATE_SCALE`.
pub const MODEL_UPDATE_SCALE: u32 = 10_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rounds_within_bound() {
        assert!(DEFAULT_FEDERATED_ROUNDS <= MAX_FEDERATED_ROUNDS);
    }

    #[test]
    fn update_scale_is_basis_points() {
        assert_eq!(MODEL_UPDATE_SCALE, 10_000);
    }
}
