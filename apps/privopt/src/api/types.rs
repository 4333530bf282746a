//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Requests carry plain string labels and are converted to core types with
//! explicit validation, so an unknown label produces a 400 with a readable
//! message instead of a generic deserialization rejection.

use privopt_core::{
    Comparison, ComparisonRow, DeviceProfile, FederatedOutcome, LevelSeries, ModelUpdate,
    OptimizationSummary, PrivoptError, ProcessingMode, RiskLevel, Session, UsagePolicy,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// OPTIMIZE REQUEST/RESPONSE
// =============================================================================

/// A device as submitted over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceJson {
    pub name: String,
    pub app: String,
    #[serde(default)]
    pub data: Vec<String>,
    pub cpu: String,
    pub network: String,
    #[serde(default)]
    pub mode: ProcessingMode,
}

impl DeviceJson {
    /// Convert to a DeviceProfile, validating every label.
    pub fn to_profile(&self) -> Result<DeviceProfile, PrivoptError> {
        let cpu = UsagePolicy::to_level(&self.cpu)?;
        let network = UsagePolicy::to_level(&self.network)?;
        let data = UsagePolicy::parse_categories(&self.data)?;

        let profile = DeviceProfile::new(&self.name, &self.app, cpu, network)
            .with_data(data)
            .with_mode(self.mode);
        UsagePolicy::validate(&profile)?;
        Ok(profile)
    }
}

/// Optimization request over an explicit fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub devices: Vec<DeviceJson>,
}

impl OptimizeRequest {
    pub fn to_fleet(&self) -> Result<Vec<DeviceProfile>, PrivoptError> {
        self.devices.iter().map(DeviceJson::to_profile).collect()
    }
}

/// Sampled-fleet request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRequest {
    pub count: usize,
    #[serde(default)]
    pub seed: u64,
}

/// Processing comparison response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResponse {
    pub success: bool,
    pub centralized: Vec<ComparisonRow>,
    pub optimized: Vec<ComparisonRow>,
    pub network_series: LevelSeries,
    pub cpu_series: LevelSeries,
    pub summary: Option<OptimizationSummary>,
    pub error: Option<String>,
}

impl ComparisonResponse {
    pub fn from_comparison(comparison: &Comparison) -> Self {
        Self {
            success: true,
            centralized: comparison.centralized.clone(),
            optimized: comparison.optimized.clone(),
            network_series: comparison.network_series(),
            cpu_series: comparison.cpu_series(),
            summary: Some(comparison.summary()),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            centralized: vec![],
            optimized: vec![],
            network_series: LevelSeries::default(),
            cpu_series: LevelSeries::default(),
            summary: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// CLASSIFY REQUEST/RESPONSE
// =============================================================================

/// Risk classification request.
///
/// `cpu` is accepted and validated as a label but does not influence the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub data: Vec<String>,
    pub network: String,
    #[serde(default)]
    pub cpu: Option<String>,
}

impl ClassifyRequest {
    pub fn classify(&self) -> Result<RiskLevel, PrivoptError> {
        if let Some(cpu) = &self.cpu {
            UsagePolicy::to_level(cpu)?;
        }
        let data = UsagePolicy::parse_categories(&self.data)?;
        let network = UsagePolicy::to_level(&self.network)?;
        Ok(UsagePolicy::classify_risk(&data, network))
    }
}

/// Risk classification response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub success: bool,
    pub risk: Option<RiskLevel>,
    pub error: Option<String>,
}

impl ClassifyResponse {
    pub fn success(risk: RiskLevel) -> Self {
        Self {
            success: true,
            risk: Some(risk),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            risk: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// LEVEL REQUEST/RESPONSE
// =============================================================================

/// Usage label lookup request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRequest {
    pub label: String,
}

/// Usage label lookup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelResponse {
    pub success: bool,
    pub level: Option<u8>,
    pub error: Option<String>,
}

impl LevelResponse {
    pub fn success(level: u8) -> Self {
        Self {
            success: true,
            level: Some(level),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            level: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// SESSION REQUEST/RESPONSE
// =============================================================================

/// Login request. Credentials are never validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Current session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub logged_in: bool,
    pub username: Option<String>,
    pub error: Option<String>,
}

impl SessionResponse {
    /// A rejected login; the session itself is left untouched.
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            logged_in: false,
            username: None,
            error: Some(msg.into()),
        }
    }
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            success: true,
            logged_in: session.is_logged_in(),
            username: session.username().map(str::to_string),
            error: None,
        }
    }
}

// =============================================================================
// FEDERATED REQUEST/RESPONSE
// =============================================================================

/// Federated simulation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FederatedRequest {
    #[serde(default)]
    pub rounds: Option<usize>,
    #[serde(default)]
    pub seed: u64,
}

/// Federated simulation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedResponse {
    pub success: bool,
    pub updates: Vec<ModelUpdate>,
    pub global_update: Option<u32>,
    pub error: Option<String>,
}

impl FederatedResponse {
    pub fn success(outcome: FederatedOutcome) -> Self {
        Self {
            success: true,
            global_update: Some(outcome.global_update),
            updates: outcome.updates,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            updates: vec![],
            global_update: None,
            error: Some(msg.into()),
        }
    }
}
