//! Unit tests for API types conversion and serialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use privopt::api::{
    ClassifyRequest, ClassifyResponse, ComparisonResponse, DeviceJson, FederatedRequest,
    HealthResponse, OptimizeRequest, SessionResponse,
};
use privopt_core::{DataCategory, PrivoptError, ProcessingMode, RiskLevel, Session, UsageLevel};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

// =============================================================================
// DEVICE CONVERSION TESTS
// =============================================================================

fn device(cpu: &str, network: &str, data: &[&str]) -> DeviceJson {
    DeviceJson {
        name: "Device 1".to_string(),
        app: "Instagram".to_string(),
        data: data.iter().map(|s| s.to_string()).collect(),
        cpu: cpu.to_string(),
        network: network.to_string(),
        mode: ProcessingMode::default(),
    }
}

#[test]
fn test_device_to_profile() {
    let profile = device("High", "Low", &["Location", "Usage Data"])
        .to_profile()
        .unwrap();

    assert_eq!(profile.cpu, UsageLevel::High);
    assert_eq!(profile.network, UsageLevel::Low);
    assert!(profile.accesses(DataCategory::Location));
    assert!(profile.accesses(DataCategory::UsageData));
}

#[test]
fn test_device_rejects_bad_labels() {
    assert!(matches!(
        device("Hi", "Low", &[]).to_profile(),
        Err(PrivoptError::InvalidInput(_))
    ));
    assert!(matches!(
        device("Low", "Low", &["Camera"]).to_profile(),
        Err(PrivoptError::InvalidInput(_))
    ));
}

#[test]
fn test_device_rejects_blank_name() {
    let mut d = device("Low", "Low", &[]);
    d.name = String::new();
    assert!(d.to_profile().is_err());
}

#[test]
fn test_device_data_defaults_to_empty() {
    let json = r#"{"name":"Device 2","app":"Facebook","cpu":"Low","network":"Low"}"#;
    let d: DeviceJson = serde_json::from_str(json).unwrap();
    assert!(d.data.is_empty());
    assert_eq!(d.mode, ProcessingMode::Centralized);
}

#[test]
fn test_optimize_request_stops_at_first_error() {
    let request = OptimizeRequest {
        devices: vec![device("Low", "Low", &[]), device("Low", "Loud", &[])],
    };
    let err = request.to_fleet().unwrap_err();
    assert!(err.to_string().contains("Loud"));
}

// =============================================================================
// CLASSIFY TESTS
// =============================================================================

#[test]
fn test_classify_request() {
    let request = ClassifyRequest {
        data: vec!["Personal Information".to_string()],
        network: "Low".to_string(),
        cpu: None,
    };
    assert_eq!(request.classify().unwrap(), RiskLevel::High);

    let empty = ClassifyRequest {
        data: vec![],
        network: "Low".to_string(),
        cpu: Some("High".to_string()),
    };
    assert_eq!(empty.classify().unwrap(), RiskLevel::Low);
}

#[test]
fn test_classify_response_serialization() {
    let json = serde_json::to_string(&ClassifyResponse::success(RiskLevel::Medium)).unwrap();
    assert!(json.contains("\"risk\":\"Medium\""));
    assert!(json.contains("\"success\":true"));
}

// =============================================================================
// COMPARISON / SESSION / FEDERATED TESTS
// =============================================================================

#[test]
fn test_comparison_error_response() {
    let response = ComparisonResponse::error("boom");
    assert!(!response.success);
    assert!(response.summary.is_none());
    assert_eq!(response.error.as_deref(), Some("boom"));
}

#[test]
fn test_session_response_from_session() {
    let mut session = Session::new();
    assert!(!SessionResponse::from(&session).logged_in);

    session.login("analyst", "pw");
    let response = SessionResponse::from(&session);
    assert!(response.success);
    assert!(response.logged_in);
    assert_eq!(response.username.as_deref(), Some("analyst"));
}

#[test]
fn test_session_error_response() {
    let response = SessionResponse::error("missing field `username`");
    assert!(!response.success);
    assert!(!response.logged_in);
    assert!(response.username.is_none());
    assert!(response.error.unwrap().contains("username"));
}

#[test]
fn test_device_json_accepts_mode() {
    let json = r#"{"name":"Device 1","app":"Instagram","cpu":"High","network":"High","mode":"on_device"}"#;
    let profile = serde_json::from_str::<DeviceJson>(json)
        .unwrap()
        .to_profile()
        .unwrap();
    assert_eq!(profile.mode, ProcessingMode::OnDevice);
}

#[test]
fn test_federated_request_defaults() {
    let request: FederatedRequest = serde_json::from_str("{}").unwrap();
    assert!(request.rounds.is_none());
    assert_eq!(request.seed, 0);
}
