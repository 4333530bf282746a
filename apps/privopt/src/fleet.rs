//! # Fleet Files
//!
//! Loading device fleets from disk.
//!
//! ## Formats
//!
//! TOML, one `[[device]]` table per device:
//!
//! ```toml
//! [[device]]
//! name = "Device 1"
//! app = "Instagram"
//! data = ["Location", "Personal Information"]
//! cpu = "High"
//! network = "High"
//! ```
//!
//! JSON, an array of objects with the same fields.

use privopt_core::{DeviceProfile, PrivoptError, primitives::MAX_FLEET_SIZE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Maximum fleet file size (1 MB).
const MAX_FLEET_FILE_SIZE: u64 = 1024 * 1024;

/// On-disk fleet format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetFormat {
    Toml,
    Json,
}

impl FleetFormat {
    /// Resolve the format from an explicit name, or from the file extension.
    pub fn resolve(explicit: Option<&str>, path: &Path) -> Result<Self, PrivoptError> {
        let name = match explicit {
            Some(name) => name.to_ascii_lowercase(),
            None => path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase())
                .unwrap_or_default(),
        };

        match name.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(PrivoptError::SerializationError(format!(
                "Unknown fleet format '{}'. Use: toml, json",
                other
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlFleet {
    #[serde(default, rename = "device")]
    devices: Vec<DeviceProfile>,
}

/// Parse a fleet from raw file contents.
pub fn parse_fleet(contents: &str, format: FleetFormat) -> Result<Vec<DeviceProfile>, PrivoptError> {
    let devices = match format {
        FleetFormat::Toml => {
            toml::from_str::<TomlFleet>(contents)
                .map_err(|e| PrivoptError::InvalidInput(format!("Invalid TOML fleet: {}", e)))?
                .devices
        }
        FleetFormat::Json => serde_json::from_str::<Vec<DeviceProfile>>(contents)
            .map_err(|e| PrivoptError::InvalidInput(format!("Invalid JSON fleet: {}", e)))?,
    };

    if devices.len() > MAX_FLEET_SIZE {
        return Err(PrivoptError::InvalidInput(format!(
            "Device count {} exceeds maximum {}",
            devices.len(),
            MAX_FLEET_SIZE
        )));
    }

    Ok(devices)
}

/// Load a fleet file.
///
/// The path is canonicalized and must name a regular file no larger than
/// `MAX_FLEET_FILE_SIZE`.
pub fn load_fleet(path: &Path, format: Option<&str>) -> Result<Vec<DeviceProfile>, PrivoptError> {
    let validated = validate_file_path(path)?;
    let format = FleetFormat::resolve(format, &validated)?;

    let metadata = std::fs::metadata(&validated)
        .map_err(|e| PrivoptError::IoError(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_FLEET_FILE_SIZE {
        return Err(PrivoptError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_FLEET_FILE_SIZE
        )));
    }

    let contents = std::fs::read_to_string(&validated)
        .map_err(|e| PrivoptError::IoError(format!("Read file: {}", e)))?;

    tracing::debug!("Loaded fleet file {:?} ({:?})", validated, format);
    parse_fleet(&contents, format)
}

fn validate_file_path(path: &Path) -> Result<PathBuf, PrivoptError> {
    let canonical = path.canonicalize().map_err(|e| {
        PrivoptError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(PrivoptError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// TESTS
// =============================================================================
