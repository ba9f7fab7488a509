//! TOML-based configuration for the bridge process.
//!
//! Reads and writes [`BridgeConfig`] at the platform-appropriate path:
//! - Linux:    `~/.config/roverbridge/config.toml`
//! - macOS:    `~/Library/Application Support/RoverBridge/config.toml`
//! - Windows:  `%APPDATA%\RoverBridge\config.toml`
//!
//! Every field carries a `#[serde(default = "...")]` so a missing file, a
//! missing section, or a file written by an older build all resolve to a
//! complete configuration.  The defaults are the rover's shipped setup:
//! TCP on port 1234, 640x480 JPEG at quality 70, and the microcontroller
//! on `/dev/ttyACM0`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::session::RunMode;
use crate::infrastructure::network::TransportKind;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level bridge configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub actuator: ActuatorConfig,
}

/// Listening transport, address, and port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// Transport to accept the operator on.  Only `"tcp"` is implemented;
    /// `"udp"` and `"bluetooth"` fail fast at startup.
    #[serde(default = "default_transport")]
    pub transport: TransportKind,
    /// IP address to bind the listener to.  `"0.0.0.0"` binds all interfaces.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// TCP port the operator connects to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which halves of the session run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// `"video"`, `"control"`, or `"both"`.  Fixed for the process lifetime.
    #[serde(default = "default_mode")]
    pub mode: RunMode,
}

/// Frame source parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Frame width in pixels.
    #[serde(default = "default_camera_width")]
    pub width: u32,
    /// Frame height in pixels.
    #[serde(default = "default_camera_height")]
    pub height: u32,
    /// JPEG quality (1-100), applied uniformly to every frame.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

/// Actuator serial link parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActuatorConfig {
    /// Serial device path for the motor controller.
    #[serde(default = "default_actuator_device")]
    pub device: PathBuf,
    /// Baud rate for the serial link.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_transport() -> TransportKind {
    TransportKind::Tcp
}
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    1234
}
fn default_mode() -> RunMode {
    RunMode::Both
}
fn default_camera_width() -> u32 {
    640
}
fn default_camera_height() -> u32 {
    480
}
fn default_jpeg_quality() -> u8 {
    70
}
fn default_actuator_device() -> PathBuf {
    PathBuf::from("/dev/ttyACM0")
}
fn default_baud_rate() -> u32 {
    115_200
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            session: SessionConfig::default(),
            camera: CameraConfig::default(),
            actuator: ActuatorConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: default_camera_width(),
            height: default_camera_height(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            device: default_actuator_device(),
            baud_rate: default_baud_rate(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory
/// cannot be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads [`BridgeConfig`] from the platform config path, returning
/// `BridgeConfig::default()` if the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not
/// found", and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<BridgeConfig, ConfigError> {
    let path = config_file_path()?;

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let cfg: BridgeConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BridgeConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Loads [`BridgeConfig`] from an explicitly supplied path.
///
/// Unlike [`load_config`], a missing file is an error here: the caller
/// asked for this specific file, so silently substituting defaults would
/// hide a typo in the path.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: BridgeConfig = toml::from_str(&content)?;
    Ok(cfg)
}

/// Persists `config` to the platform config path.
///
/// Creates the config directory and file if they do not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &BridgeConfig) -> Result<PathBuf, ConfigError> {
    let path = config_file_path()?;

    // Ensure directory exists before writing.
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("RoverBridge"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("roverbridge"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/RoverBridge
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("RoverBridge")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        // Fallback for unsupported platforms.
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── BridgeConfig defaults ─────────────────────────────────────────────────

    #[test]
    fn test_bridge_config_default_matches_shipped_setup() {
        // Arrange / Act
        let cfg = BridgeConfig::default();

        // Assert
        assert_eq!(cfg.network.transport, TransportKind::Tcp);
        assert_eq!(cfg.network.bind_address, "0.0.0.0");
        assert_eq!(cfg.network.port, 1234);
        assert_eq!(cfg.session.mode, RunMode::Both);
    }

    #[test]
    fn test_bridge_config_default_camera_parameters() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.camera.width, 640);
        assert_eq!(cfg.camera.height, 480);
        assert_eq!(cfg.camera.jpeg_quality, 70);
    }

    #[test]
    fn test_bridge_config_default_actuator_parameters() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.actuator.device, PathBuf::from("/dev/ttyACM0"));
        assert_eq!(cfg.actuator.baud_rate, 115_200);
    }

    // ── TOML round-trip ───────────────────────────────────────────────────────

    #[test]
    fn test_bridge_config_serializes_and_deserializes_round_trip() {
        // Arrange
        let mut cfg = BridgeConfig::default();
        cfg.network.port = 9000;
        cfg.session.mode = RunMode::Video;
        cfg.camera.jpeg_quality = 85;

        // Act
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: BridgeConfig = toml::from_str(&toml_str).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_mode_and_transport_serialize_as_lowercase_strings() {
        let cfg = BridgeConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        assert!(toml_str.contains("transport = \"tcp\""));
        assert!(toml_str.contains("mode = \"both\""));
    }

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        // Every section is defaulted, so an empty document is a valid config.
        let cfg: BridgeConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, BridgeConfig::default());
    }

    #[test]
    fn test_deserialize_partial_network_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[network]
port = 9999
"#;

        // Act
        let cfg: BridgeConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.network.port, 9999);
        // Unspecified fields keep their defaults.
        assert_eq!(cfg.network.transport, TransportKind::Tcp);
        assert_eq!(cfg.camera.width, 640);
    }

    #[test]
    fn test_deserialize_rejects_unknown_mode_string() {
        let toml_str = r#"
[session]
mode = "sideways"
"#;
        let result: Result<BridgeConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err(), "unknown mode must be a parse error");
    }

    #[test]
    fn test_deserialize_invalid_toml_returns_parse_error() {
        let bad_toml = "[[[ not valid toml";
        let result: Result<BridgeConfig, toml::de::Error> = toml::from_str(bad_toml);
        assert!(result.is_err());
    }

    // ── load_config_from explicit paths ───────────────────────────────────────

    #[test]
    fn test_load_config_from_missing_file_is_an_error() {
        // An explicitly named file must not silently fall back to defaults.
        let path = PathBuf::from("/nonexistent/rover-bridge/config.toml");
        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_config_from_round_trips_via_temp_dir() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("rover_bridge_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let mut cfg = BridgeConfig::default();
        cfg.network.port = 4321;
        cfg.session.mode = RunMode::Control;
        cfg.actuator.device = PathBuf::from("/dev/ttyUSB7");

        // Act
        let content = toml::to_string_pretty(&cfg).unwrap();
        std::fs::write(&path, &content).unwrap();
        let loaded = load_config_from(&path).expect("load must succeed");

        // Assert
        assert_eq!(loaded, cfg);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    // ── config_dir path formation ─────────────────────────────────────────────

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        let path_result = config_file_path();
        if let Ok(path) = path_result {
            assert!(
                path.ends_with("config.toml"),
                "config file must be named config.toml, got {path:?}"
            );
        }
        // NoPlatformConfigDir (e.g. in a stripped CI env) is also acceptable.
    }
}
