//! TOML-based configuration for the relay.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\OtgRelay\config.toml`
//! - Linux:    `~/.config/otgrelay/config.toml`
//! - macOS:    `~/Library/Application Support/OtgRelay/config.toml`
//!
//! ```toml
//! [device]
//! serial = "0123456789ABCDEF"
//!
//! [window]
//! title = "otg-relay"
//! always_on_top = true
//!
//! [capture]
//! keys = ["LeftAlt", "LeftMeta", "RightMeta"]
//!
//! [log]
//! level = "info"
//! ```
//!
//! Every section and field is optional.  Command-line flags override the
//! values read here.

use std::path::{Path, PathBuf};

use otg_core::CaptureKeys;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::surface::{WindowParams, DEFAULT_TITLE};

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

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Which device to relay to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// USB serial number of the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    /// Device node watched for removal, e.g. `/dev/bus/usb/001/004`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_node: Option<PathBuf>,
}

/// Relay window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub always_on_top: bool,
    #[serde(default)]
    pub borderless: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i16>,
}

/// Mouse capture settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CaptureConfig {
    /// Keys that toggle capture when pressed and released alone.
    #[serde(default)]
    pub keys: CaptureKeys,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// `tracing` filter used when `RUST_LOG` is unset, e.g. `"info"` or
    /// `"otg_relay=debug"`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            always_on_top: false,
            borderless: false,
            x: None,
            y: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl From<&WindowConfig> for WindowParams {
    fn from(config: &WindowConfig) -> Self {
        WindowParams {
            title: config.title.clone(),
            always_on_top: config.always_on_top,
            x: config.x,
            y: config.y,
            borderless: config.borderless,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads `AppConfig` from the default location.
///
/// # Errors
///
/// See [`load_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory, including the `OtgRelay` part.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("OtgRelay"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("otgrelay"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("OtgRelay")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use otg_core::Keycode;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("otg_relay_cfg_{}", Uuid::new_v4()))
            .join("config.toml")
    }

    #[test]
    fn test_default_config_has_expected_values() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert_eq!(cfg.device.serial, None);
        assert_eq!(cfg.window.title, "otg-relay");
        assert!(!cfg.window.always_on_top);
        assert_eq!(cfg.capture.keys, CaptureKeys::default());
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[device]
serial = "R58M123ABC"

[window]
always_on_top = true
x = 40

[capture]
keys = ["RightAlt"]
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.device.serial.as_deref(), Some("R58M123ABC"));
        assert!(cfg.window.always_on_top);
        assert_eq!(cfg.window.x, Some(40));
        assert_eq!(cfg.window.y, None);
        assert_eq!(cfg.window.title, "otg-relay");
        assert_eq!(cfg.capture.keys, CaptureKeys::new([Keycode::RIGHT_ALT]));
    }

    #[test]
    fn test_unknown_capture_key_is_a_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[capture]\nkeys = [\"Hyper\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unset_options_are_omitted_from_output() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).expect("serialize");

        assert!(!toml_str.contains("serial"));
        assert!(!toml_str.contains("device_node"));
        assert!(toml_str.contains("LeftAlt"));
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let cfg = load_from(&temp_path()).expect("load");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_save_then_load_preserves_settings() {
        // Arrange
        let path = temp_path();
        let mut cfg = AppConfig::default();
        cfg.device.serial = Some("0123456789".to_string());
        cfg.window.borderless = true;
        cfg.log.level = "debug".to_string();

        // Act
        save_to(&cfg, &path).expect("save");
        let restored = load_from(&path).expect("load");

        // Assert
        assert_eq!(restored, cfg);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_from_malformed_file_returns_parse_error() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_window_config_converts_to_params() {
        let cfg = WindowConfig {
            title: "phone".to_string(),
            always_on_top: true,
            borderless: true,
            x: Some(-10),
            y: Some(20),
        };

        let params = WindowParams::from(&cfg);

        assert_eq!(params.title, "phone");
        assert_eq!((params.x, params.y), (Some(-10), Some(20)));
        assert!(params.always_on_top && params.borderless);
    }
}
