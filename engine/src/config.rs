//! Configuration persistence utilities
//!
//! Loads and saves wheel settings as TOML in the platform config directory.
//! Name lists are deliberately not part of the stored settings.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::color::{ColorError, Palette};
use crate::render::RenderStyle;
use crate::spin::{SpinSettings, DEFAULT_MAX_TURNS, DEFAULT_MIN_TURNS};

/// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    NoConfigDir,
    /// IO error while reading/writing config
    Io(io::Error),
    /// Failed to parse config file
    Parse(toml::de::Error),
    /// Failed to serialize config
    Serialize(toml::ser::Error),
    /// Config parsed but holds unusable values
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(reason) => write!(f, "Invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl From<ColorError> for ConfigError {
    fn from(e: ColorError) -> Self {
        ConfigError::Invalid(e.to_string())
    }
}

/// Persisted wheel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub spin_duration_ms: u64,
    pub frame_period_ms: u64,
    pub min_turns: u32,
    pub max_turns: u32,
    /// Segment fills as "#rrggbb"
    pub palette: Vec<String>,
    pub padding: f32,
    pub font_size: f32,
    /// Strike the winner off the list after each spin
    pub remove_winners: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: 10_000,
            frame_period_ms: 16,
            min_turns: DEFAULT_MIN_TURNS,
            max_turns: DEFAULT_MAX_TURNS,
            palette: Palette::default().to_hex_strings(),
            padding: 10.0,
            font_size: 30.0,
            remove_winners: true,
        }
    }
}

impl WheelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spin_duration_ms == 0 {
            return Err(ConfigError::Invalid("spin_duration_ms must be positive".into()));
        }
        if self.frame_period_ms == 0 || self.frame_period_ms > self.spin_duration_ms {
            return Err(ConfigError::Invalid(
                "frame_period_ms must be positive and shorter than the spin".into(),
            ));
        }
        if self.min_turns == 0 || self.min_turns > self.max_turns {
            return Err(ConfigError::Invalid(format!(
                "turn range {}..={} is empty or starts at zero",
                self.min_turns, self.max_turns
            )));
        }
        if self.padding < 0.0 || self.font_size <= 0.0 {
            return Err(ConfigError::Invalid("padding and font_size must be positive".into()));
        }
        self.palette()?;
        Ok(())
    }

    pub fn spin_settings(&self) -> SpinSettings {
        SpinSettings {
            duration: Duration::from_millis(self.spin_duration_ms),
            frame_period: Duration::from_millis(self.frame_period_ms),
            min_turns: self.min_turns,
            max_turns: self.max_turns,
        }
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette::from_hex(self.palette.as_slice())?)
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            padding: self.padding,
            font_size: self.font_size,
            ..RenderStyle::default()
        }
    }
}

/// Get the base configuration directory for all wheel apps
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "wheel-of-names", "wheel-of-names")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the configuration file path for a specific app
pub fn config_path(app_name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", app_name)))
}

/// Load configuration for a specific app
///
/// Returns `None` if the config file doesn't exist yet.
/// Returns an error if the file exists but can't be parsed.
pub fn load_config<T: DeserializeOwned>(app_name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    let config: T = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Load and validate the wheel settings, falling back to defaults when absent
pub fn load_wheel_config(app_name: &str) -> Result<WheelConfig, ConfigError> {
    let config = load_config::<WheelConfig>(app_name)?.unwrap_or_default();
    config.validate()?;
    Ok(config)
}

/// Save configuration for a specific app
pub fn save_config<T: Serialize>(app_name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, contents)?;
    Ok(())
}
