use crate::geometry::{DEFAULT_OUTER_RADIUS, Radii};
use crate::item::ItemConfig;
use directories::ProjectDirs;
use palette::{Srgb, Srgba, WithAlpha};
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::path::PathBuf;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

const ENV_PREFIX: &str = "PINWHEEL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("outerDistance required when innerDistance is given")]
    OuterDistanceRequired,
    #[error("innerDistance ({inner}) should be smaller than outerDistance ({outer})")]
    InnerNotSmaller { inner: f64, outer: f64 },
    #[error("Radius must be positive and finite, got {0}")]
    NonPositiveRadius(f64),
    #[error("Invalid color '{0}'")]
    InvalidColor(String),
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

/// What a second activation request does while a session is already open.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ActivationPolicy {
    /// Keep the open session untouched.
    #[default]
    Ignore,
    /// Tear the open session down without committing and reopen at the new origin.
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub struct ThemeColor(pub Srgba<f64>);

impl FromStr for ThemeColor {
    type Err = ConfigError;

    /// Accepts `#rrggbb` and `#rrggbbaa`, leading `#` optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        let (rgb, alpha) = match hex.len() {
            6 => (hex, u8::MAX),
            8 => {
                let (rgb, alpha) = hex.split_at(6);
                (rgb, u8::from_str_radix(alpha, 16).map_err(|_| invalid())?)
            }
            _ => return Err(invalid()),
        };
        let color = Srgb::<u8>::from_str(rgb).map_err(|_| invalid())?;
        Ok(Self(
            color
                .into_format::<f64>()
                .with_alpha(alpha as f64 / u8::MAX as f64),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub default_color: ThemeColor,
    pub selected_color: ThemeColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            default_color: ThemeColor(Srgba::new(0.0, 0.0, 0.0, 0.5)),
            selected_color: ThemeColor(Srgba::new(0.4, 0.4, 0.8, 0.9)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct SelectorOptions {
    pub items: Vec<ItemConfig>,
    pub outer_distance: Option<f64>,
    pub inner_distance: Option<f64>,
    pub theme: Theme,
    pub activation: ActivationPolicy,
    pub activate_key: Option<String>,
}

impl SelectorOptions {
    pub fn radii(&self) -> Result<Radii, ConfigError> {
        match (self.inner_distance, self.outer_distance) {
            (None, None) => Radii::from_outer(DEFAULT_OUTER_RADIUS),
            (Some(_), None) => Err(ConfigError::OuterDistanceRequired),
            (None, Some(outer)) => Radii::from_outer(outer),
            (Some(inner), Some(outer)) => Radii::new(inner, outer),
        }
    }

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(s.try_deserialize()?)
    }
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "pinwheel", "pinwheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<SelectorOptions, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user config, falling back to the embedded default when it is missing
/// or broken. Radii are validated here so callers never see an unusable config.
pub fn load_or_default() -> SelectorOptions {
    let loaded = load_config().and_then(|options| options.radii().map(|_| options));
    match loaded {
        Ok(options) => options,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            default_options()
        }
    }
}

pub fn default_options() -> SelectorOptions {
    SelectorOptions::from_toml(DEFAULT_CONFIG).unwrap_or_default()
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
