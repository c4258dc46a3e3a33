// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! TOML configuration loader for [`crate::engine::PricingEngine`].
//!
//! [`load_config`] reads a TOML file and [`parse_config`] parses TOML text
//! into a flat [`DashboardConfig`], which is validated and then converted
//! into the engine-internal [`Config`].
//!
//! Only available with the `config-loader` feature (which implies `std`).
//!
//! # File format
//!
//! ```toml
//! exchange_rate          = 83.15          # optional; INR per USD
//! default_sort_field     = "price"        # "name" | "price" | "provider"
//! default_sort_direction = "asc"          # "asc" | "desc"
//! starter_markers        = ["micro", "small", "B1s"]
//! ```

// Only compile this module when the "config-loader" feature is enabled.
// "config-loader" implies "std", so std facilities are always available here.
#![cfg(feature = "config-loader")]

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::types::{SortDirection, SortField, SortSpec};

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Flat, serialisation-friendly configuration as it appears on disk.
///
/// Use [`DashboardConfig::into_config`] (or `TryFrom`) to validate and
/// convert after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Overrides the catalog source's exchange rate when set.
    #[serde(default)]
    pub exchange_rate: Option<f64>,

    #[serde(default = "default_sort_field")]
    pub default_sort_field: String,

    #[serde(default = "default_sort_direction")]
    pub default_sort_direction: String,

    #[serde(default = "default_starter_markers")]
    pub starter_markers: Vec<String>,
}

fn default_sort_field() -> String { "price".into() }
fn default_sort_direction() -> String { "asc".into() }
fn default_starter_markers() -> Vec<String> { Config::default().starter_markers }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            exchange_rate:          None,
            default_sort_field:     default_sort_field(),
            default_sort_direction: default_sort_direction(),
            starter_markers:        default_starter_markers(),
        }
    }
}

impl DashboardConfig {
    /// Validate every field and build the engine [`Config`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidRange`] for a non-positive or non-finite
    /// exchange rate, [`ConfigError::ParseField`] for unknown sort names.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        if let Some(rate) = self.exchange_rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ConfigError::InvalidRange {
                    field: "exchange_rate".into(),
                    value: rate.to_string(),
                    reason: "must be a positive finite number".into(),
                });
            }
        }

        let field = SortField::parse(&self.default_sort_field).ok_or_else(|| {
            ConfigError::ParseField {
                field: "default_sort_field".into(),
                value: self.default_sort_field.clone(),
                reason: "expected one of: name, price, provider".into(),
            }
        })?;
        let direction = SortDirection::parse(&self.default_sort_direction).ok_or_else(|| {
            ConfigError::ParseField {
                field: "default_sort_direction".into(),
                value: self.default_sort_direction.clone(),
                reason: "expected one of: asc, desc".into(),
            }
        })?;

        Ok(Config {
            exchange_rate: self.exchange_rate,
            default_sort: SortSpec::new(field, direction),
            starter_markers: self.starter_markers,
        })
    }
}

impl TryFrom<DashboardConfig> for Config {
    type Error = ConfigError;

    fn try_from(value: DashboardConfig) -> Result<Self, Self::Error> {
        value.into_config()
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or parsing dashboard configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A required file could not be opened.
    FileRead { path: String, source: std::io::Error },
    /// The TOML content could not be deserialised.
    TomlParse { source: toml::de::Error },
    /// A field could not be parsed to its expected type.
    ParseField { field: String, value: String, reason: String },
    /// A field value is outside the permitted range.
    InvalidRange { field: String, value: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead { path, source } =>
                write!(f, "Failed to read config file \"{path}\": {source}"),
            ConfigError::TomlParse { source } =>
                write!(f, "Failed to parse TOML config: {source}"),
            ConfigError::ParseField { field, value, reason } =>
                write!(f, "Field \"{field}\": cannot parse \"{value}\": {reason}"),
            ConfigError::InvalidRange { field, value, reason } =>
                write!(f, "Field \"{field}\": value \"{value}\" out of range: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::FileRead { source, .. } => Some(source),
            ConfigError::TomlParse { source }    => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Parse TOML text into a validated [`Config`].
///
/// # Example
///
/// ```rust
/// use cloudprice_core::config_loader::parse_config;
/// use cloudprice_core::types::SortField;
///
/// let config = parse_config("exchange_rate = 84.0\ndefault_sort_field = \"name\"").unwrap();
/// assert_eq!(config.exchange_rate, Some(84.0));
/// assert_eq!(config.default_sort.field, SortField::Name);
/// ```
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let flat = toml::from_str::<DashboardConfig>(content)
        .map_err(|source| ConfigError::TomlParse { source })?;
    flat.into_config()
}

/// Load a validated [`Config`] from a TOML file.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, the TOML does not
/// match the expected schema, or a field fails validation.
///
/// # Example
///
/// ```rust,no_run
/// use cloudprice_core::config_loader::load_config;
///
/// let config = load_config("/etc/cloudprice/dashboard.toml").unwrap();
/// println!("Exchange rate override: {:?}", config.exchange_rate);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), "dashboard config loaded");
    Ok(config)
}
