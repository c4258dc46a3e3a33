// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Engine-level configuration.
//!
//! [`Config`] is the single entry point for tuning the pricing engine at
//! construction time.  All fields have sensible defaults so that
//! `Config::default()` is always a valid starting point.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::types::SortSpec;

/// Top-level configuration for [`crate::engine::PricingEngine`].
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::config::Config;
///
/// let config = Config {
///     exchange_rate: Some(84.0),
///     ..Config::default()
/// };
/// assert_eq!(config.starter_markers, vec!["micro", "small", "B1s"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// INR per USD to convert prices at.  `None` keeps the rate carried by
    /// the catalog source.
    pub exchange_rate: Option<f64>,

    /// Ordering applied by [`crate::engine::PricingEngine::query`] when the
    /// caller does not pass one.  Defaults to price ascending.
    pub default_sort: SortSpec,

    /// Name fragments that mark entry-level services for the dashboard
    /// overview.  Matching is case-sensitive containment.
    pub starter_markers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange_rate: None,
            default_sort: SortSpec::default(),
            starter_markers: vec!["micro".into(), "small".into(), "B1s".into()],
        }
    }
}
