// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Pricing engine: the top-level composition of catalog and configuration.
//!
//! [`PricingEngine`] owns one immutable [`Catalog`] and the [`Config`] it
//! was built with, and exposes the catalog-bound operations:
//!
//! 1. **Query**: filter then sort (default sort from config).
//! 2. **Summarise**: aggregate statistics over a filtered view.
//! 3. **Line items**: price a service by id for a cost estimate.
//! 4. **Dashboard**: starter overview and provider comparison.
//!
//! The engine holds no mutable state.  Cost estimates and alert books are
//! owned by the caller and passed in where needed.

use alloc::format;
use alloc::vec::Vec;

use crate::calculator::LineItem;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::dashboard::{self, DashboardOverview};
use crate::error::{Error, Result};
use crate::query;
use crate::types::{CatalogSource, FilterCriteria, PriceSummary, ServiceRecord, SortSpec};

/// Composes the catalog and configuration into a single query API.
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::{
///     config::Config,
///     engine::PricingEngine,
///     types::{Category, FilterCriteria},
/// };
///
/// let engine = PricingEngine::builtin(Config::default()).unwrap();
///
/// let criteria = FilterCriteria {
///     category: Some(Category::Database),
///     ..FilterCriteria::default()
/// };
/// let rows = engine.query(&criteria, None);
///
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[0].id, "gcp-cloud-sql-mysql");
/// ```
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: Config,
    catalog: Catalog,
}

impl PricingEngine {
    /// Load the bundled catalog, converting at the configured rate when one
    /// is set.
    pub fn builtin(config: Config) -> Result<Self> {
        Self::from_source(config, Catalog::builtin_source()?)
    }

    /// Load `source`, converting at the configured rate when one is set.
    pub fn from_source(config: Config, source: CatalogSource) -> Result<Self> {
        let catalog = match config.exchange_rate {
            Some(rate) => Catalog::load_with_rate(source, rate)?,
            None => Catalog::load(source)?,
        };
        Ok(Self { config, catalog })
    }

    /// Wrap an already loaded catalog.  The catalog's own rate is kept.
    pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Look up a record by id.
    pub fn service(&self, id: &str) -> Option<&ServiceRecord> {
        self.catalog.get(id)
    }

    /// Filter the catalog by `criteria` and order the result by `sort`, or by
    /// the configured default sort when `sort` is `None`.
    pub fn query(&self, criteria: &FilterCriteria, sort: Option<SortSpec>) -> Vec<&ServiceRecord> {
        let selected = query::filter(self.catalog.records(), criteria);
        query::sort(&selected, sort.unwrap_or(self.config.default_sort))
    }

    /// Aggregate statistics over the records matching `criteria`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] when nothing matches.
    pub fn summarize(&self, criteria: &FilterCriteria) -> Result<PriceSummary<'_>> {
        query::aggregate(&query::filter(self.catalog.records(), criteria))
    }

    /// Price the service `service_id` for a cost estimate.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an unknown id or a quantity / duration
    /// below 1.
    pub fn line_item(&self, service_id: &str, quantity: u32, duration: u32) -> Result<LineItem> {
        let service = self.catalog.get(service_id).ok_or_else(|| {
            Error::Validation(format!("please select a service (unknown id \"{service_id}\")"))
        })?;
        LineItem::new(service, quantity, duration)
    }

    /// Overview cards and provider comparison for the landing page.
    pub fn dashboard(&self) -> Result<DashboardOverview<'_>> {
        dashboard::overview(&self.catalog.all(), &self.config.starter_markers)
    }
}
