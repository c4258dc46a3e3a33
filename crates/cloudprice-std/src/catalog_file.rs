// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Catalog source files.
//!
//! A catalog file holds the same JSON document as the bundled catalog:
//!
//! ```json
//! {
//!   "exchangeRate": 83.15,
//!   "services": [ { "id": "...", "name": "...", "category": "compute",
//!                   "provider": "aws", "pricing": { "usd": 0.0104,
//!                   "unit": "hour", "billingType": "hourly" } }, ... ]
//! }
//! ```
//!
//! Read failures surface unchanged.  Malformed JSON and entries the loader
//! rejects are reported as [`io::ErrorKind::InvalidData`].  [`load_engine`]
//! pairs a catalog file with a TOML dashboard settings file.

use std::io;
use std::path::Path;

use cloudprice_core::catalog::{self, Catalog};
use cloudprice_core::config_loader::{self, ConfigError};
use cloudprice_core::engine::PricingEngine;
use cloudprice_core::types::CatalogSource;

/// Read and validate the catalog source at `path`, converting at the rate
/// the file carries.
///
/// # Errors
///
/// Returns an [`io::Error`] if the file cannot be read, or one of kind
/// [`io::ErrorKind::InvalidData`] if its content is not a valid catalog.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> io::Result<Catalog> {
    let path = path.as_ref();
    let source = read_source(path)?;
    let catalog = Catalog::load(source).map_err(invalid_data)?;
    tracing::info!(path = %path.display(), services = catalog.len(), "catalog file loaded");
    Ok(catalog)
}

/// Like [`load_catalog`] but converts at `exchange_rate` instead of the
/// file's own rate.
pub fn load_catalog_with_rate<P: AsRef<Path>>(path: P, exchange_rate: f64) -> io::Result<Catalog> {
    let path = path.as_ref();
    let source = read_source(path)?;
    let catalog = Catalog::load_with_rate(source, exchange_rate).map_err(invalid_data)?;
    tracing::info!(
        path = %path.display(),
        services = catalog.len(),
        exchange_rate,
        "catalog file loaded"
    );
    Ok(catalog)
}

/// Build an engine from a catalog file and a TOML settings file.  A rate
/// set in the settings overrides the one the catalog carries.
///
/// # Errors
///
/// Read failures of either file keep their [`io::ErrorKind`].  Invalid
/// settings or catalog content is [`io::ErrorKind::InvalidData`].
pub fn load_engine<P, Q>(catalog_path: P, settings_path: Q) -> io::Result<PricingEngine>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let settings_path = settings_path.as_ref();
    let config = config_loader::load_config(settings_path).map_err(|error| match error {
        ConfigError::FileRead { source, .. } => source,
        other => {
            tracing::warn!(path = %settings_path.display(), error = %other, "settings file rejected");
            io::Error::new(io::ErrorKind::InvalidData, other.to_string())
        }
    })?;
    let catalog_path = catalog_path.as_ref();
    let source = read_source(catalog_path)?;
    let engine = PricingEngine::from_source(config, source).map_err(invalid_data)?;
    tracing::info!(
        path = %catalog_path.display(),
        services = engine.catalog().len(),
        exchange_rate = engine.catalog().exchange_rate(),
        "engine loaded from files"
    );
    Ok(engine)
}

fn read_source(path: &Path) -> io::Result<CatalogSource> {
    let raw = std::fs::read_to_string(path)?;
    catalog::parse_source(&raw).map_err(invalid_data)
}

fn invalid_data(error: cloudprice_core::Error) -> io::Error {
    tracing::warn!(%error, "catalog file rejected");
    io::Error::new(io::ErrorKind::InvalidData, error.to_string())
}
