// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! # cloudprice-core
//!
//! Pricing catalog, query and estimation engine for comparing entry-level
//! cloud services across AWS, Azure and Google Cloud.
//!
//! This crate is `no_std`-compatible (requires `alloc`).  Enable the `std`
//! feature (on by default) to lift that restriction, and `config-loader` to
//! read dashboard settings from TOML.
//!
//! ## Features
//!
//! | Feature         | Default | Enables                                   |
//! |-----------------|---------|-------------------------------------------|
//! | `std`           | yes     | `std::error::Error`, std-backed deps      |
//! | `config-loader` | no      | `config_loader` (TOML, implies `std`)     |
//!
//! The `config_loader` tests and doctests only build with the feature on.
//! `cargo test --workspace` turns it on through `cloudprice-std`; for this
//! crate alone run `cargo test -p cloudprice-core --all-features`.
//!
//! ## Architecture
//!
//! ```text
//! PricingEngine
//!   ├── Catalog        : validated, immutable service records (USD + INR)
//!   ├── query          : filter / sort / aggregate over catalog views
//!   └── dashboard      : starter overview and provider comparison
//!
//! CostEstimate         : caller-owned line items, totals, CSV export
//! AlertBook            : caller-owned budget thresholds and derived status
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use cloudprice_core::{
//!     config::Config,
//!     engine::PricingEngine,
//!     calculator::CostEstimate,
//!     types::{FilterCriteria, Provider},
//! };
//!
//! let engine = PricingEngine::builtin(Config::default()).unwrap();
//!
//! // Cheapest GCP services first.
//! let criteria = FilterCriteria {
//!     providers: Some(vec![Provider::Gcp]),
//!     ..FilterCriteria::default()
//! };
//! let rows = engine.query(&criteria, None);
//! assert_eq!(rows[0].id, "gcp-e2-micro");
//!
//! // Price a month of two instances.
//! let mut estimate = CostEstimate::new();
//! estimate.push(engine.line_item("gcp-e2-micro", 2, 720).unwrap());
//! assert!(estimate.total().usd > 12.0);
//! assert!(estimate.to_csv().starts_with("Service,Provider"));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod alerts;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod config_loader;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod query;
pub mod types;

pub use alerts::AlertBook;
pub use calculator::{CostEstimate, LineItem};
pub use catalog::Catalog;
pub use engine::PricingEngine;
pub use error::{Error, Result};
pub use types::{
    AlertStatus, AlertSummary, BudgetAlert, Category, CostTotal, Currency, FilterCriteria,
    PriceSummary, Provider, ServiceRecord, SortDirection, SortField, SortSpec,
};
