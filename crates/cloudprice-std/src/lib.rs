// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! # cloudprice-std
//!
//! `std`-only file helpers for `cloudprice-core`.
//!
//! This crate reads catalog source documents and TOML dashboard settings
//! from disk and writes cost estimate CSV exports, for CLI tools and server-side renderers that work
//! with real files instead of the bundled catalog.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloudprice_core::{config::Config, CostEstimate, PricingEngine};
//! use cloudprice_std::{export, load_catalog};
//!
//! let catalog = load_catalog("/srv/cloudprice/catalog.json")
//!     .expect("failed to load catalog");
//! let engine = PricingEngine::with_catalog(Config::default(), catalog);
//!
//! let mut estimate = CostEstimate::new();
//! estimate.push(engine.line_item("aws-ec2-t3-micro", 1, 720).unwrap());
//! export::write_csv("/tmp/estimate.csv", &estimate).expect("export failed");
//! ```

pub mod catalog_file;
pub mod export;

pub use catalog_file::{load_catalog, load_catalog_with_rate, load_engine};
pub use export::{write_csv, write_estimate_json};
