// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Cost estimation.
//!
//! A [`LineItem`] is one chosen service plus a quantity and a duration.  Its
//! totals are computed once, independently in each currency, from the unit
//! prices the catalog loaded.  [`total`] sums those native per-item totals;
//! it never converts one currency's grand total into the other.
//!
//! [`CostEstimate`] is the caller-owned list the calculator screen edits.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{CostTotal, ServiceRecord};

/// Header row of the CSV export.
pub const CSV_HEADER: &str =
    "Service,Provider,Category,Quantity,Duration,Unit Price (INR),Total (INR)";

/// One service in a cost estimate.
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::{calculator::LineItem, catalog::Catalog};
///
/// let catalog = Catalog::builtin().unwrap();
/// let s3 = catalog.get("aws-s3-standard").unwrap();
///
/// let item = LineItem::new(s3, 100, 12).unwrap();
/// assert_eq!(item.total_usd, 0.023 * (100.0 * 12.0));
///
/// assert!(LineItem::new(s3, 0, 12).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Snapshot of the selected record.
    pub service: ServiceRecord,
    pub quantity: u32,
    pub duration: u32,
    pub total_usd: f64,
    pub total_inr: f64,
}

impl LineItem {
    /// Price `service` for `quantity` units over `duration` billing periods.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if `quantity` or `duration` is below 1.
    pub fn new(service: &ServiceRecord, quantity: u32, duration: u32) -> Result<Self> {
        if quantity < 1 {
            return Err(Error::Validation("quantity must be at least 1".into()));
        }
        if duration < 1 {
            return Err(Error::Validation("duration must be at least 1".into()));
        }

        let multiplier = f64::from(quantity) * f64::from(duration);
        Ok(Self {
            service: service.clone(),
            quantity,
            duration,
            total_usd: service.pricing.usd * multiplier,
            total_inr: service.pricing.inr * multiplier,
        })
    }
}

/// Free-function form of [`LineItem::new`].
pub fn add_line_item(service: &ServiceRecord, quantity: u32, duration: u32) -> Result<LineItem> {
    LineItem::new(service, quantity, duration)
}

/// Sum `items` per currency.
///
/// ```rust
/// use cloudprice_core::calculator::total;
/// assert_eq!(total(&[]).usd, 0.0);
/// ```
pub fn total(items: &[LineItem]) -> CostTotal {
    items.iter().fold(CostTotal::default(), |sum, item| CostTotal {
        usd: sum.usd + item.total_usd,
        inr: sum.inr + item.total_inr,
    })
}

/// Render `items` in the comma-separated export format.
///
/// Money columns are fixed to two decimals.  Fields are written verbatim: a
/// comma inside a service name is not quoted and will shift that row's
/// columns.
pub fn to_csv(items: &[LineItem]) -> String {
    let mut csv = String::from(CSV_HEADER);
    for item in items {
        let _ = write!(
            csv,
            "\n{},{},{},{},{},{:.2},{:.2}",
            item.service.name,
            item.service.provider.id().to_ascii_uppercase(),
            item.service.category.id(),
            item.quantity,
            item.duration,
            item.service.pricing.inr,
            item.total_inr,
        );
    }
    let _ = write!(csv, "\n,,,,,Total:,{:.2}", total(items).inr);
    csv
}

/// Caller-owned cost estimate: an ordered list of line items.
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::{calculator::CostEstimate, catalog::Catalog};
///
/// let catalog = Catalog::builtin().unwrap();
/// let mut estimate = CostEstimate::new();
///
/// estimate.add(catalog.get("aws-ec2-t3-micro").unwrap(), 2, 730).unwrap();
/// estimate.add(catalog.get("aws-s3-standard").unwrap(), 50, 1).unwrap();
///
/// assert_eq!(estimate.len(), 2);
/// assert!(estimate.total().inr > 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    items: Vec<LineItem>,
}

impl CostEstimate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line item for `service`. Returns the new item.
    pub fn add(&mut self, service: &ServiceRecord, quantity: u32, duration: u32) -> Result<&LineItem> {
        let item = LineItem::new(service, quantity, duration)?;
        tracing::debug!(service = %item.service.id, quantity, duration, "line item added");
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Append an already-built line item.
    pub fn push(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Remove and return the item at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<LineItem> {
        if index >= self.items.len() {
            return Err(Error::Validation(format!(
                "no line item at position {} (estimate has {})",
                index,
                self.items.len()
            )));
        }
        let item = self.items.remove(index);
        tracing::debug!(service = %item.service.id, index, "line item removed");
        Ok(item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> CostTotal {
        total(&self.items)
    }

    pub fn to_csv(&self) -> String {
        to_csv(&self.items)
    }
}
