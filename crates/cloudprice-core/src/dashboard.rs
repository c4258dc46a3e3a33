// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Dashboard overview: headline statistics for entry-level services plus the
//! per-provider price comparison.

use alloc::vec::Vec;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::query;
use crate::types::{PriceSummary, ProviderAverage, ServiceRecord};

/// Everything the overview cards and provider chart display.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview<'a> {
    /// Aggregate over the starter subset (converted currency).
    pub starter: PriceSummary<'a>,
    /// Mean source-currency price of the starter subset.
    pub starter_average_usd: f64,
    /// Mean converted price per provider over the whole input.
    pub provider_averages: Vec<ProviderAverage>,
}

/// Build the overview for `records` using `markers` to pick the starter
/// subset.
///
/// # Errors
///
/// [`Error::EmptyInput`] when no record matches any marker.
pub fn overview<'a, M>(records: &[&'a ServiceRecord], markers: &[M]) -> Result<DashboardOverview<'a>>
where
    M: AsRef<str>,
{
    let starters = query::starter_services(records, markers);
    let starter = query::aggregate(&starters).map_err(|_| {
        Error::EmptyInput("no starter services match the configured markers".into())
    })?;
    let starter_average_usd =
        starters.iter().map(|record| record.pricing.usd).sum::<f64>() / starters.len() as f64;

    Ok(DashboardOverview {
        starter,
        starter_average_usd,
        provider_averages: query::average_by_provider(records),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::{Category, Provider};

    #[test]
    fn builtin_overview_matches_starter_subset() {
        let catalog = Catalog::builtin().unwrap();
        let overview = overview(&catalog.all(), &["micro", "small", "B1s"]).unwrap();

        assert_eq!(overview.starter.count, 5);
        assert_eq!(overview.starter.min.id, "gcp-e2-micro");
        assert_eq!(overview.starter.max.id, "aws-rds-mysql-t3-micro");
        assert_eq!(overview.starter.count_by_provider.get(&Provider::Aws), Some(&2));
        assert_eq!(overview.starter.count_by_category.get(&Category::Database), Some(&2));

        let expected_usd = (0.0104 + 0.0104 + 0.008468 + 0.017 + 0.0150) / 5.0;
        assert!((overview.starter_average_usd - expected_usd).abs() < 1e-12);
        assert_eq!(overview.provider_averages.len(), 3);
    }

    #[test]
    fn no_matching_marker_is_empty_input() {
        let catalog = Catalog::builtin().unwrap();
        assert!(matches!(
            overview(&catalog.all(), &["mainframe"]),
            Err(Error::EmptyInput(_))
        ));
    }
}
