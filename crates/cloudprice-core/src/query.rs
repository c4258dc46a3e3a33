// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Query engine: filter, sort and aggregate views over catalog records.
//!
//! Every function here is pure.  Inputs are borrowed, outputs are new
//! sequences of references into the same records, and nothing is cached
//! between calls.
//!
//! * [`filter`]              : conjunctive [`FilterCriteria`] predicates
//! * [`sort`]                : stable ordering by a [`SortSpec`]
//! * [`aggregate`]           : min / max / average / median / group counts
//! * [`average_by_provider`] : per-provider mean price
//! * [`starter_services`]    : entry-level subset by name marker

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::error::{Error, Result};
use crate::types::{
    FilterCriteria, PriceSummary, Provider, ProviderAverage, ServiceRecord, SortDirection,
    SortField, SortSpec,
};

/// Keep the records that satisfy every present criterion.
///
/// Criteria commute: the result does not depend on which fields were set
/// first.  Name search is case-insensitive containment.
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::{catalog::Catalog, query, types::{Category, FilterCriteria, Provider}};
///
/// let catalog = Catalog::builtin().unwrap();
/// let criteria = FilterCriteria {
///     category: Some(Category::Storage),
///     providers: Some(vec![Provider::Aws]),
///     ..FilterCriteria::default()
/// };
///
/// let hits = query::filter(catalog.records(), &criteria);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "aws-s3-standard");
/// ```
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a ServiceRecord>
where
    I: IntoIterator<Item = &'a ServiceRecord>,
{
    let needle: Option<String> = criteria
        .search
        .as_deref()
        .filter(|search| !search.is_empty())
        .map(str::to_lowercase);

    let selected: Vec<&'a ServiceRecord> = records
        .into_iter()
        .filter(|record| matches(record, criteria, needle.as_deref()))
        .collect();

    tracing::trace!(matched = selected.len(), "filter evaluated");
    selected
}

/// Whether a single record satisfies `criteria`. `needle` is the lowercased
/// search string, computed once per [`filter`] call.
fn matches(record: &ServiceRecord, criteria: &FilterCriteria, needle: Option<&str>) -> bool {
    if let Some(category) = criteria.category {
        if record.category != category {
            return false;
        }
    }
    if let Some(ref providers) = criteria.providers {
        if !providers.is_empty() && !providers.contains(&record.provider) {
            return false;
        }
    }
    if let Some(max_price) = criteria.max_price.filter(|bound| !bound.is_nan()) {
        if record.price() > max_price {
            return false;
        }
    }
    if let Some(ref region) = criteria.region {
        if &record.region != region {
            return false;
        }
    }
    if let Some(needle) = needle {
        if !record.name.to_lowercase().contains(needle) {
            return false;
        }
    }
    true
}

/// Return `records` ordered by `spec`.
///
/// Names and provider ids compare lexicographically; prices compare
/// numerically on the converted amount.  The sort is stable and descending
/// order reverses the comparator, so equal keys keep their input order in
/// both directions.
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::{catalog::Catalog, query, types::{SortDirection, SortField, SortSpec}};
///
/// let catalog = Catalog::builtin().unwrap();
/// let spec = SortSpec::new(SortField::Price, SortDirection::Descending);
/// let sorted = query::sort(&catalog.all(), spec);
///
/// assert_eq!(sorted[0].id, "azure-sql-basic");
/// ```
pub fn sort<'a>(records: &[&'a ServiceRecord], spec: SortSpec) -> Vec<&'a ServiceRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|left, right| {
        let ordering = compare(left, right, spec.field);
        match spec.direction {
            SortDirection::Ascending  => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

fn compare(left: &ServiceRecord, right: &ServiceRecord, field: SortField) -> Ordering {
    match field {
        SortField::Name     => left.name.cmp(&right.name),
        SortField::Price    => left.price().total_cmp(&right.price()),
        SortField::Provider => left.provider.id().cmp(right.provider.id()),
    }
}

/// Compute summary statistics over a non-empty sequence.
///
/// * `min` / `max`: by converted price; the first encountered wins ties.
/// * `average`:     arithmetic mean.
/// * `median`:      taken from a sorted copy; even lengths use the
///   lower-middle element.
///
/// # Errors
///
/// [`Error::EmptyInput`] when `records` is empty.
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::{catalog::Catalog, query};
///
/// let catalog = Catalog::builtin().unwrap();
/// let summary = query::aggregate(&catalog.all()).unwrap();
///
/// assert_eq!(summary.count, 12);
/// assert_eq!(summary.max.id, "azure-sql-basic");
/// assert_eq!(summary.min.id, "gcp-e2-micro");
/// assert!(query::aggregate(&[]).is_err());
/// ```
pub fn aggregate<'a>(records: &[&'a ServiceRecord]) -> Result<PriceSummary<'a>> {
    let (first, rest) = records
        .split_first()
        .ok_or_else(|| Error::EmptyInput("cannot summarise an empty service list".into()))?;

    let mut min: &'a ServiceRecord = first;
    let mut max: &'a ServiceRecord = first;
    for &record in rest {
        if record.price() < min.price() {
            min = record;
        }
        if record.price() > max.price() {
            max = record;
        }
    }

    let total: f64 = records.iter().map(|record| record.price()).sum();
    let average = total / records.len() as f64;

    let mut prices: Vec<f64> = records.iter().map(|record| record.price()).collect();
    prices.sort_by(f64::total_cmp);
    let median = prices[(prices.len() - 1) / 2];

    let mut count_by_category = BTreeMap::new();
    let mut count_by_provider = BTreeMap::new();
    for record in records {
        *count_by_category.entry(record.category).or_insert(0) += 1;
        *count_by_provider.entry(record.provider).or_insert(0) += 1;
    }

    Ok(PriceSummary {
        count: records.len(),
        min,
        max,
        average,
        median,
        count_by_category,
        count_by_provider,
    })
}

/// Mean converted price per provider, in provider order.  Providers with no
/// records in `records` are omitted rather than reported as NaN.
///
/// ```rust
/// use cloudprice_core::{catalog::Catalog, query, types::Provider};
///
/// let catalog = Catalog::builtin().unwrap();
/// let averages = query::average_by_provider(&catalog.all());
/// assert_eq!(averages.len(), 3);
/// assert_eq!(averages[0].provider, Provider::Aws);
/// assert_eq!(averages[0].count, 4);
/// ```
pub fn average_by_provider(records: &[&ServiceRecord]) -> Vec<ProviderAverage> {
    Provider::ALL
        .into_iter()
        .filter_map(|provider| {
            let (total, count) = records
                .iter()
                .filter(|record| record.provider == provider)
                .fold((0.0_f64, 0_usize), |(total, count), record| {
                    (total + record.price(), count + 1)
                });
            (count > 0).then(|| ProviderAverage {
                provider,
                average: total / count as f64,
                count,
            })
        })
        .collect()
}

/// Records whose name contains any of `markers` (case-sensitive), in input
/// order.  Used for the entry-level overview on the dashboard.
pub fn starter_services<'a, M>(records: &[&'a ServiceRecord], markers: &[M]) -> Vec<&'a ServiceRecord>
where
    M: AsRef<str>,
{
    records
        .iter()
        .copied()
        .filter(|record| markers.iter().any(|marker| record.name.contains(marker.as_ref())))
        .collect()
}
