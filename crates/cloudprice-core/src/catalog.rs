// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Catalog loading.
//!
//! [`Catalog`] turns a [`CatalogSource`] (open-string entries plus one
//! exchange rate) into an immutable list of [`ServiceRecord`]s with both
//! currency amounts populated.  Loading is all-or-nothing: the first entry
//! that falls outside the data model fails the whole load with
//! [`Error::Data`].
//!
//! A catalog is never mutated after load and is safe to share by reference
//! with any number of readers.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::types::{
    BillingType, CatalogSource, Category, Pricing, Provider, RawServiceEntry, ServiceRecord,
};

/// Bundled catalog source document (AWS, Azure and GCP list prices).
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Immutable, indexed list of service price records.
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::catalog::Catalog;
///
/// let catalog = Catalog::builtin().unwrap();
/// let micro = catalog.get("aws-ec2-t3-micro").unwrap();
///
/// assert_eq!(micro.pricing.usd, 0.0104);
/// assert!((micro.pricing.inr - 0.0104 * 83.15).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<ServiceRecord>,
    /// Key: record id → position in `records`.
    index: HashMap<String, usize>,
    exchange_rate: f64,
}

impl Catalog {
    /// Load the bundled catalog at its bundled exchange rate.
    pub fn builtin() -> Result<Self> {
        Self::load(Self::builtin_source()?)
    }

    /// The bundled catalog source document, not yet validated.
    pub fn builtin_source() -> Result<CatalogSource> {
        parse_source(BUILTIN_CATALOG)
    }

    /// Parse and load a catalog source document in JSON form.
    ///
    /// Malformed JSON is reported as [`Error::Data`].
    pub fn from_json(json: &str) -> Result<Self> {
        Self::load(parse_source(json)?)
    }

    /// Load `source` at the exchange rate it carries.
    pub fn load(source: CatalogSource) -> Result<Self> {
        let rate = source.exchange_rate;
        Self::load_with_rate(source, rate)
    }

    /// Load `source`, converting every price at `exchange_rate` instead of
    /// the rate the document carries.
    ///
    /// # Errors
    ///
    /// [`Error::Data`] when the rate is not a positive finite number, when an
    /// entry has an unknown category, provider or billing type, a negative or
    /// non-finite price, or when two entries share an id.
    pub fn load_with_rate(source: CatalogSource, exchange_rate: f64) -> Result<Self> {
        if !exchange_rate.is_finite() || exchange_rate <= 0.0 {
            return Err(Error::Data(format!(
                "exchange rate must be a positive finite number, got {exchange_rate}"
            )));
        }

        let mut records = Vec::with_capacity(source.services.len());
        let mut index = HashMap::with_capacity(source.services.len());

        for (position, entry) in source.services.into_iter().enumerate() {
            let record = convert_entry(entry, exchange_rate).map_err(|error| {
                tracing::warn!(position, %error, "rejected catalog entry");
                error
            })?;
            if index.insert(record.id.clone(), position).is_some() {
                tracing::warn!(position, id = %record.id, "duplicate catalog id");
                return Err(Error::Data(format!("duplicate service id \"{}\"", record.id)));
            }
            records.push(record);
        }

        tracing::debug!(records = records.len(), exchange_rate, "catalog loaded");
        Ok(Self { records, index, exchange_rate })
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&ServiceRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// All records in catalog order.
    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    /// Borrowed view of every record in catalog order, the starting sequence
    /// for [`crate::query`] functions.
    pub fn all(&self) -> Vec<&ServiceRecord> {
        self.records.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// INR per USD used to populate every converted price.
    pub fn exchange_rate(&self) -> f64 {
        self.exchange_rate
    }
}

/// Deserialise a catalog source document without validating its entries.
pub fn parse_source(json: &str) -> Result<CatalogSource> {
    serde_json::from_str(json)
        .map_err(|error| Error::Data(format!("catalog source is not valid JSON: {error}")))
}

fn convert_entry(entry: RawServiceEntry, exchange_rate: f64) -> Result<ServiceRecord> {
    let category = Category::parse(&entry.category)
        .map_err(|error| in_entry(&entry.id, error))?;
    let provider = Provider::parse(&entry.provider)
        .map_err(|error| in_entry(&entry.id, error))?;
    let billing_type = BillingType::parse(&entry.pricing.billing_type)
        .map_err(|error| in_entry(&entry.id, error))?;

    let usd = entry.pricing.usd;
    if !usd.is_finite() || usd < 0.0 {
        return Err(Error::Data(format!(
            "service \"{}\": price must be a non-negative finite number, got {}",
            entry.id, usd
        )));
    }

    Ok(ServiceRecord {
        id: entry.id,
        name: entry.name,
        category,
        provider,
        pricing: Pricing {
            usd,
            inr: usd * exchange_rate,
            unit: entry.pricing.unit,
            billing_type,
        },
        description: entry.description,
        specifications: entry.specifications,
        region: entry.region,
    })
}

/// Prefix a data error with the id of the entry it came from.
fn in_entry(id: &str, error: Error) -> Error {
    Error::Data(format!("service \"{}\": {}", id, error.message()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawPricing;
    use alloc::collections::BTreeMap;
    use alloc::vec;

    fn entry(id: &str, category: &str, provider: &str, usd: f64) -> RawServiceEntry {
        RawServiceEntry {
            id: id.into(),
            name: id.into(),
            category: category.into(),
            provider: provider.into(),
            pricing: RawPricing {
                usd,
                unit: "hour".into(),
                billing_type: "hourly".into(),
            },
            description: String::new(),
            specifications: BTreeMap::new(),
            region: "us-east-1".into(),
        }
    }

    fn source(services: Vec<RawServiceEntry>) -> CatalogSource {
        CatalogSource { exchange_rate: 80.0, services }
    }

    #[test]
    fn builtin_catalog_loads_every_record() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.exchange_rate(), 83.15);
        for record in catalog.records() {
            assert_eq!(record.pricing.inr, record.pricing.usd * 83.15);
        }
    }

    #[test]
    fn builtin_catalog_keeps_source_order() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.records()[0].id, "aws-ec2-t3-micro");
        assert_eq!(catalog.records()[11].id, "gcp-cloud-sql-mysql");
        assert_eq!(
            catalog
                .get("azure-sql-basic")
                .unwrap()
                .specifications
                .get("DTU")
                .map(String::as_str),
            Some("5")
        );
    }

    #[test]
    fn converts_at_the_source_rate() {
        let catalog = Catalog::load(source(vec![entry("a", "compute", "aws", 2.0)])).unwrap();
        let record = catalog.get("a").unwrap();
        assert_eq!(record.pricing.inr, 160.0);
        assert_eq!(record.price(), 160.0);
    }

    #[test]
    fn override_rate_replaces_source_rate() {
        let catalog =
            Catalog::load_with_rate(source(vec![entry("a", "compute", "aws", 2.0)]), 10.0).unwrap();
        assert_eq!(catalog.get("a").unwrap().pricing.inr, 20.0);
        assert_eq!(catalog.exchange_rate(), 10.0);
    }

    #[test]
    fn unknown_category_fails_the_whole_load() {
        let result = Catalog::load(source(vec![
            entry("a", "compute", "aws", 1.0),
            entry("b", "quantum", "aws", 1.0),
        ]));
        match result {
            Err(Error::Data(message)) => {
                assert!(message.contains("\"b\""));
                assert!(message.contains("quantum"));
            }
            other => panic!("expected data error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_provider_is_a_data_error() {
        let result = Catalog::load(source(vec![entry("a", "compute", "oracle", 1.0)]));
        assert!(matches!(result, Err(Error::Data(_))));
    }

    #[test]
    fn unknown_billing_type_is_a_data_error() {
        let mut raw = entry("a", "compute", "aws", 1.0);
        raw.pricing.billing_type = "weekly".into();
        assert!(matches!(Catalog::load(source(vec![raw])), Err(Error::Data(_))));
    }

    #[test]
    fn negative_and_non_finite_prices_are_rejected() {
        assert!(matches!(
            Catalog::load(source(vec![entry("a", "storage", "gcp", -0.01)])),
            Err(Error::Data(_))
        ));
        assert!(matches!(
            Catalog::load(source(vec![entry("a", "storage", "gcp", f64::NAN)])),
            Err(Error::Data(_))
        ));
    }

    #[test]
    fn zero_price_is_accepted() {
        let catalog = Catalog::load(source(vec![entry("free", "security", "azure", 0.0)])).unwrap();
        assert_eq!(catalog.get("free").unwrap().price(), 0.0);
    }

    #[test]
    fn bad_exchange_rate_is_rejected() {
        for rate in [0.0, -1.0, f64::INFINITY] {
            let result = Catalog::load_with_rate(source(vec![]), rate);
            assert!(matches!(result, Err(Error::Data(_))), "rate {rate} accepted");
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::load(source(vec![
            entry("a", "compute", "aws", 1.0),
            entry("a", "storage", "gcp", 2.0),
        ]));
        assert!(matches!(result, Err(Error::Data(_))));
    }

    #[test]
    fn from_json_reads_camel_case_source_format() {
        let json = r#"{
            "exchangeRate": 2.0,
            "services": [{
                "id": "x",
                "name": "X",
                "category": "ai-ml",
                "provider": "gcp",
                "pricing": { "usd": 1.5, "unit": "request", "billingType": "per-request" },
                "description": "d",
                "specifications": { "GPU": "T4" },
                "region": "us-central1"
            }]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        let record = catalog.get("x").unwrap();
        assert_eq!(record.category, Category::AiMl);
        assert_eq!(record.pricing.billing_type, BillingType::PerRequest);
        assert_eq!(record.pricing.inr, 3.0);
    }

    #[test]
    fn malformed_json_is_a_data_error() {
        assert!(matches!(Catalog::from_json("{not json"), Err(Error::Data(_))));
    }
}
