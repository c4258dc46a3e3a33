// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Shared data types used across the catalog, query, calculator and alert
//! sub-systems.
//!
//! Every type here is [`serde::Serialize`] so it can be handed across the WASM
//! boundary as JSON.  All but the borrowing [`PriceSummary`] also implement
//! [`serde::Deserialize`].

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Cloud providers covered by the catalog.
///
/// Variants are declared in the lexicographic order of their ids so the
/// derived [`Ord`] matches a string comparison of [`Provider::id`].
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::types::Provider;
///
/// assert_eq!(Provider::parse("gcp").unwrap(), Provider::Gcp);
/// assert!(Provider::Aws < Provider::Azure);
/// assert!(Provider::parse("oracle").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
}

impl Provider {
    /// Every provider, in id order.
    pub const ALL: [Provider; 3] = [Provider::Aws, Provider::Azure, Provider::Gcp];

    /// Wire id used by catalog sources (`"aws"`, `"azure"`, `"gcp"`).
    pub fn id(self) -> &'static str {
        match self {
            Provider::Aws   => "aws",
            Provider::Azure => "azure",
            Provider::Gcp   => "gcp",
        }
    }

    /// Human-readable display name for UI surfaces.
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Aws   => "Amazon AWS",
            Provider::Azure => "Microsoft Azure",
            Provider::Gcp   => "Google Cloud",
        }
    }

    /// Parse a wire id. Unknown providers are a data error.
    pub fn parse(value: &str) -> Result<Self> {
        Provider::ALL
            .into_iter()
            .find(|provider| provider.id() == value)
            .ok_or_else(|| Error::Data(format!("unknown provider \"{}\"", value)))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

/// Service categories. The set is closed; catalog entries outside it are
/// rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Compute,
    Storage,
    Database,
    Networking,
    AiMl,
    Analytics,
    Security,
    Containers,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 8] = [
        Category::Compute,
        Category::Storage,
        Category::Database,
        Category::Networking,
        Category::AiMl,
        Category::Analytics,
        Category::Security,
        Category::Containers,
    ];

    /// Wire id used by catalog sources (e.g. `"ai-ml"`).
    pub fn id(self) -> &'static str {
        match self {
            Category::Compute    => "compute",
            Category::Storage    => "storage",
            Category::Database   => "database",
            Category::Networking => "networking",
            Category::AiMl       => "ai-ml",
            Category::Analytics  => "analytics",
            Category::Security   => "security",
            Category::Containers => "containers",
        }
    }

    /// Label shown in filter pickers.
    ///
    /// ```rust
    /// use cloudprice_core::types::Category;
    /// assert_eq!(Category::AiMl.label(), "AI/ML");
    /// ```
    pub fn label(self) -> &'static str {
        match self {
            Category::Compute    => "Compute",
            Category::Storage    => "Storage",
            Category::Database   => "Database",
            Category::Networking => "Networking",
            Category::AiMl       => "AI/ML",
            Category::Analytics  => "Analytics",
            Category::Security   => "Security",
            Category::Containers => "Containers",
        }
    }

    /// Parse a wire id. Unknown categories are a data error.
    pub fn parse(value: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.id() == value)
            .ok_or_else(|| Error::Data(format!("unknown category \"{}\"", value)))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

/// Unit of recurrence for a list price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingType {
    Hourly,
    Monthly,
    Yearly,
    PerRequest,
    PerGb,
}

impl BillingType {
    pub const ALL: [BillingType; 5] = [
        BillingType::Hourly,
        BillingType::Monthly,
        BillingType::Yearly,
        BillingType::PerRequest,
        BillingType::PerGb,
    ];

    pub fn id(self) -> &'static str {
        match self {
            BillingType::Hourly     => "hourly",
            BillingType::Monthly    => "monthly",
            BillingType::Yearly     => "yearly",
            BillingType::PerRequest => "per-request",
            BillingType::PerGb      => "per-gb",
        }
    }

    /// Parse a wire id. Unknown billing types are a data error.
    pub fn parse(value: &str) -> Result<Self> {
        BillingType::ALL
            .into_iter()
            .find(|billing| billing.id() == value)
            .ok_or_else(|| Error::Data(format!("unknown billing type \"{}\"", value)))
    }
}

/// Currency tag carried by budget alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
    #[default]
    Inr,
}

impl Currency {
    /// Parse a currency code, ignoring ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("usd") {
            Some(Currency::Usd)
        } else if value.eq_ignore_ascii_case("inr") {
            Some(Currency::Inr)
        } else {
            None
        }
    }

    /// Display symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog records
// ---------------------------------------------------------------------------

/// Price block of a loaded record, carrying both currencies.
///
/// `inr` is always `usd × exchange_rate` for the rate the catalog was loaded
/// with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    /// List price in the source currency (USD).
    pub usd: f64,
    /// List price in the converted display currency (INR).
    pub inr: f64,
    /// Free-text unit the price applies to (e.g. `"hour"`, `"GB/month"`).
    pub unit: String,
    pub billing_type: BillingType,
}

/// One immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Stable catalog identifier (e.g. `"aws-ec2-t3-micro"`).
    pub id: String,
    pub name: String,
    pub category: Category,
    pub provider: Provider,
    pub pricing: Pricing,
    pub description: String,
    /// Open key/value specification sheet, ordered by key.
    pub specifications: BTreeMap<String, String>,
    pub region: String,
}

impl ServiceRecord {
    /// Converted-currency unit price, the key used for filtering, sorting and
    /// aggregation.
    pub fn price(&self) -> f64 {
        self.pricing.inr
    }
}

// ---------------------------------------------------------------------------
// Catalog source format
// ---------------------------------------------------------------------------

/// Raw price block as found in a catalog source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPricing {
    pub usd: f64,
    pub unit: String,
    pub billing_type: String,
}

/// Raw catalog entry. Classification fields are open strings here and are
/// only narrowed to enums by the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawServiceEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub provider: String,
    pub pricing: RawPricing,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    #[serde(default)]
    pub region: String,
}

/// A complete catalog source document: raw entries plus one exchange rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSource {
    /// INR per USD applied to every entry.
    pub exchange_rate: f64,
    pub services: Vec<RawServiceEntry>,
}

// ---------------------------------------------------------------------------
// Query criteria
// ---------------------------------------------------------------------------

/// Optional-field filter configuration. Every present field is a conjunctive
/// predicate; absent fields match everything.
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::types::{Category, FilterCriteria, Provider};
///
/// let criteria = FilterCriteria {
///     category: Some(Category::Storage),
///     providers: Some(vec![Provider::Aws]),
///     ..FilterCriteria::default()
/// };
/// assert!(!criteria.is_empty());
/// assert!(FilterCriteria::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    /// Providers to keep. An empty set is treated the same as `None`.
    pub providers: Option<Vec<Provider>>,
    /// Inclusive upper bound on the converted-currency price.  A NaN bound
    /// is treated the same as `None`.
    pub max_price: Option<f64>,
    /// Case-insensitive substring matched against the service name. An empty
    /// string is treated the same as `None`.
    pub search: Option<String>,
    /// Exact region match.
    pub region: Option<String>,
}

impl FilterCriteria {
    /// `true` when no field would narrow the result.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.providers.as_ref().map_or(true, |providers| providers.is_empty())
            && self.max_price.map_or(true, f64::is_nan)
            && self.search.as_ref().map_or(true, |search| search.is_empty())
            && self.region.is_none()
    }

    /// Add `provider` to the provider set, or remove it if already present.
    /// Removing the last provider clears the criterion.
    ///
    /// ```rust
    /// use cloudprice_core::types::{FilterCriteria, Provider};
    ///
    /// let mut criteria = FilterCriteria::default();
    /// criteria.toggle_provider(Provider::Gcp);
    /// assert_eq!(criteria.providers, Some(vec![Provider::Gcp]));
    /// criteria.toggle_provider(Provider::Gcp);
    /// assert_eq!(criteria.providers, None);
    /// ```
    pub fn toggle_provider(&mut self, provider: Provider) {
        let mut providers = self.providers.take().unwrap_or_default();
        if let Some(position) = providers.iter().position(|p| *p == provider) {
            providers.remove(position);
        } else {
            providers.push(provider);
        }
        if !providers.is_empty() {
            self.providers = Some(providers);
        }
    }

    /// Reset every criterion.
    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }
}

/// Field a result list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    #[default]
    Price,
    Provider,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "name"     => Some(SortField::Name),
            "price"    => Some(SortField::Price),
            "provider" => Some(SortField::Provider),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" | "ascending"   => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending  => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Sort key and direction. Defaults to price ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column-header behaviour: selecting the current field flips the
    /// direction, selecting another field starts ascending.
    ///
    /// ```rust
    /// use cloudprice_core::types::{SortDirection, SortField, SortSpec};
    ///
    /// let mut spec = SortSpec::default();
    /// spec.toggle(SortField::Price);
    /// assert_eq!(spec.direction, SortDirection::Descending);
    /// spec.toggle(SortField::Name);
    /// assert_eq!(spec, SortSpec::new(SortField::Name, SortDirection::Ascending));
    /// ```
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Aggregate statistics over a non-empty record sequence. All prices are in
/// the converted currency.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSummary<'a> {
    pub count: usize,
    /// Cheapest record; the first encountered wins ties.
    pub min: &'a ServiceRecord,
    /// Most expensive record; the first encountered wins ties.
    pub max: &'a ServiceRecord,
    pub average: f64,
    /// Lower-middle element of the sorted prices for even lengths.
    pub median: f64,
    pub count_by_category: BTreeMap<Category, usize>,
    pub count_by_provider: BTreeMap<Provider, usize>,
}

/// Mean converted price for one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAverage {
    pub provider: Provider,
    pub average: f64,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Cost estimate
// ---------------------------------------------------------------------------

/// Grand total of a cost estimate, summed independently per currency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostTotal {
    pub usd: f64,
    pub inr: f64,
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// Derived status of a budget alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Ok,
    Warning,
    Critical,
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertStatus::Ok       => f.pad("ok"),
            AlertStatus::Warning  => f.pad("warning"),
            AlertStatus::Critical => f.pad("critical"),
        }
    }
}

/// A caller-defined budget threshold compared against externally supplied
/// usage. Status is never stored; see [`crate::alerts::status`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub id: u64,
    pub name: String,
    pub threshold: f64,
    pub current_usage: f64,
    pub is_active: bool,
    pub currency: Currency,
}

/// Headline counts shown above the alert list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total: usize,
    pub active: usize,
    pub critical: usize,
    pub warning: usize,
}
