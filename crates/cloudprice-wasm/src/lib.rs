// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! # cloudprice-wasm
//!
//! WebAssembly bindings for the cloudprice dashboard engine.
//!
//! This crate exposes the `cloudprice-core` API to the browser front end via
//! `wasm-bindgen`.  Every value crossing the boundary is a JSON string.
//!
//! ## Architecture
//!
//! Each session owns a [`PricingEngine`] over the bundled catalog plus the
//! caller state the screens edit: one [`CostEstimate`] and one
//! [`AlertBook`].  Sessions live in a thread-local registry keyed by integer
//! handles because WASM is single-threaded and `wasm_bindgen` cannot export
//! opaque Rust structs across the JS boundary without serialisation overhead.
//!
//! ## Exported Functions
//!
//! | Function                     | Description                                        |
//! |------------------------------|----------------------------------------------------|
//! | `create_session`             | Create a session with default config               |
//! | `create_session_with_config` | Create a session with explicit JSON config         |
//! | `destroy_session`            | Release a session handle                           |
//! | `list_services`              | Filter + sort the catalog (JSON criteria / sort)   |
//! | `get_service`                | One record by id                                   |
//! | `summarize`                  | Aggregate statistics over a filtered view          |
//! | `dashboard_overview`         | Starter overview and provider averages             |
//! | `add_line_item`              | Append a service to the session's estimate         |
//! | `remove_line_item`           | Remove an estimate row by position                 |
//! | `clear_estimate`             | Empty the estimate                                 |
//! | `get_estimate`               | Estimate rows plus the two-currency total          |
//! | `export_estimate_csv`        | CSV rendering of the estimate                      |
//! | `create_alert`               | Define a budget alert                              |
//! | `toggle_alert`               | Flip an alert's active flag                        |
//! | `delete_alert`               | Remove an alert                                    |
//! | `set_alert_usage`            | Record the usage figure for an alert               |
//! | `list_alerts`                | Alerts with derived status and usage percent       |
//! | `alert_summary`              | Total / active / critical / warning counts         |
//!
//! Failures are reported as `{"error":"..."}`.
//!
//! ## JavaScript Usage
//!
//! ```js
//! import init, {
//!   create_session,
//!   list_services,
//!   add_line_item,
//!   export_estimate_csv,
//!   create_alert,
//!   set_alert_usage,
//!   list_alerts,
//! } from '@cloudprice/wasm';
//!
//! await init();
//!
//! const handle = create_session();
//!
//! const rows = JSON.parse(list_services(
//!   handle,
//!   JSON.stringify({ category: 'compute', providers: ['aws', 'gcp'] }),
//!   JSON.stringify({ field: 'price', direction: 'desc' }),
//! ));
//!
//! add_line_item(handle, rows[0].id, 2, 720);
//! const csv = export_estimate_csv(handle);
//!
//! const alert = JSON.parse(create_alert(handle, 'Monthly Budget', 10000, 'inr'));
//! set_alert_usage(handle, alert.id, 9000);
//! console.log(JSON.parse(list_alerts(handle))[0].status); // "warning"
//! ```

use cloudprice_core::{
    alerts::{self, AlertBook},
    calculator::{CostEstimate, LineItem},
    config::Config,
    engine::PricingEngine,
    types::{AlertStatus, BudgetAlert, CostTotal, Currency, FilterCriteria, SortSpec},
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Session registry
// ---------------------------------------------------------------------------

/// One dashboard's engine plus the state its screens edit.
struct DashboardSession {
    engine: PricingEngine,
    estimate: CostEstimate,
    alerts: AlertBook,
}

impl DashboardSession {
    fn new(engine: PricingEngine) -> Self {
        Self {
            engine,
            estimate: CostEstimate::new(),
            alerts: AlertBook::new(),
        }
    }
}

// WASM is single-threaded; RefCell<HashMap<...>> is safe here.
thread_local! {
    static SESSIONS: RefCell<HashMap<u32, DashboardSession>> = RefCell::new(HashMap::new());
    static NEXT_HANDLE: RefCell<u32> = RefCell::new(0);
}

/// Allocate a new session handle. Handles wrap around at `u32::MAX - 1` to
/// reserve `u32::MAX` as the error sentinel.
fn next_handle() -> u32 {
    NEXT_HANDLE.with(|counter| {
        let handle = *counter.borrow();
        let next = if handle >= u32::MAX - 1 { 0 } else { handle + 1 };
        *counter.borrow_mut() = next;
        handle
    })
}

fn register(session: DashboardSession) -> u32 {
    let handle = next_handle();
    SESSIONS.with(|sessions| {
        sessions.borrow_mut().insert(handle, session);
    });
    handle
}

/// Helper: run a closure with mutable access to a session. Returns
/// `Err(message)` if the handle is unknown.
fn with_session_mut<F, R>(handle: u32, callback: F) -> Result<R, String>
where
    F: FnOnce(&mut DashboardSession) -> R,
{
    SESSIONS.with(|sessions| {
        let mut map = sessions.borrow_mut();
        match map.get_mut(&handle) {
            Some(session) => Ok(callback(session)),
            None => Err(format!("unknown session handle {}", handle)),
        }
    })
}

/// Helper: run a closure with shared access to a session.
fn with_session<F, R>(handle: u32, callback: F) -> Result<R, String>
where
    F: FnOnce(&DashboardSession) -> R,
{
    SESSIONS.with(|sessions| {
        let map = sessions.borrow();
        match map.get(&handle) {
            Some(session) => Ok(callback(session)),
            None => Err(format!("unknown session handle {}", handle)),
        }
    })
}

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn error_json(message: impl Display) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|error| error_json(format_args!("serialisation error: {}", error)))
}

/// Collapse a handle lookup and an operation result into one JSON reply.
fn reply(result: Result<String, String>) -> String {
    result.unwrap_or_else(|error| error_json(error))
}

/// Parse `json`, treating an empty string as the type's default.
fn parse_or_default<T: DeserializeOwned + Default>(json: &str, what: &str) -> Result<T, String> {
    if json.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(json).map_err(|error| format!("{} parse error: {}", what, error))
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// Create a session over the bundled catalog with default configuration and
/// return its integer handle, or `u32::MAX` if the catalog fails to load.
#[wasm_bindgen]
pub fn create_session() -> u32 {
    match PricingEngine::builtin(Config::default()) {
        Ok(engine) => register(DashboardSession::new(engine)),
        Err(_) => u32::MAX,
    }
}

/// Create a session with explicit configuration.
///
/// `config_json` must be a JSON string matching the [`Config`] shape; every
/// field is optional:
///
/// ```json
/// {
///   "exchange_rate": 84.0,
///   "default_sort": { "field": "name", "direction": "asc" },
///   "starter_markers": ["micro", "small", "B1s"]
/// }
/// ```
///
/// Returns the integer session handle, or `u32::MAX` on parse error or an
/// invalid exchange rate.
#[wasm_bindgen]
pub fn create_session_with_config(config_json: &str) -> u32 {
    let config: Config = match serde_json::from_str(config_json) {
        Ok(cfg) => cfg,
        Err(_) => return u32::MAX,
    };
    match PricingEngine::builtin(config) {
        Ok(engine) => register(DashboardSession::new(engine)),
        Err(_) => u32::MAX,
    }
}

/// Release the session associated with `handle`, freeing its memory.
///
/// After calling this function the handle is no longer valid.
#[wasm_bindgen]
pub fn destroy_session(handle: u32) {
    SESSIONS.with(|sessions| {
        sessions.borrow_mut().remove(&handle);
    });
}

// ---------------------------------------------------------------------------
// Catalog queries
// ---------------------------------------------------------------------------

/// Filter and sort the catalog.
///
/// `filter_json` matches the [`FilterCriteria`] shape (`""` or `"{}"` for no
/// filter).  `sort_json` matches [`SortSpec`]; `""` or `"null"` uses the
/// session's default sort.  Returns a JSON array of service records.
#[wasm_bindgen]
pub fn list_services(handle: u32, filter_json: &str, sort_json: &str) -> String {
    let criteria: FilterCriteria = match parse_or_default(filter_json, "filter") {
        Ok(criteria) => criteria,
        Err(error) => return error_json(error),
    };
    let sort: Option<SortSpec> = match parse_or_default(sort_json, "sort") {
        Ok(sort) => sort,
        Err(error) => return error_json(error),
    };

    reply(with_session(handle, |session| {
        to_json(&session.engine.query(&criteria, sort))
    }))
}

/// Return one service record by id.
#[wasm_bindgen]
pub fn get_service(handle: u32, service_id: &str) -> String {
    reply(with_session(handle, |session| match session.engine.service(service_id) {
        Some(record) => to_json(record),
        None => error_json(format_args!("unknown service id \"{}\"", service_id)),
    }))
}

/// Aggregate statistics over the records matching `filter_json`.
#[wasm_bindgen]
pub fn summarize(handle: u32, filter_json: &str) -> String {
    let criteria: FilterCriteria = match parse_or_default(filter_json, "filter") {
        Ok(criteria) => criteria,
        Err(error) => return error_json(error),
    };

    reply(with_session(handle, |session| match session.engine.summarize(&criteria) {
        Ok(summary) => to_json(&summary),
        Err(error) => error_json(error),
    }))
}

/// Starter-service overview and per-provider averages for the landing page.
#[wasm_bindgen]
pub fn dashboard_overview(handle: u32) -> String {
    reply(with_session(handle, |session| match session.engine.dashboard() {
        Ok(overview) => to_json(&overview),
        Err(error) => error_json(error),
    }))
}

// ---------------------------------------------------------------------------
// Cost estimate
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct EstimateView<'a> {
    items: &'a [LineItem],
    total: CostTotal,
}

/// Price `service_id` and append it to the session's estimate.  Returns the
/// new line item.
#[wasm_bindgen]
pub fn add_line_item(handle: u32, service_id: &str, quantity: u32, duration: u32) -> String {
    reply(with_session_mut(handle, |session| {
        match session.engine.line_item(service_id, quantity, duration) {
            Ok(item) => {
                let json = to_json(&item);
                session.estimate.push(item);
                json
            }
            Err(error) => error_json(error),
        }
    }))
}

/// Remove the line item at `index`.  Returns the removed item.
#[wasm_bindgen]
pub fn remove_line_item(handle: u32, index: u32) -> String {
    reply(with_session_mut(handle, |session| {
        match session.estimate.remove(index as usize) {
            Ok(item) => to_json(&item),
            Err(error) => error_json(error),
        }
    }))
}

/// Remove every line item from the session's estimate.  Returns `{}`.
#[wasm_bindgen]
pub fn clear_estimate(handle: u32) -> String {
    reply(with_session_mut(handle, |session| {
        session.estimate.clear();
        "{}".into()
    }))
}

/// Return the estimate rows and the grand total in both currencies.
#[wasm_bindgen]
pub fn get_estimate(handle: u32) -> String {
    reply(with_session(handle, |session| {
        to_json(&EstimateView {
            items: session.estimate.items(),
            total: session.estimate.total(),
        })
    }))
}

/// Render the session's estimate as CSV text.
///
/// Returns `{"error":"..."}` only for an unknown handle; an empty estimate
/// renders the header and a zero total row.
#[wasm_bindgen]
pub fn export_estimate_csv(handle: u32) -> String {
    reply(with_session(handle, |session| session.estimate.to_csv()))
}

// ---------------------------------------------------------------------------
// Budget alerts
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct AlertView<'a> {
    #[serde(flatten)]
    alert: &'a BudgetAlert,
    status: AlertStatus,
    usage_percent: f64,
}

/// Define a new active alert.  `currency` is `"usd"` or `"inr"`.  Returns the
/// new alert.
#[wasm_bindgen]
pub fn create_alert(handle: u32, name: &str, threshold: f64, currency: &str) -> String {
    let currency = match Currency::parse(currency) {
        Some(currency) => currency,
        None => return error_json(format_args!("unknown currency \"{}\"", currency)),
    };

    reply(with_session_mut(handle, |session| {
        match session.alerts.create(name, threshold, currency) {
            Ok(alert) => to_json(alert),
            Err(error) => error_json(error),
        }
    }))
}

/// Flip the active flag of alert `id`.  Returns `{"is_active": bool}`.
#[wasm_bindgen]
pub fn toggle_alert(handle: u32, id: u32) -> String {
    reply(with_session_mut(handle, |session| {
        match session.alerts.toggle(u64::from(id)) {
            Ok(is_active) => serde_json::json!({ "is_active": is_active }).to_string(),
            Err(error) => error_json(error),
        }
    }))
}

/// Remove alert `id`.  Returns the removed alert.
#[wasm_bindgen]
pub fn delete_alert(handle: u32, id: u32) -> String {
    reply(with_session_mut(handle, |session| {
        match session.alerts.delete(u64::from(id)) {
            Ok(alert) => to_json(&alert),
            Err(error) => error_json(error),
        }
    }))
}

/// Record the externally supplied usage figure for alert `id`.  Returns
/// `{}` on success.
#[wasm_bindgen]
pub fn set_alert_usage(handle: u32, id: u32, usage: f64) -> String {
    reply(with_session_mut(handle, |session| {
        match session.alerts.set_usage(u64::from(id), usage) {
            Ok(()) => "{}".into(),
            Err(error) => error_json(error),
        }
    }))
}

/// Return every alert with its derived `status` and capped `usage_percent`.
#[wasm_bindgen]
pub fn list_alerts(handle: u32) -> String {
    reply(with_session(handle, |session| {
        let views: Result<Vec<AlertView<'_>>, cloudprice_core::Error> = session
            .alerts
            .alerts()
            .iter()
            .map(|alert| {
                Ok(AlertView {
                    alert,
                    status: alerts::status(alert)?,
                    usage_percent: alerts::usage_percent(alert)?,
                })
            })
            .collect();
        match views {
            Ok(views) => to_json(&views),
            Err(error) => error_json(error),
        }
    }))
}

/// Return the headline alert counts.
#[wasm_bindgen]
pub fn alert_summary(handle: u32) -> String {
    reply(with_session(handle, |session| to_json(&session.alerts.summary())))
}

// ---------------------------------------------------------------------------
// wasm-bindgen-test stubs
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Native unit tests (run with `cargo test` outside of WASM)
// ---------------------------------------------------------------------------
