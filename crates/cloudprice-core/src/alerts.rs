// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Budget alert evaluation.
//!
//! An alert compares an externally supplied usage figure against a static
//! threshold.  Its status is derived on every call from
//! `ratio = current_usage / threshold`:
//!
//! | Ratio            | Status                      |
//! |------------------|-----------------------------|
//! | `ratio >= 1.0`   | [`AlertStatus::Critical`]   |
//! | `0.8 <= ratio`   | [`AlertStatus::Warning`]    |
//! | otherwise        | [`AlertStatus::Ok`]         |
//!
//! Thresholds are **always static**.  No status is cached on the alert, so a
//! usage change is visible to the very next evaluation.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{AlertStatus, AlertSummary, BudgetAlert, Currency};

/// Ratio at or above which an alert is critical.
pub const CRITICAL_RATIO: f64 = 1.0;

/// Ratio at or above which an alert is at least a warning.
pub const WARNING_RATIO: f64 = 0.8;

/// `current_usage / threshold`.
///
/// # Errors
///
/// [`Error::Validation`] when the threshold is not a positive finite number.
pub fn usage_ratio(alert: &BudgetAlert) -> Result<f64> {
    check_threshold(alert.threshold)?;
    Ok(alert.current_usage / alert.threshold)
}

/// Derive the status of `alert`.
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::{alerts, types::{AlertStatus, BudgetAlert, Currency}};
///
/// let mut alert = BudgetAlert {
///     id: 1,
///     name: "Monthly Budget Alert".into(),
///     threshold: 10_000.0,
///     current_usage: 7_500.0,
///     is_active: true,
///     currency: Currency::Inr,
/// };
/// assert_eq!(alerts::status(&alert).unwrap(), AlertStatus::Ok);
///
/// alert.current_usage = 9_000.0;
/// assert_eq!(alerts::status(&alert).unwrap(), AlertStatus::Warning);
///
/// alert.current_usage = 10_000.0;
/// assert_eq!(alerts::status(&alert).unwrap(), AlertStatus::Critical);
/// ```
pub fn status(alert: &BudgetAlert) -> Result<AlertStatus> {
    let ratio = usage_ratio(alert)?;
    Ok(if ratio >= CRITICAL_RATIO {
        AlertStatus::Critical
    } else if ratio >= WARNING_RATIO {
        AlertStatus::Warning
    } else {
        AlertStatus::Ok
    })
}

/// Usage as a percentage of the threshold, capped at 100 for progress bars.
pub fn usage_percent(alert: &BudgetAlert) -> Result<f64> {
    Ok((usage_ratio(alert)? * 100.0).min(100.0))
}

fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "threshold must be a positive number, got {threshold}"
        )))
    }
}

/// Caller-owned collection of budget alerts.
///
/// Identifiers come from a counter local to the book and are never reused
/// within it.
///
/// # Examples
///
/// ```rust
/// use cloudprice_core::{alerts::AlertBook, types::Currency};
///
/// let mut book = AlertBook::new();
/// let id = book.create("Compute Costs Warning", 5_000.0, Currency::Inr).unwrap().id;
///
/// book.set_usage(id, 5_200.0).unwrap();
/// assert_eq!(book.critical().len(), 1);
///
/// book.toggle(id).unwrap();
/// assert!(book.critical().is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertBook {
    alerts: Vec<BudgetAlert>,
    next_id: u64,
}

impl AlertBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from existing alerts, validating every threshold.
    /// New identifiers continue after the largest existing one.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a bad threshold, a repeated id, or an id of
    /// `u64::MAX` (no fresh id would remain after it).
    pub fn from_alerts(alerts: Vec<BudgetAlert>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        let mut next_id: u64 = 0;
        for alert in &alerts {
            check_threshold(alert.threshold)?;
            if !seen.insert(alert.id) {
                return Err(Error::Validation(format!("duplicate alert id {}", alert.id)));
            }
            let after = alert.id.checked_add(1).ok_or_else(|| {
                Error::Validation(format!("alert id {} leaves no fresh id", alert.id))
            })?;
            next_id = next_id.max(after);
        }
        Ok(Self { alerts, next_id })
    }

    /// Define a new active alert with zero usage.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a blank name, a non-positive threshold, or
    /// when the id counter is exhausted.
    pub fn create(&mut self, name: &str, threshold: f64, currency: Currency) -> Result<&BudgetAlert> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("alert name must not be empty".into()));
        }
        check_threshold(threshold)?;
        let following = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| Error::Validation("no fresh alert id remains".into()))?;

        let alert = BudgetAlert {
            id: self.next_id,
            name: String::from(name),
            threshold,
            current_usage: 0.0,
            is_active: true,
            currency,
        };
        self.next_id = following;
        tracing::debug!(id = alert.id, name = %alert.name, threshold, "alert created");
        self.alerts.push(alert);
        Ok(&self.alerts[self.alerts.len() - 1])
    }

    /// Flip the active flag of alert `id`. Returns the new flag.
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        let alert = self.get_mut(id)?;
        alert.is_active = !alert.is_active;
        tracing::debug!(id, active = alert.is_active, "alert toggled");
        Ok(alert.is_active)
    }

    /// Remove alert `id` and return it.
    pub fn delete(&mut self, id: u64) -> Result<BudgetAlert> {
        let position = self
            .alerts
            .iter()
            .position(|alert| alert.id == id)
            .ok_or_else(|| unknown_alert(id))?;
        tracing::debug!(id, "alert deleted");
        Ok(self.alerts.remove(position))
    }

    /// Record the externally supplied usage figure for alert `id`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an unknown id or a negative / non-finite
    /// usage figure.
    pub fn set_usage(&mut self, id: u64, usage: f64) -> Result<()> {
        if !usage.is_finite() || usage < 0.0 {
            return Err(Error::Validation(format!(
                "usage must be a non-negative number, got {usage}"
            )));
        }
        self.get_mut(id)?.current_usage = usage;
        Ok(())
    }

    pub fn get(&self, id: u64) -> Option<&BudgetAlert> {
        self.alerts.iter().find(|alert| alert.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut BudgetAlert> {
        self.alerts
            .iter_mut()
            .find(|alert| alert.id == id)
            .ok_or_else(|| unknown_alert(id))
    }

    /// All alerts in creation order.
    pub fn alerts(&self) -> &[BudgetAlert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Active alerts whose usage has reached the threshold.
    pub fn critical(&self) -> Vec<&BudgetAlert> {
        self.active_with(AlertStatus::Critical)
    }

    /// Active alerts between 80% and 100% of their threshold.
    pub fn warning(&self) -> Vec<&BudgetAlert> {
        self.active_with(AlertStatus::Warning)
    }

    fn active_with(&self, wanted: AlertStatus) -> Vec<&BudgetAlert> {
        self.alerts
            .iter()
            .filter(|alert| alert.is_active && status(alert).map_or(false, |s| s == wanted))
            .collect()
    }

    /// Headline counts for the alert overview.
    pub fn summary(&self) -> AlertSummary {
        AlertSummary {
            total: self.alerts.len(),
            active: self.alerts.iter().filter(|alert| alert.is_active).count(),
            critical: self.critical().len(),
            warning: self.warning().len(),
        }
    }
}

fn unknown_alert(id: u64) -> Error {
    Error::Validation(format!("no alert with id {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn alert(threshold: f64, current_usage: f64) -> BudgetAlert {
        BudgetAlert {
            id: 0,
            name: "budget".into(),
            threshold,
            current_usage,
            is_active: true,
            currency: Currency::Inr,
        }
    }

    #[test]
    fn status_boundaries() {
        assert_eq!(status(&alert(1.0, 1.0)).unwrap(), AlertStatus::Critical);
        assert_eq!(status(&alert(1.0, 0.8)).unwrap(), AlertStatus::Warning);
        assert_eq!(status(&alert(1.0, 0.79999)).unwrap(), AlertStatus::Ok);
        assert_eq!(status(&alert(10_000.0, 8_000.0)).unwrap(), AlertStatus::Warning);
        assert_eq!(status(&alert(10_000.0, 7_999.9)).unwrap(), AlertStatus::Ok);
        assert_eq!(status(&alert(10_000.0, 12_000.0)).unwrap(), AlertStatus::Critical);
    }

    #[test]
    fn non_positive_threshold_is_rejected() {
        for threshold in [0.0, -5.0, f64::NAN] {
            assert!(matches!(status(&alert(threshold, 1.0)), Err(Error::Validation(_))));
        }
    }

    #[test]
    fn percent_is_capped() {
        assert_eq!(usage_percent(&alert(5_000.0, 5_200.0)).unwrap(), 100.0);
        assert_eq!(usage_percent(&alert(2_000.0, 1_200.0)).unwrap(), 60.0);
    }

    #[test]
    fn create_validates_and_assigns_fresh_ids() {
        let mut book = AlertBook::new();
        assert!(matches!(book.create("   ", 10.0, Currency::Usd), Err(Error::Validation(_))));
        assert!(matches!(book.create("x", 0.0, Currency::Usd), Err(Error::Validation(_))));

        let first = book.create("first", 10.0, Currency::Usd).unwrap().clone();
        let second = book.create(" second ", 20.0, Currency::Inr).unwrap().clone();
        assert_ne!(first.id, second.id);
        assert_eq!(second.name, "second");
        assert_eq!(first.current_usage, 0.0);
        assert!(first.is_active);

        book.delete(second.id).unwrap();
        let third = book.create("third", 30.0, Currency::Inr).unwrap();
        assert_ne!(third.id, second.id);
    }

    #[test]
    fn critical_and_warning_track_usage_and_activity() {
        let mut book = AlertBook::new();
        let id = book.create("monthly", 10_000.0, Currency::Inr).unwrap().id;
        assert!(book.warning().is_empty());

        book.set_usage(id, 9_000.0).unwrap();
        assert_eq!(book.warning().len(), 1);
        assert!(book.critical().is_empty());

        book.set_usage(id, 10_000.0).unwrap();
        assert!(book.warning().is_empty());
        assert_eq!(book.critical().len(), 1);

        assert!(!book.toggle(id).unwrap());
        assert!(book.critical().is_empty());
        assert_eq!(book.summary(), AlertSummary { total: 1, active: 0, critical: 0, warning: 0 });
    }

    #[test]
    fn unknown_ids_and_bad_usage_are_validation_errors() {
        let mut book = AlertBook::new();
        let id = book.create("a", 1.0, Currency::Usd).unwrap().id;
        assert!(matches!(book.toggle(id + 7), Err(Error::Validation(_))));
        assert!(matches!(book.delete(id + 7), Err(Error::Validation(_))));
        assert!(matches!(book.set_usage(id, -1.0), Err(Error::Validation(_))));
        assert!(matches!(book.set_usage(id + 7, 1.0), Err(Error::Validation(_))));
    }

    #[test]
    fn from_alerts_continues_numbering_and_summarises() {
        let mut monthly = alert(10_000.0, 7_500.0);
        monthly.id = 1;
        let mut compute = alert(5_000.0, 5_200.0);
        compute.id = 2;
        let mut storage = alert(2_000.0, 1_900.0);
        storage.id = 3;
        storage.is_active = false;

        let mut book = AlertBook::from_alerts(vec![monthly, compute, storage]).unwrap();
        assert_eq!(book.summary(), AlertSummary { total: 3, active: 2, critical: 1, warning: 0 });
        assert_eq!(book.create("next", 1.0, Currency::Inr).unwrap().id, 4);

        assert!(AlertBook::from_alerts(vec![alert(0.0, 0.0)]).is_err());
    }

    #[test]
    fn from_alerts_rejects_the_last_representable_id() {
        let mut last = alert(100.0, 0.0);
        last.id = u64::MAX;
        assert!(matches!(AlertBook::from_alerts(vec![last]), Err(Error::Validation(_))));
    }

    #[test]
    fn counter_exhaustion_is_an_error_not_a_reused_id() {
        let mut near_end = alert(100.0, 0.0);
        near_end.id = u64::MAX - 1;
        let mut book = AlertBook::from_alerts(vec![near_end]).unwrap();

        assert!(matches!(book.create("overflow", 10.0, Currency::Inr), Err(Error::Validation(_))));
        assert_eq!(book.len(), 1);
        assert!(book.get(0).is_none());
    }

    #[test]
    fn from_alerts_rejects_duplicate_ids() {
        let mut first = alert(100.0, 0.0);
        first.id = 3;
        first.name = "a".into();
        let mut second = alert(200.0, 0.0);
        second.id = 3;
        second.name = "b".into();

        match AlertBook::from_alerts(vec![first, second]) {
            Err(Error::Validation(message)) => assert!(message.contains('3')),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
