//! Carried-over duty history.
//!
//! The generator balances workload against lifetime counts supplied by
//! the caller. A caller running week after week threads the history
//! forward: generate, [`RosterHistory::absorb`] the outcome, repeat.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::RosterOutcome;
use crate::week::is_weekend;

/// Per-staff duty history carried between weekly runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterHistory {
    /// Lifetime duty count per staff code.
    pub duty_counts: HashMap<String, u32>,
    /// Most recent duty date per staff code.
    pub last_duty: HashMap<String, NaiveDate>,
    /// Whether the member worked the immediately preceding weekend.
    pub last_weekend_duty: HashMap<String, bool>,
    /// Lifetime weekend-duty count per staff code.
    pub weekend_duty_counts: HashMap<String, u32>,
}

impl RosterHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifetime duty count for a code (0 when unknown).
    #[inline]
    pub fn duty_count(&self, code: &str) -> u32 {
        self.duty_counts.get(code).copied().unwrap_or(0)
    }

    /// Lifetime weekend-duty count for a code.
    #[inline]
    pub fn weekend_count(&self, code: &str) -> u32 {
        self.weekend_duty_counts.get(code).copied().unwrap_or(0)
    }

    /// Most recent duty date for a code.
    #[inline]
    pub fn last_duty_on(&self, code: &str) -> Option<NaiveDate> {
        self.last_duty.get(code).copied()
    }

    /// Whether the member worked the preceding weekend.
    #[inline]
    pub fn worked_last_weekend(&self, code: &str) -> bool {
        self.last_weekend_duty.get(code).copied().unwrap_or(false)
    }

    /// Folds one week's outcome into the history.
    ///
    /// Updates duty counts, last-duty dates, and weekend counts, and
    /// resets the weekend flag: only members who worked this week's
    /// weekend carry `last_weekend_duty == true` into the next run.
    pub fn absorb(&mut self, outcome: &RosterOutcome) {
        for flag in self.last_weekend_duty.values_mut() {
            *flag = false;
        }

        for a in &outcome.assignments {
            *self.duty_counts.entry(a.staff_code.clone()).or_insert(0) += 1;

            let entry = self
                .last_duty
                .entry(a.staff_code.clone())
                .or_insert(a.date);
            if a.date > *entry {
                *entry = a.date;
            }

            if is_weekend(a.date) {
                *self
                    .weekend_duty_counts
                    .entry(a.staff_code.clone())
                    .or_insert(0) += 1;
                self.last_weekend_duty.insert(a.staff_code.clone(), true);
            } else {
                self.last_weekend_duty
                    .entry(a.staff_code.clone())
                    .or_insert(false);
            }
        }
    }
}
