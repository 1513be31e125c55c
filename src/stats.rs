//! Roster quality metrics.
//!
//! Computes summary indicators from a generated roster so callers can
//! display workload distribution or gate a draft before publishing it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Duty counts | Duties per staff member this week |
//! | Weekend counts | Saturday/Sunday duties per member |
//! | Coverage rate | Filled slots / total weekly slots |
//! | Duty spread | Busiest minus idlest member |

use std::collections::HashMap;

use crate::models::{RosterOutcome, StaffMember};
use crate::solver::SLOTS_PER_DAY;
use crate::week::{is_weekend, DAYS_PER_WEEK};

/// Workload indicators for one weekly roster.
#[derive(Debug, Clone)]
pub struct RosterStats {
    /// Duties per staff code this week.
    pub duty_counts: HashMap<String, usize>,
    /// Weekend duties per staff code this week.
    pub weekend_counts: HashMap<String, usize>,
    /// Fraction of the week's slots that are filled (0.0..1.0).
    pub coverage_rate: f64,
    /// Duty-count gap between the busiest and idlest member.
    pub duty_spread: usize,
}

impl RosterStats {
    /// Computes stats from an outcome and the staff it was built for.
    ///
    /// Members without a single duty still appear in the count maps
    /// with zero, so the spread reflects the whole staff list.
    pub fn calculate(outcome: &RosterOutcome, staff: &[StaffMember]) -> Self {
        let mut duty_counts: HashMap<String, usize> =
            staff.iter().map(|s| (s.code.clone(), 0)).collect();
        let mut weekend_counts: HashMap<String, usize> =
            staff.iter().map(|s| (s.code.clone(), 0)).collect();

        for a in &outcome.assignments {
            *duty_counts.entry(a.staff_code.clone()).or_insert(0) += 1;
            if is_weekend(a.date) {
                *weekend_counts.entry(a.staff_code.clone()).or_insert(0) += 1;
            }
        }

        let total_slots = DAYS_PER_WEEK * SLOTS_PER_DAY;
        let coverage_rate = outcome.assignments.len() as f64 / total_slots as f64;

        let duty_spread = match (duty_counts.values().max(), duty_counts.values().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        };

        Self {
            duty_counts,
            weekend_counts,
            coverage_rate,
            duty_spread,
        }
    }

    /// Whether the roster is fully staffed and no member carries more
    /// than `max_spread` duties over the idlest one.
    pub fn meets_thresholds(&self, max_spread: usize) -> bool {
        self.coverage_rate >= 1.0 && self.duty_spread <= max_spread
    }
}
