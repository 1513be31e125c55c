//! Roster output model.
//!
//! A generated roster is an ordered list of duty assignments plus an
//! optional diagnostic. Assignments seeded from pre-existing records
//! keep their `locked` flag so callers can tell seeds from fresh
//! placements.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One person on duty on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    /// Duty date.
    pub date: NaiveDate,
    /// Code of the assigned staff member.
    pub staff_code: String,
    /// Whether this assignment was supplied by the caller as immovable.
    pub locked: bool,
}

impl DutyAssignment {
    /// Creates an unlocked assignment.
    pub fn new(date: NaiveDate, staff_code: impl Into<String>) -> Self {
        Self {
            date,
            staff_code: staff_code.into(),
            locked: false,
        }
    }

    /// Creates a locked (caller-supplied, immovable) assignment.
    pub fn locked(date: NaiveDate, staff_code: impl Into<String>) -> Self {
        Self {
            date,
            staff_code: staff_code.into(),
            locked: true,
        }
    }
}

/// Result of one `generate` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterOutcome {
    /// Assignments in date order, slot order within a date.
    /// Empty when both the strict and the loose attempt failed.
    pub assignments: Vec<DutyAssignment>,
    /// Failure report or relaxation warning, if any.
    pub diagnostic: Option<String>,
    /// Whether the weekend-repeat ban had to be relaxed to solve.
    pub relaxed: bool,
}

impl RosterOutcome {
    /// A successful outcome with no caveats.
    pub fn solved(assignments: Vec<DutyAssignment>) -> Self {
        Self {
            assignments,
            diagnostic: None,
            relaxed: false,
        }
    }

    /// A failed outcome carrying only a diagnostic.
    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            assignments: Vec::new(),
            diagnostic: Some(diagnostic.into()),
            relaxed: false,
        }
    }

    /// Whether any assignments were produced.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Codes on duty on a date, in slot order.
    pub fn staff_on(&self, date: NaiveDate) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.date == date)
            .map(|a| a.staff_code.as_str())
            .collect()
    }

    /// Codes on duty on a date as a set (for set-equality checks).
    pub fn staff_set_on(&self, date: NaiveDate) -> BTreeSet<&str> {
        self.staff_on(date).into_iter().collect()
    }

    /// Number of duties a staff member holds in this roster.
    pub fn count_for(&self, staff_code: &str) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.staff_code == staff_code)
            .count()
    }

    /// All distinct dates carrying assignments.
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.assignments.iter().map(|a| a.date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> RosterOutcome {
        RosterOutcome::solved(vec![
            DutyAssignment::new(d(2023, 10, 23), "A"),
            DutyAssignment::locked(d(2023, 10, 23), "B"),
            DutyAssignment::new(d(2023, 10, 24), "A"),
        ])
    }

    #[test]
    fn test_staff_on() {
        let r = sample();
        assert_eq!(r.staff_on(d(2023, 10, 23)), vec!["A", "B"]);
        assert_eq!(r.staff_on(d(2023, 10, 24)), vec!["A"]);
        assert!(r.staff_on(d(2023, 10, 25)).is_empty());
    }

    #[test]
    fn test_count_for() {
        let r = sample();
        assert_eq!(r.count_for("A"), 2);
        assert_eq!(r.count_for("B"), 1);
        assert_eq!(r.count_for("Z"), 0);
    }

    #[test]
    fn test_locked_flag() {
        let r = sample();
        assert!(!r.assignments[0].locked);
        assert!(r.assignments[1].locked);
    }

    #[test]
    fn test_failed_outcome() {
        let r = RosterOutcome::failed("no feasible roster");
        assert!(r.is_empty());
        assert_eq!(r.diagnostic.as_deref(), Some("no feasible roster"));
        assert!(!r.relaxed);
    }

    #[test]
    fn test_dates() {
        let r = sample();
        assert_eq!(r.dates().len(), 2);
    }
}
