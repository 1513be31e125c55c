//! Mutable per-attempt search state.
//!
//! One [`RunState`] is built fresh for each strict or loose attempt,
//! seeded from caller-supplied locked assignments, mutated during the
//! pre-assignment pass and the backtracking search, and turned into the
//! final assignment list on success. It never outlives a `generate`
//! call.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Days, NaiveDate};

use crate::models::{DutyAssignment, RosterHistory};

/// Roster-in-progress plus the bookkeeping the constraint checker and
/// scoring heuristic read.
#[derive(Debug)]
pub(crate) struct RunState<'a> {
    /// Monday beginning the target week.
    pub start_date: NaiveDate,
    /// Caller-supplied lifetime history (read-only).
    pub history: &'a RosterHistory,
    /// date → assigned codes, slot order (≤ 2 per date).
    roster: BTreeMap<NaiveDate, Vec<String>>,
    /// code → duties placed so far this run.
    weekly_counts: HashMap<String, u32>,
    /// date → codes forbidden because a rotation partner won the slot.
    rotation_exclusions: HashMap<NaiveDate, HashSet<String>>,
    /// Seeded (date, code) pairs that must be reported as locked.
    locked: HashSet<(NaiveDate, String)>,
}

impl<'a> RunState<'a> {
    pub fn new(start_date: NaiveDate, history: &'a RosterHistory) -> Self {
        Self {
            start_date,
            history,
            roster: BTreeMap::new(),
            weekly_counts: HashMap::new(),
            rotation_exclusions: HashMap::new(),
            locked: HashSet::new(),
        }
    }

    /// Seeds the roster from pre-existing assignments for the target
    /// week. Out-of-week entries are ignored; days are capped at two
    /// occupants and duplicates are dropped.
    pub fn seed(&mut self, existing: &[DutyAssignment], slots_per_day: usize) {
        let week_end = self.start_date + Days::new(7);
        for a in existing {
            if a.date < self.start_date || a.date >= week_end {
                continue;
            }
            if self.day_count(a.date) >= slots_per_day || self.is_assigned(&a.staff_code, a.date) {
                continue;
            }
            self.place(&a.staff_code, a.date);
            self.locked.insert((a.date, a.staff_code.clone()));
        }
    }

    /// Codes assigned on a date, slot order.
    pub fn assigned_on(&self, date: NaiveDate) -> &[String] {
        self.roster.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of occupied slots on a date.
    #[inline]
    pub fn day_count(&self, date: NaiveDate) -> usize {
        self.assigned_on(date).len()
    }

    /// Whether a code already holds a slot on a date.
    pub fn is_assigned(&self, code: &str, date: NaiveDate) -> bool {
        self.assigned_on(date).iter().any(|c| c == code)
    }

    /// Duties placed for a code so far this run.
    #[inline]
    pub fn weekly_count(&self, code: &str) -> u32 {
        self.weekly_counts.get(code).copied().unwrap_or(0)
    }

    /// Lifetime total plus this run's placements, the balancing basis.
    #[inline]
    pub fn running_total(&self, code: &str) -> u32 {
        self.history.duty_count(code) + self.weekly_count(code)
    }

    /// Places a code into the next free slot of a date.
    pub fn place(&mut self, code: &str, date: NaiveDate) {
        self.roster.entry(date).or_default().push(code.to_string());
        *self.weekly_counts.entry(code.to_string()).or_insert(0) += 1;
    }

    /// Undoes a placement (backtracking).
    pub fn unplace(&mut self, code: &str, date: NaiveDate) {
        if let Some(day) = self.roster.get_mut(&date) {
            if let Some(pos) = day.iter().position(|c| c == code) {
                day.remove(pos);
            }
            if day.is_empty() {
                self.roster.remove(&date);
            }
        }
        if let Some(count) = self.weekly_counts.get_mut(code) {
            *count = count.saturating_sub(1);
        }
    }

    /// Forbids a code on a date (rotation loser).
    pub fn exclude(&mut self, code: &str, date: NaiveDate) {
        self.rotation_exclusions
            .entry(date)
            .or_default()
            .insert(code.to_string());
    }

    /// Whether a (date, code) placement is a caller-supplied locked seed.
    pub fn is_locked(&self, code: &str, date: NaiveDate) -> bool {
        self.locked.iter().any(|(d, c)| *d == date && c == code)
    }

    /// Whether a code is rotation-excluded on a date.
    pub fn is_excluded(&self, code: &str, date: NaiveDate) -> bool {
        self.rotation_exclusions
            .get(&date)
            .is_some_and(|set| set.contains(code))
    }

    /// Converts the filled roster into the output assignment list,
    /// dates ascending, slot order within each date.
    pub fn into_assignments(self) -> Vec<DutyAssignment> {
        let mut out = Vec::new();
        for (date, codes) in self.roster {
            for code in codes {
                let is_locked = self.locked.contains(&(date, code.clone()));
                out.push(DutyAssignment {
                    date,
                    staff_code: code,
                    locked: is_locked,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_place_and_unplace() {
        let history = RosterHistory::new();
        let mut state = RunState::new(d(2023, 10, 23), &history);

        state.place("A", d(2023, 10, 23));
        state.place("B", d(2023, 10, 23));
        assert_eq!(state.assigned_on(d(2023, 10, 23)), ["A", "B"]);
        assert_eq!(state.weekly_count("A"), 1);

        state.unplace("A", d(2023, 10, 23));
        assert_eq!(state.assigned_on(d(2023, 10, 23)), ["B"]);
        assert_eq!(state.weekly_count("A"), 0);
    }

    #[test]
    fn test_running_total_includes_history() {
        let mut history = RosterHistory::new();
        history.duty_counts.insert("A".into(), 10);
        let mut state = RunState::new(d(2023, 10, 23), &history);
        assert_eq!(state.running_total("A"), 10);
        state.place("A", d(2023, 10, 23));
        assert_eq!(state.running_total("A"), 11);
    }

    #[test]
    fn test_seed_caps_and_filters() {
        let history = RosterHistory::new();
        let mut state = RunState::new(d(2023, 10, 23), &history);

        let existing = vec![
            DutyAssignment::locked(d(2023, 10, 23), "A"),
            DutyAssignment::locked(d(2023, 10, 23), "B"),
            DutyAssignment::locked(d(2023, 10, 23), "C"), // over capacity
            DutyAssignment::locked(d(2023, 10, 23), "A"), // duplicate
            DutyAssignment::locked(d(2023, 10, 16), "D"), // out of week
        ];
        state.seed(&existing, 2);

        assert_eq!(state.assigned_on(d(2023, 10, 23)), ["A", "B"]);
        assert_eq!(state.day_count(d(2023, 10, 16)), 0);
    }

    #[test]
    fn test_exclusions() {
        let history = RosterHistory::new();
        let mut state = RunState::new(d(2023, 10, 23), &history);
        state.exclude("E", d(2023, 10, 27));
        assert!(state.is_excluded("E", d(2023, 10, 27)));
        assert!(!state.is_excluded("E", d(2023, 10, 28)));
        assert!(!state.is_excluded("D", d(2023, 10, 27)));
    }

    #[test]
    fn test_into_assignments_keeps_locked_flag() {
        let history = RosterHistory::new();
        let mut state = RunState::new(d(2023, 10, 23), &history);
        state.seed(&[DutyAssignment::locked(d(2023, 10, 23), "A")], 2);
        state.place("B", d(2023, 10, 23));

        let out = state.into_assignments();
        assert_eq!(out.len(), 2);
        assert!(out[0].locked);
        assert!(!out[1].locked);
    }
}
