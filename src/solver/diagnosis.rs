//! Failure diagnosis.
//!
//! When both search phases come up empty the caller wants to know *why*
//! before shrinking constraints by hand. The checks here are advisory
//! heuristics over the static inputs, not a replay of the search; they
//! name the most common dead ends in rough order of likelihood.

use chrono::NaiveDate;

use crate::models::{holiday_on, StaffMember};
use crate::solver::{SLOTS_PER_DAY, WEEKLY_QUOTA};
use crate::week::{week_dates, weekday_index, DAYS_PER_WEEK};

/// Builds a human-readable explanation of why no roster was found.
pub(crate) fn diagnose(staff: &[StaffMember], start_date: NaiveDate) -> String {
    let mut findings = Vec::new();
    let dates = week_dates(start_date);

    // Tier-1 members whose own preferences leave no feasible day.
    for s in staff.iter().filter(|s| s.is_tier1()) {
        let feasible = dates
            .iter()
            .filter(|&&date| tier1_day_feasible(s, date))
            .count();
        if feasible == 0 {
            findings.push(format!(
                "{}'s preferences leave no feasible day this week; \
                 relax their blackout dates, weekday restrictions, or holiday avoidance.",
                s.display()
            ));
        }
    }

    // More tier-1 fixed claims on a day than the day has slots.
    for date in dates {
        let weekday = weekday_index(date);
        let claimants: Vec<&StaffMember> = staff
            .iter()
            .filter(|s| {
                s.is_tier1()
                    && !s.preferences.preferred_weekdays.is_empty()
                    && s.preferences.preferred_weekdays.contains(&weekday)
            })
            .collect();
        if claimants.len() > SLOTS_PER_DAY {
            let names: Vec<String> = claimants.iter().map(|s| s.display()).collect();
            findings.push(format!(
                "{date} is claimed by {} high-priority members ({}) but only {SLOTS_PER_DAY} \
                 can serve per day.",
                claimants.len(),
                names.join(", ")
            ));
        }
    }

    // Raw capacity arithmetic.
    let slots = DAYS_PER_WEEK * SLOTS_PER_DAY;
    let capacity = staff.len() * WEEKLY_QUOTA as usize;
    if capacity < slots {
        findings.push(format!(
            "{} staff at {WEEKLY_QUOTA} duties each cover at most {capacity} of the {slots} \
             weekly slots; more staff are needed.",
            staff.len()
        ));
    }

    if findings.is_empty() {
        findings.push(
            "No single blocking rule was identified; the combination of preferences, \
             weekend headroom, and rotation exclusions is likely over-constrained."
                .to_string(),
        );
    }
    findings.join("\n")
}

/// Whether a tier-1 member's own hard preferences admit this date.
fn tier1_day_feasible(s: &StaffMember, date: NaiveDate) -> bool {
    let prefs = &s.preferences;
    let weekday = weekday_index(date);
    if !prefs.preferred_weekdays.is_empty() && !prefs.preferred_weekdays.contains(&weekday) {
        return false;
    }
    if prefs.blackout_dates.contains(&date) || prefs.unavailable_weekdays.contains(&weekday) {
        return false;
    }
    !holiday_on(date).is_some_and(|name| prefs.avoid_holidays.contains(name))
}

impl StaffMember {
    fn display(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.code),
            None => self.code.clone(),
        }
    }
}
