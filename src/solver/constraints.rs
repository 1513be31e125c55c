//! Hard placement constraints.
//!
//! [`is_permitted`] is a pure predicate: can this member be placed on
//! this date given the roster built so far? Checks run in a fixed
//! order and short-circuit. Tier-1 members get an override: once their
//! allow-list and holiday avoidance pass, everything below (quota,
//! cadence, weekend-repeat) is bypassed — their preferences are the
//! highest-priority hard contract.

use chrono::{Days, NaiveDate};

use crate::models::{holiday_on, StaffMember};
use crate::solver::state::RunState;
use crate::solver::WEEKLY_QUOTA;
use crate::week::{iso_week_is_odd, weekday_index};

/// Constraint profile for a search attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// All constraints, including the weekend-repeat ban.
    Strict,
    /// Weekend-repeat ban relaxed; everything else unchanged.
    Loose,
}

/// Whether `staff` may be placed on `date` given the current state.
pub(crate) fn is_permitted(
    staff: &StaffMember,
    date: NaiveDate,
    mode: Mode,
    state: &RunState<'_>,
) -> bool {
    let prefs = &staff.preferences;
    let weekday = weekday_index(date);

    // 1. Static unavailability.
    if prefs.blackout_dates.contains(&date) || prefs.unavailable_weekdays.contains(&weekday) {
        return false;
    }

    // 2. Already holding a slot that day.
    if state.is_assigned(&staff.code, date) {
        return false;
    }

    // 3. Lost this date to a rotation partner.
    if state.is_excluded(&staff.code, date) {
        return false;
    }

    // 4. Tier-1 override: allow-list and holiday avoidance only.
    if staff.is_tier1() {
        if !prefs.preferred_weekdays.is_empty() && !prefs.preferred_weekdays.contains(&weekday) {
            return false;
        }
        if let Some(name) = holiday_on(date) {
            if prefs.avoid_holidays.contains(name) {
                return false;
            }
        }
        return true;
    }

    // 5. Legacy group restriction (binds only the two legacy codes).
    if !staff.legacy_group_permits(weekday, iso_week_is_odd(date)) {
        return false;
    }

    // 6. Weekly quota. Saturday must reserve capacity for the linked
    //    Sunday, and the linked Sunday itself must be viable.
    let count = state.weekly_count(&staff.code);
    if weekday == 5 {
        if count + 2 > WEEKLY_QUOTA {
            return false;
        }
        let sunday = date + Days::new(1);
        if prefs.unavailable_weekdays.contains(&6) || prefs.blackout_dates.contains(&sunday) {
            return false;
        }
    } else if count >= WEEKLY_QUOTA {
        return false;
    }

    // 7. Cadence: minimum gap since the last duty.
    let min_gap = prefs.preferred_cycle.min_gap_days();
    if min_gap > 0 {
        if let Some(last) = state.history.last_duty_on(&staff.code) {
            if (date - last).num_days() < min_gap {
                return false;
            }
        }
    }

    // 8. Weekend-repeat ban, the one constraint loose mode lifts.
    if mode == Mode::Strict && weekday >= 5 && state.history.worked_last_weekend(&staff.code) {
        return false;
    }

    true
}
