//! Rule pre-assignment pass.
//!
//! Applies the three non-negotiable placement rules before the search
//! begins, in order, so later rules can react to earlier ones:
//!
//! 1. Tier-1 fixed placement on every preferred weekday of the week.
//! 2. Rotation-pair exclusivity by ISO-week parity (the loser is
//!    excluded and, if rule 1 placed them, retroactively removed).
//! 3. Legacy fixed-role placement for the two hardcoded legacy codes.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::models::{holiday_on, GroupType, StaffMember, LEGACY_RESTRICTED_CODE, LEGACY_SINGLE_CODE};
use crate::solver::constraints::{is_permitted, Mode};
use crate::solver::state::RunState;
use crate::solver::SLOTS_PER_DAY;
use crate::week::{iso_week_is_odd, week_dates, weekday_index};

/// Runs all three pre-assignment rules against the state.
pub(crate) fn apply(staff: &[StaffMember], state: &mut RunState<'_>, mode: Mode) {
    place_tier1_fixed(staff, state);
    apply_rotations(staff, state, mode);
    place_legacy_roles(staff, state, mode);
}

/// Rule 1: every tier-1 member with preferred weekdays is placed on
/// each matching day of the week. Only "day already holds two" stops a
/// placement; slot races between tier-1 members are left for the
/// rotation rule to correct.
fn place_tier1_fixed(staff: &[StaffMember], state: &mut RunState<'_>) {
    for s in staff {
        if !s.is_tier1() || s.preferences.preferred_weekdays.is_empty() {
            continue;
        }
        for date in week_dates(state.start_date) {
            let weekday = weekday_index(date);
            if !s.preferences.preferred_weekdays.contains(&weekday) {
                continue;
            }
            if s.preferences.blackout_dates.contains(&date)
                || s.preferences.unavailable_weekdays.contains(&weekday)
            {
                continue;
            }
            if holiday_on(date).is_some_and(|name| s.preferences.avoid_holidays.contains(name)) {
                continue;
            }
            if state.day_count(date) >= SLOTS_PER_DAY || state.is_assigned(&s.code, date) {
                continue;
            }
            debug!(code = %s.code, %date, "tier-1 fixed placement");
            state.place(&s.code, date);
        }
    }
}

/// Rule 2: for each configured rotation pair, the ISO-week parity of
/// the target date picks the winner; the loser is excluded for that
/// date. Two cases skip the rotation entirely: a tier-1 winner whose
/// own allow-list excludes the date, and a loser holding a locked seed
/// on the date (locked seeds are immovable).
fn apply_rotations(staff: &[StaffMember], state: &mut RunState<'_>, mode: Mode) {
    let mut handled: HashSet<(String, String, NaiveDate)> = HashSet::new();

    for s in staff {
        let Some(rotation) = s.preferences.rotation.clone() else {
            continue;
        };
        let Some(partner) = staff.iter().find(|p| p.code == rotation.partner) else {
            continue; // dangling partner reference, validation's concern
        };

        let date = state.start_date + Days::new(rotation.weekday as u64);
        let mut pair = [s.code.clone(), partner.code.clone()];
        pair.sort();
        let [a, b] = pair;
        if !handled.insert((a, b, date)) {
            continue; // mirrored config on the partner, already decided
        }

        let week_is_odd = iso_week_is_odd(date);
        let (winner, loser) = if rotation.parity.matches(week_is_odd) {
            (s, partner)
        } else {
            (partner, s)
        };

        // A tier-1 winner whose allow-list excludes this weekday makes
        // the whole rotation moot for the date.
        if winner.is_tier1()
            && !winner.preferences.preferred_weekdays.is_empty()
            && !winner
                .preferences
                .preferred_weekdays
                .contains(&rotation.weekday)
        {
            debug!(winner = %winner.code, %date, "rotation skipped, allow-list excludes date");
            continue;
        }

        // A caller-supplied locked seed is immovable and outranks the
        // rotation; leave the pair alone for this date.
        if state.is_locked(&loser.code, date) {
            debug!(loser = %loser.code, %date, "rotation skipped, loser holds a locked seed");
            continue;
        }

        state.exclude(&loser.code, date);
        if state.is_assigned(&loser.code, date) {
            // Rule 1 may have placed the loser; take them back out.
            state.unplace(&loser.code, date);
        }
        debug!(winner = %winner.code, loser = %loser.code, %date, "rotation decided");

        if state.day_count(date) < SLOTS_PER_DAY
            && !state.is_assigned(&winner.code, date)
            && is_permitted(winner, date, mode, state)
        {
            state.place(&winner.code, date);
        }
    }
}

/// Rule 3: backward-compatibility fixed roles for the two legacy
/// codes. Lowest priority; only fires into free slots.
fn place_legacy_roles(staff: &[StaffMember], state: &mut RunState<'_>, mode: Mode) {
    for s in staff {
        let weekdays: &[u8] = match (s.code.as_str(), s.group_type) {
            (LEGACY_RESTRICTED_CODE, GroupType::RestrictedFg) => &[0, 2, 4],
            (LEGACY_SINGLE_CODE, GroupType::SingleH) => &[1, 3],
            _ => continue,
        };
        for &weekday in weekdays {
            let date = state.start_date + Days::new(weekday as u64);
            // The Friday of the restricted group alternates by week.
            if weekday == 4 && !iso_week_is_odd(date) {
                continue;
            }
            if state.day_count(date) >= SLOTS_PER_DAY
                || state.is_assigned(&s.code, date)
                || !is_permitted(s, date, mode, state)
            {
                continue;
            }
            debug!(code = %s.code, %date, "legacy fixed-role placement");
            state.place(&s.code, date);
        }
    }
}
