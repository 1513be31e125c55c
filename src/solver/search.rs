//! Backtracking slot-fill search.
//!
//! Slots are visited in date order, two per day. Each open slot gets
//! the permitted candidates shuffled and then stably sorted by their
//! [`CandidateKey`], so ties among equals are broken randomly while the
//! dominance order between keys is deterministic. A global step budget
//! bounds the search; exceeding it fails the attempt rather than
//! hanging the caller.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::models::StaffMember;
use crate::solver::constraints::{is_permitted, Mode};
use crate::solver::scoring::{candidate_key, FairnessContext};
use crate::solver::state::RunState;
use crate::solver::SLOTS_PER_DAY;
use crate::week::{week_dates, weekday_index, DAYS_PER_WEEK};

/// Fills every remaining slot of the week, returning whether a complete
/// roster was reached within the step budget.
pub(crate) fn fill<R: Rng>(
    staff: &[StaffMember],
    state: &mut RunState<'_>,
    mode: Mode,
    step_limit: u64,
    rng: &mut R,
) -> bool {
    let dates = week_dates(state.start_date);
    let mut steps = 0u64;
    let solved = backtrack(staff, state, mode, &dates, 0, 0, step_limit, &mut steps, rng);
    trace!(steps, solved, "search finished");
    solved
}

#[allow(clippy::too_many_arguments)]
fn backtrack<R: Rng>(
    staff: &[StaffMember],
    state: &mut RunState<'_>,
    mode: Mode,
    dates: &[chrono::NaiveDate; DAYS_PER_WEEK],
    day: usize,
    slot: usize,
    step_limit: u64,
    steps: &mut u64,
    rng: &mut R,
) -> bool {
    if day == DAYS_PER_WEEK {
        return true;
    }
    *steps += 1;
    if *steps > step_limit {
        return false;
    }

    let (next_day, next_slot) = if slot + 1 == SLOTS_PER_DAY {
        (day + 1, 0)
    } else {
        (day, slot + 1)
    };
    let date = dates[day];

    // Pre-assignment or seeding already filled this slot.
    if state.day_count(date) > slot {
        return backtrack(
            staff, state, mode, dates, next_day, next_slot, step_limit, steps, rng,
        );
    }

    // Sunday is not searched: it mirrors Saturday slot for slot.
    if weekday_index(date) == 6 {
        let Some(code) = state.assigned_on(dates[day - 1]).get(slot).cloned() else {
            return false;
        };
        if state.is_assigned(&code, date) {
            return false;
        }
        state.place(&code, date);
        if backtrack(
            staff, state, mode, dates, next_day, next_slot, step_limit, steps, rng,
        ) {
            return true;
        }
        state.unplace(&code, date);
        return false;
    }

    let mut candidates: Vec<&StaffMember> = staff
        .iter()
        .filter(|s| is_permitted(s, date, mode, state))
        .collect();
    candidates.shuffle(rng);

    let fairness = FairnessContext::compute(staff, state);
    let mut keyed: Vec<_> = candidates
        .into_iter()
        .map(|s| (candidate_key(s, date, staff, state, &fairness, rng), s))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);

    for (_, candidate) in keyed {
        state.place(&candidate.code, date);
        if backtrack(
            staff, state, mode, dates, next_day, next_slot, step_limit, steps, rng,
        ) {
            return true;
        }
        state.unplace(&candidate.code, date);
    }
    false
}
