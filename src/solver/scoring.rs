//! Candidate ordering heuristic.
//!
//! Candidates at each slot are ranked by [`CandidateKey`], compared
//! lexicographically — lower wins. The field order encodes strict
//! dominance: tier beats everything, then the consecutive-day penalty,
//! the weekend-repeat penalty, intra-tier fairness, weekend fairness,
//! the soft holiday penalty, the preferred-weekday and preferred-partner
//! bonuses, and finally random jitter for residual ties.

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::models::{holiday_on, PriorityTier, StaffMember};
use crate::solver::state::RunState;
use crate::week::is_weekend;
use crate::week::weekday_index;

/// Lexicographic ordering key for one candidate at one slot.
///
/// Field order is the dominance order; derive(Ord) compares
/// component-wise, so no magic score offsets are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct CandidateKey {
    /// Priority tier rank (1 = highest).
    pub tier: u8,
    /// Worked the immediately preceding calendar day.
    pub consecutive_day: bool,
    /// On a weekend slot while having worked the previous weekend.
    pub weekend_repeat: bool,
    /// Running total minus the tier average, in thousandths.
    pub fairness_milli: i64,
    /// Weekend-count delta against the tier average, weekend slots only.
    pub weekend_fairness_milli: i64,
    /// The date falls on a holiday the candidate avoids (soft, tiers 2/3).
    pub avoided_holiday: bool,
    /// -1 when the date's weekday is preferred (soft, tiers 2/3).
    pub weekday_preference: i8,
    /// Negative rank when a tier-1 member on this date prefers the
    /// candidate as partner; more negative = earlier in their list.
    pub partner_bonus: i64,
    /// Random tie-breaker.
    pub jitter: u8,
}

/// Per-tier running averages used for the fairness components.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FairnessContext {
    /// Average running total per tier rank (index 0 = tier 1).
    totals: [f64; 3],
    /// Average weekend count per tier rank.
    weekend: [f64; 3],
}

impl FairnessContext {
    /// Computes the current averages over (history + in-progress) totals.
    pub fn compute(staff: &[StaffMember], state: &RunState<'_>) -> Self {
        let mut sums = [0.0f64; 3];
        let mut weekend_sums = [0.0f64; 3];
        let mut counts = [0usize; 3];

        for s in staff {
            let idx = (s.tier.rank() - 1) as usize;
            sums[idx] += state.running_total(&s.code) as f64;
            weekend_sums[idx] += state.history.weekend_count(&s.code) as f64;
            counts[idx] += 1;
        }

        let mut ctx = Self::default();
        for i in 0..3 {
            if counts[i] > 0 {
                ctx.totals[i] = sums[i] / counts[i] as f64;
                ctx.weekend[i] = weekend_sums[i] / counts[i] as f64;
            }
        }
        ctx
    }

    fn total_avg(&self, tier: PriorityTier) -> f64 {
        self.totals[(tier.rank() - 1) as usize]
    }

    fn weekend_avg(&self, tier: PriorityTier) -> f64 {
        self.weekend[(tier.rank() - 1) as usize]
    }
}

/// Builds the ordering key for one candidate at one slot.
pub(crate) fn candidate_key<R: Rng>(
    candidate: &StaffMember,
    date: NaiveDate,
    staff: &[StaffMember],
    state: &RunState<'_>,
    fairness: &FairnessContext,
    rng: &mut R,
) -> CandidateKey {
    let prefs = &candidate.preferences;
    let weekend = is_weekend(date);
    let previous_day = date - Days::new(1);

    let consecutive_day = state.is_assigned(&candidate.code, previous_day)
        || state.history.last_duty_on(&candidate.code) == Some(previous_day);

    let weekend_repeat = weekend && state.history.worked_last_weekend(&candidate.code);

    let total = state.running_total(&candidate.code) as f64;
    let fairness_milli = ((total - fairness.total_avg(candidate.tier)) * 1000.0) as i64;

    let weekend_fairness_milli = if weekend {
        let count = state.history.weekend_count(&candidate.code) as f64;
        ((count - fairness.weekend_avg(candidate.tier)) * 1000.0) as i64
    } else {
        0
    };

    let soft_prefs = !candidate.is_tier1();
    let avoided_holiday = soft_prefs
        && holiday_on(date).is_some_and(|name| prefs.avoid_holidays.contains(name));

    let weekday_preference =
        if soft_prefs && prefs.preferred_weekdays.contains(&weekday_index(date)) {
            -1
        } else {
            0
        };

    CandidateKey {
        tier: candidate.tier.rank(),
        consecutive_day,
        weekend_repeat,
        fairness_milli,
        weekend_fairness_milli,
        avoided_holiday,
        weekday_preference,
        partner_bonus: partner_bonus(candidate, date, staff, state),
        jitter: rng.random_range(0..8),
    }
}

/// Bonus when a tier-1 member already placed on `date` lists the
/// candidate among their preferred partners. Earlier list positions
/// give a stronger (more negative) bonus; the best across all tier-1
/// occupants wins.
fn partner_bonus(
    candidate: &StaffMember,
    date: NaiveDate,
    staff: &[StaffMember],
    state: &RunState<'_>,
) -> i64 {
    let mut bonus = 0i64;
    for code in state.assigned_on(date) {
        let Some(placed) = staff.iter().find(|s| &s.code == code) else {
            continue;
        };
        if !placed.is_tier1() {
            continue;
        }
        let partners = &placed.preferences.preferred_partners;
        if let Some(pos) = partners.iter().position(|p| p == &candidate.code) {
            bonus = bonus.min(-((partners.len() - pos) as i64));
        }
    }
    bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Preferences, RosterHistory};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn base_key() -> CandidateKey {
        CandidateKey {
            tier: 2,
            consecutive_day: false,
            weekend_repeat: false,
            fairness_milli: 0,
            weekend_fairness_milli: 0,
            avoided_holiday: false,
            weekday_preference: 0,
            partner_bonus: 0,
            jitter: 0,
        }
    }

    #[test]
    fn test_tier_dominates_fairness() {
        let tier1_overworked = CandidateKey {
            tier: 1,
            fairness_milli: 10_000,
            ..base_key()
        };
        let tier2_idle = CandidateKey {
            tier: 2,
            fairness_milli: -10_000,
            ..base_key()
        };
        assert!(tier1_overworked < tier2_idle);
    }

    #[test]
    fn test_consecutive_day_dominates_fairness() {
        let rested_but_loaded = CandidateKey {
            fairness_milli: 5_000,
            ..base_key()
        };
        let consecutive_but_idle = CandidateKey {
            consecutive_day: true,
            fairness_milli: -5_000,
            ..base_key()
        };
        assert!(rested_but_loaded < consecutive_but_idle);
    }

    #[test]
    fn test_fairness_orders_within_tier() {
        let lighter = CandidateKey {
            fairness_milli: -1_000,
            jitter: 7,
            ..base_key()
        };
        let heavier = CandidateKey {
            fairness_milli: 1_000,
            jitter: 0,
            ..base_key()
        };
        assert!(lighter < heavier);
    }

    #[test]
    fn test_preference_breaks_fairness_tie() {
        let preferred = CandidateKey {
            weekday_preference: -1,
            ..base_key()
        };
        assert!(preferred < base_key());
    }

    #[test]
    fn test_candidate_key_fields() {
        let mut history = RosterHistory::new();
        history.last_duty.insert("A".into(), d(2023, 10, 22));
        history.last_weekend_duty.insert("A".into(), true);

        let staff = vec![
            StaffMember::new("A"),
            StaffMember::new("B")
                .with_preferences(Preferences::default().with_preferred_weekdays([0])),
        ];
        let state = RunState::new(d(2023, 10, 23), &history);
        let fairness = FairnessContext::compute(&staff, &state);
        let mut rng = StdRng::seed_from_u64(7);

        // A worked yesterday (2023-10-22): consecutive on Monday.
        let key_a = candidate_key(&staff[0], d(2023, 10, 23), &staff, &state, &fairness, &mut rng);
        assert!(key_a.consecutive_day);
        assert!(!key_a.weekend_repeat);

        // A on Saturday: weekend repeat fires.
        let key_sat = candidate_key(&staff[0], d(2023, 10, 28), &staff, &state, &fairness, &mut rng);
        assert!(key_sat.weekend_repeat);

        // B prefers Mondays.
        let key_b = candidate_key(&staff[1], d(2023, 10, 23), &staff, &state, &fairness, &mut rng);
        assert_eq!(key_b.weekday_preference, -1);
    }

    #[test]
    fn test_partner_bonus() {
        use crate::models::PriorityTier;
        let history = RosterHistory::new();
        let staff = vec![
            StaffMember::new("A")
                .with_tier(PriorityTier::Tier1)
                .with_preferences(
                    Preferences::default()
                        .with_preferred_partners(["B".to_string(), "C".to_string()]),
                ),
            StaffMember::new("B"),
            StaffMember::new("C"),
            StaffMember::new("D"),
        ];
        let mut state = RunState::new(d(2023, 10, 23), &history);
        state.place("A", d(2023, 10, 23));

        // B is first in A's list, C second, D absent.
        assert_eq!(partner_bonus(&staff[1], d(2023, 10, 23), &staff, &state), -2);
        assert_eq!(partner_bonus(&staff[2], d(2023, 10, 23), &staff, &state), -1);
        assert_eq!(partner_bonus(&staff[3], d(2023, 10, 23), &staff, &state), 0);
    }

    #[test]
    fn test_soft_holiday_penalty() {
        let history = RosterHistory::new();
        let staff = vec![StaffMember::new("A")
            .with_preferences(Preferences::default().with_avoided_holiday("元旦"))];
        let state = RunState::new(d(2024, 12, 30), &history);
        let fairness = FairnessContext::compute(&staff, &state);
        let mut rng = StdRng::seed_from_u64(0);

        let key = candidate_key(&staff[0], d(2025, 1, 1), &staff, &state, &fairness, &mut rng);
        assert!(key.avoided_holiday);
        let key2 = candidate_key(&staff[0], d(2024, 12, 30), &staff, &state, &fairness, &mut rng);
        assert!(!key2.avoided_holiday);
    }
}
