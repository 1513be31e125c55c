//! Staff preference records and their normalization.
//!
//! Preference data originates as loosely-typed per-employee records that
//! accumulated legacy spellings over several releases. [`RawPreferences`]
//! is the closed raw form (serde aliases absorb the legacy field names);
//! [`Preferences::from_raw`] is the single normalization boundary. No
//! untyped data crosses it: unparseable dates and out-of-range weekday
//! indices are dropped, unknown vocabulary falls back to safe defaults.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw per-employee preference record as stored by the staff forms.
///
/// All fields are optional; `preferred_days` is the historical spelling
/// of `preferred_weekdays` and is accepted via alias.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPreferences {
    /// Priority tier label (`一级`/`二级`/`三级` or digit spellings).
    #[serde(default)]
    pub employee_type: Option<String>,
    /// Specific unavailable dates, `YYYY-MM-DD`.
    #[serde(default)]
    pub blackout_dates: Vec<String>,
    /// Weekday indices (0=Mon..6=Sun) always unavailable.
    #[serde(default)]
    pub unavailable_weekdays: Vec<i64>,
    /// Weekday indices the member wants to work.
    #[serde(default, alias = "preferred_days")]
    pub preferred_weekdays: Vec<i64>,
    /// Duty cadence label (`无特定偏好`, `每周`, `每两周 (隔周)`, `每月`).
    #[serde(default)]
    pub preferred_cycle: Option<String>,
    /// Named statutory holidays the member wants to avoid.
    #[serde(default)]
    pub avoid_holidays: Vec<String>,
    /// Alternating-weekday partnership.
    #[serde(default)]
    pub periodic_rotation: Option<RawRotation>,
    /// Co-worker codes this member prefers to be paired with, in order.
    #[serde(default)]
    pub preferred_partners: Vec<String>,
}

/// Raw rotation sub-record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRotation {
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default)]
    pub day_idx: Option<i64>,
    #[serde(default)]
    pub parity: Option<String>,
}

/// Normalized scheduling preferences for one staff member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Specific dates the member is unavailable.
    pub blackout_dates: BTreeSet<NaiveDate>,
    /// Weekdays (0=Mon..6=Sun) the member is always unavailable.
    pub unavailable_weekdays: BTreeSet<u8>,
    /// Weekdays the member wants to work. For tier-1 members this is a
    /// hard allow-list; for tiers 2/3 a soft scoring bonus.
    pub preferred_weekdays: BTreeSet<u8>,
    /// Statutory holidays to avoid (hard only for tier-1).
    pub avoid_holidays: BTreeSet<String>,
    /// Minimum spacing between duties.
    pub preferred_cycle: DutyCycle,
    /// Alternating-weekday partnership, if configured.
    pub rotation: Option<Rotation>,
    /// Preferred co-workers, most preferred first.
    pub preferred_partners: Vec<String>,
}

/// Preferred duty cadence: the minimum gap since the member's last duty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyCycle {
    /// No spacing preference.
    #[default]
    None,
    /// At least a week between duties.
    Weekly,
    /// At least two weeks between duties.
    Biweekly,
    /// At least a month between duties.
    Monthly,
}

impl DutyCycle {
    /// Parses a cadence label. Unknown labels mean no preference.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::None;
        };
        // 每两周 contains 每周, so the longer spelling is matched first.
        if label.contains("每两周") || label.contains("隔周") {
            Self::Biweekly
        } else if label.contains("每月") {
            Self::Monthly
        } else if label.contains("每周") {
            Self::Weekly
        } else {
            Self::None
        }
    }

    /// Minimum days required since the last duty.
    pub fn min_gap_days(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Weekly => 7,
            Self::Biweekly => 14,
            Self::Monthly => 30,
        }
    }
}

/// ISO-week parity on which a rotation member takes the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekParity {
    /// ISO weeks 1, 3, 5, ...
    Odd,
    /// ISO weeks 2, 4, 6, ...
    Even,
}

impl WeekParity {
    /// Parses a parity label; the forms default to odd.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(l) if l.contains("even") || l.contains('双') => Self::Even,
            _ => Self::Odd,
        }
    }

    /// Whether this parity wins a week with the given oddness.
    #[inline]
    pub fn matches(self, iso_week_is_odd: bool) -> bool {
        match self {
            Self::Odd => iso_week_is_odd,
            Self::Even => !iso_week_is_odd,
        }
    }
}

/// A configured alternating-weekday partnership.
///
/// The member and `partner` alternate the given weekday by ISO-week
/// parity; on any given occurrence exactly one of the pair may serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    /// Code of the partner staff member.
    pub partner: String,
    /// Weekday index (0=Mon..6=Sun) being alternated.
    pub weekday: u8,
    /// Parity on which *this* member takes the slot.
    pub parity: WeekParity,
}

impl Preferences {
    /// Normalizes a raw record into typed preferences.
    ///
    /// Invalid dates and out-of-range weekday indices are skipped;
    /// a rotation without a partner or with a bad weekday is dropped.
    pub fn from_raw(raw: &RawPreferences) -> Self {
        let blackout_dates = raw
            .blackout_dates
            .iter()
            .filter_map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .collect();

        let rotation = raw.periodic_rotation.as_ref().and_then(|r| {
            let partner = r.partner.clone().filter(|p| !p.is_empty())?;
            let weekday = r.day_idx.filter(|&d| (0..7).contains(&d))? as u8;
            Some(Rotation {
                partner,
                weekday,
                parity: WeekParity::from_label(r.parity.as_deref()),
            })
        });

        Self {
            blackout_dates,
            unavailable_weekdays: normalize_weekdays(&raw.unavailable_weekdays),
            preferred_weekdays: normalize_weekdays(&raw.preferred_weekdays),
            avoid_holidays: raw.avoid_holidays.iter().cloned().collect(),
            preferred_cycle: DutyCycle::from_label(raw.preferred_cycle.as_deref()),
            rotation,
            preferred_partners: raw.preferred_partners.clone(),
        }
    }

    /// Builder: adds a blackout date.
    pub fn with_blackout(mut self, date: NaiveDate) -> Self {
        self.blackout_dates.insert(date);
        self
    }

    /// Builder: marks weekdays as always unavailable.
    pub fn with_unavailable_weekdays(mut self, weekdays: impl IntoIterator<Item = u8>) -> Self {
        self.unavailable_weekdays.extend(weekdays);
        self
    }

    /// Builder: sets preferred weekdays.
    pub fn with_preferred_weekdays(mut self, weekdays: impl IntoIterator<Item = u8>) -> Self {
        self.preferred_weekdays = weekdays.into_iter().collect();
        self
    }

    /// Builder: adds a holiday to avoid.
    pub fn with_avoided_holiday(mut self, name: impl Into<String>) -> Self {
        self.avoid_holidays.insert(name.into());
        self
    }

    /// Builder: sets the duty cadence.
    pub fn with_cycle(mut self, cycle: DutyCycle) -> Self {
        self.preferred_cycle = cycle;
        self
    }

    /// Builder: configures a rotation partnership.
    pub fn with_rotation(
        mut self,
        partner: impl Into<String>,
        weekday: u8,
        parity: WeekParity,
    ) -> Self {
        self.rotation = Some(Rotation {
            partner: partner.into(),
            weekday,
            parity,
        });
        self
    }

    /// Builder: sets preferred co-workers, most preferred first.
    pub fn with_preferred_partners(
        mut self,
        partners: impl IntoIterator<Item = String>,
    ) -> Self {
        self.preferred_partners = partners.into_iter().collect();
        self
    }
}

fn normalize_weekdays(raw: &[i64]) -> BTreeSet<u8> {
    raw.iter()
        .filter(|&&d| (0..7).contains(&d))
        .map(|&d| d as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_full_record() {
        let raw: RawPreferences = serde_json::from_str(
            r#"{
                "employee_type": "一级",
                "blackout_dates": ["2023-10-25", "not-a-date"],
                "unavailable_weekdays": [6, 9],
                "preferred_weekdays": [0, 1],
                "preferred_cycle": "每两周 (隔周)",
                "avoid_holidays": ["元旦"],
                "periodic_rotation": {"partner": "E", "day_idx": 4, "parity": "odd"},
                "preferred_partners": ["B", "C"]
            }"#,
        )
        .unwrap();

        let prefs = Preferences::from_raw(&raw);
        assert!(prefs
            .blackout_dates
            .contains(&NaiveDate::from_ymd_opt(2023, 10, 25).unwrap()));
        assert_eq!(prefs.blackout_dates.len(), 1); // bad date skipped
        assert_eq!(prefs.unavailable_weekdays.len(), 1); // 9 out of range
        assert_eq!(
            prefs.preferred_weekdays,
            BTreeSet::from([0, 1])
        );
        assert_eq!(prefs.preferred_cycle, DutyCycle::Biweekly);
        assert!(prefs.avoid_holidays.contains("元旦"));
        let rot = prefs.rotation.unwrap();
        assert_eq!(rot.partner, "E");
        assert_eq!(rot.weekday, 4);
        assert_eq!(rot.parity, WeekParity::Odd);
        assert_eq!(prefs.preferred_partners, vec!["B", "C"]);
    }

    #[test]
    fn test_legacy_preferred_days_alias() {
        let raw: RawPreferences =
            serde_json::from_str(r#"{"preferred_days": [2, 4]}"#).unwrap();
        let prefs = Preferences::from_raw(&raw);
        assert_eq!(prefs.preferred_weekdays, BTreeSet::from([2, 4]));
    }

    #[test]
    fn test_empty_record() {
        let raw: RawPreferences = serde_json::from_str("{}").unwrap();
        let prefs = Preferences::from_raw(&raw);
        assert!(prefs.blackout_dates.is_empty());
        assert!(prefs.preferred_weekdays.is_empty());
        assert_eq!(prefs.preferred_cycle, DutyCycle::None);
        assert!(prefs.rotation.is_none());
    }

    #[test]
    fn test_cycle_labels() {
        assert_eq!(DutyCycle::from_label(Some("每周")), DutyCycle::Weekly);
        assert_eq!(
            DutyCycle::from_label(Some("每两周 (隔周)")),
            DutyCycle::Biweekly
        );
        assert_eq!(DutyCycle::from_label(Some("每月")), DutyCycle::Monthly);
        assert_eq!(DutyCycle::from_label(Some("无特定偏好")), DutyCycle::None);
        assert_eq!(DutyCycle::from_label(None), DutyCycle::None);
    }

    #[test]
    fn test_cycle_gaps() {
        assert_eq!(DutyCycle::None.min_gap_days(), 0);
        assert_eq!(DutyCycle::Weekly.min_gap_days(), 7);
        assert_eq!(DutyCycle::Biweekly.min_gap_days(), 14);
        assert_eq!(DutyCycle::Monthly.min_gap_days(), 30);
    }

    #[test]
    fn test_parity_labels() {
        assert_eq!(WeekParity::from_label(Some("odd")), WeekParity::Odd);
        assert_eq!(WeekParity::from_label(Some("even")), WeekParity::Even);
        assert_eq!(WeekParity::from_label(None), WeekParity::Odd);
    }

    #[test]
    fn test_parity_matches() {
        assert!(WeekParity::Odd.matches(true));
        assert!(!WeekParity::Odd.matches(false));
        assert!(WeekParity::Even.matches(false));
    }

    #[test]
    fn test_rotation_without_partner_dropped() {
        let raw: RawPreferences = serde_json::from_str(
            r#"{"periodic_rotation": {"partner": "", "day_idx": 4}}"#,
        )
        .unwrap();
        assert!(Preferences::from_raw(&raw).rotation.is_none());
    }

    #[test]
    fn test_rotation_bad_weekday_dropped() {
        let raw: RawPreferences = serde_json::from_str(
            r#"{"periodic_rotation": {"partner": "E", "day_idx": 9}}"#,
        )
        .unwrap();
        assert!(Preferences::from_raw(&raw).rotation.is_none());
    }
}
