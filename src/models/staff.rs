//! Staff member model.
//!
//! A staff member is identified by a short unique `code` (the key used
//! throughout the roster). The priority tier controls whether that
//! member's preferences are treated as hard or soft constraints; the
//! legacy group type survives only for two hardcoded codes.

use serde::{Deserialize, Serialize};

use super::preference::{Preferences, RawPreferences};

/// Legacy code whose group may restrict it to Mon/Wed/alternating-Fri.
pub const LEGACY_RESTRICTED_CODE: &str = "F";
/// Legacy code whose group may restrict it to Tue/Thu.
pub const LEGACY_SINGLE_CODE: &str = "H";

/// A member of the duty roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    /// Short unique identifier (immutable key).
    pub code: String,
    /// Display name.
    pub name: Option<String>,
    /// Priority tier; tier 1 preferences are hard constraints.
    pub tier: PriorityTier,
    /// Legacy availability group, meaningful only for the two legacy codes.
    pub group_type: GroupType,
    /// Normalized scheduling preferences.
    pub preferences: Preferences,
}

/// Staff ranking: tier 1 is highest.
///
/// Tier-1 preferred weekdays form a hard allow-list and tier-1 holiday
/// avoidance is enforced hard; tier-1 members also bypass the weekly
/// quota and weekend-repeat checks. Tiers 2 and 3 get soft treatment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityTier {
    /// Highest priority; preferences are a hard contract.
    Tier1,
    /// Normal priority.
    Tier2,
    /// Lowest priority (the default).
    #[default]
    Tier3,
}

impl PriorityTier {
    /// Parses a tier label.
    ///
    /// Two historical vocabularies are recognized: Chinese ordinals
    /// (`一级`, `二级`, `三级`) and digit spellings (`1`, `2级`,
    /// `level 3`). Absent or unrecognized labels default to tier 3.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::Tier3;
        };
        if label.contains('一') || label.contains('1') {
            Self::Tier1
        } else if label.contains('二') || label.contains('2') {
            Self::Tier2
        } else if label.contains('三') || label.contains('3') {
            Self::Tier3
        } else {
            Self::Tier3
        }
    }

    /// Numeric rank, 1 = highest.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
        }
    }
}

/// Legacy availability group, retained for backward compatibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupType {
    /// No group restriction.
    #[default]
    Unlimited,
    /// Monday, Wednesday, and Fridays of odd ISO weeks.
    RestrictedFg,
    /// Tuesday and Thursday only.
    SingleH,
}

impl GroupType {
    /// Whether this group permits duty on a weekday (0=Mon..6=Sun).
    pub fn permits_weekday(self, weekday: u8, iso_week_is_odd: bool) -> bool {
        match self {
            Self::Unlimited => true,
            Self::RestrictedFg => weekday == 0 || weekday == 2 || (weekday == 4 && iso_week_is_odd),
            Self::SingleH => weekday == 1 || weekday == 3,
        }
    }
}

impl StaffMember {
    /// Creates a staff member with default tier and empty preferences.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
            tier: PriorityTier::default(),
            group_type: GroupType::default(),
            preferences: Preferences::default(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the priority tier.
    pub fn with_tier(mut self, tier: PriorityTier) -> Self {
        self.tier = tier;
        self
    }

    /// Sets the legacy group type.
    pub fn with_group_type(mut self, group_type: GroupType) -> Self {
        self.group_type = group_type;
        self
    }

    /// Sets normalized preferences.
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Normalizes a raw preference record into this member, setting both
    /// the tier (from `employee_type`) and the typed preferences.
    pub fn with_raw_preferences(mut self, raw: &RawPreferences) -> Self {
        self.tier = PriorityTier::from_label(raw.employee_type.as_deref());
        self.preferences = Preferences::from_raw(raw);
        self
    }

    /// Whether the legacy group restricts this member on the given weekday.
    ///
    /// Only the two hardcoded legacy codes carry a group restriction;
    /// everyone else passes unconditionally.
    pub fn legacy_group_permits(&self, weekday: u8, iso_week_is_odd: bool) -> bool {
        let restricted = (self.code == LEGACY_RESTRICTED_CODE
            && self.group_type == GroupType::RestrictedFg)
            || (self.code == LEGACY_SINGLE_CODE && self.group_type == GroupType::SingleH);
        if restricted {
            self.group_type.permits_weekday(weekday, iso_week_is_odd)
        } else {
            true
        }
    }

    /// Whether this member is tier 1.
    #[inline]
    pub fn is_tier1(&self) -> bool {
        self.tier == PriorityTier::Tier1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_chinese_vocabulary() {
        assert_eq!(PriorityTier::from_label(Some("一级")), PriorityTier::Tier1);
        assert_eq!(PriorityTier::from_label(Some("二级")), PriorityTier::Tier2);
        assert_eq!(PriorityTier::from_label(Some("三级")), PriorityTier::Tier3);
    }

    #[test]
    fn test_tier_digit_vocabulary() {
        assert_eq!(PriorityTier::from_label(Some("1")), PriorityTier::Tier1);
        assert_eq!(PriorityTier::from_label(Some("2级")), PriorityTier::Tier2);
        assert_eq!(PriorityTier::from_label(Some("level 3")), PriorityTier::Tier3);
    }

    #[test]
    fn test_tier_default_when_unrecognized() {
        assert_eq!(PriorityTier::from_label(None), PriorityTier::Tier3);
        assert_eq!(PriorityTier::from_label(Some("premium")), PriorityTier::Tier3);
        assert_eq!(PriorityTier::from_label(Some("")), PriorityTier::Tier3);
    }

    #[test]
    fn test_tier_rank() {
        assert_eq!(PriorityTier::Tier1.rank(), 1);
        assert_eq!(PriorityTier::Tier3.rank(), 3);
    }

    #[test]
    fn test_group_permits_weekday() {
        assert!(GroupType::Unlimited.permits_weekday(6, false));
        assert!(GroupType::RestrictedFg.permits_weekday(0, false));
        assert!(GroupType::RestrictedFg.permits_weekday(2, false));
        assert!(GroupType::RestrictedFg.permits_weekday(4, true));
        assert!(!GroupType::RestrictedFg.permits_weekday(4, false));
        assert!(!GroupType::RestrictedFg.permits_weekday(1, true));
        assert!(GroupType::SingleH.permits_weekday(1, false));
        assert!(GroupType::SingleH.permits_weekday(3, true));
        assert!(!GroupType::SingleH.permits_weekday(0, true));
    }

    #[test]
    fn test_legacy_group_only_binds_legacy_codes() {
        // A non-legacy code with a restricted group passes everywhere.
        let odd = StaffMember::new("A").with_group_type(GroupType::RestrictedFg);
        assert!(odd.legacy_group_permits(6, false));

        let f = StaffMember::new("F").with_group_type(GroupType::RestrictedFg);
        assert!(f.legacy_group_permits(0, false));
        assert!(!f.legacy_group_permits(6, false));

        let h = StaffMember::new("H").with_group_type(GroupType::SingleH);
        assert!(h.legacy_group_permits(3, false));
        assert!(!h.legacy_group_permits(4, true));
    }

    #[test]
    fn test_with_raw_preferences_sets_tier() {
        let raw: RawPreferences =
            serde_json::from_str(r#"{"employee_type": "一级", "preferred_weekdays": [0]}"#)
                .unwrap();
        let staff = StaffMember::new("A").with_raw_preferences(&raw);
        assert!(staff.is_tier1());
        assert!(staff.preferences.preferred_weekdays.contains(&0));
    }
}
