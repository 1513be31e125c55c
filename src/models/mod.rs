//! Duty-roster domain models.
//!
//! Provides the core data types for the weekly roster generator:
//! staff members and their priority tiers, normalized preference
//! records, the static holiday table, carried-over history, and the
//! assignment output types.

mod history;
mod holiday;
mod preference;
mod roster;
mod staff;

pub use history::RosterHistory;
pub use holiday::{holiday_on, HOLIDAY_NAMES};
pub use preference::{DutyCycle, Preferences, RawPreferences, RawRotation, Rotation, WeekParity};
pub use staff::{
    GroupType, PriorityTier, StaffMember, LEGACY_RESTRICTED_CODE, LEGACY_SINGLE_CODE,
};
pub use roster::{DutyAssignment, RosterOutcome};
