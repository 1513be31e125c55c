//! Weekly duty-roster generation.
//!
//! Assigns two people to every day of a Monday-start week from a staff
//! list with per-member preferences. Generation applies a set of fixed
//! pre-assignment rules, then fills the remaining slots by randomized
//! backtracking search ordered by a fairness-aware candidate key, with
//! a relaxed retry phase when the strict rules admit no roster.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `StaffMember`, `Preferences`,
//!   `DutyAssignment`, `RosterOutcome`, `RosterHistory`, holidays
//! - **`solver`**: `RosterGenerator` and the two-phase search pipeline
//! - **`validation`**: Input integrity checks (duplicate codes, partner refs)
//! - **`stats`**: Workload metrics over a generated roster
//! - **`week`**: Weekday indexing and ISO-week parity helpers
//!
//! # Example
//!
//! ```no_run
//! use duty_roster::models::StaffMember;
//! use duty_roster::solver::{GenerateRequest, RosterGenerator};
//! use chrono::NaiveDate;
//!
//! let staff: Vec<StaffMember> = (0..8)
//!     .map(|i| StaffMember::new(format!("S{i}")))
//!     .collect();
//! let monday = NaiveDate::from_ymd_opt(2023, 10, 23).unwrap();
//! let outcome = RosterGenerator::new(staff)
//!     .generate(&GenerateRequest::new(monday))?;
//! for a in &outcome.assignments {
//!     println!("{} {}", a.date, a.staff_code);
//! }
//! # Ok::<(), duty_roster::error::RosterError>(())
//! ```

pub mod error;
pub mod models;
pub mod solver;
pub mod stats;
pub mod validation;
pub mod week;
