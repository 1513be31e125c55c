//! Crate error type.
//!
//! Only genuinely invalid input is an error. Infeasibility — strict,
//! loose, or step-budget exhaustion — is a normal outcome of the search
//! and is reported through [`crate::models::RosterOutcome`], never as
//! an `Err`.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors rejecting a generation request before any search runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The target week must begin on a Monday.
    #[error("start date {0} is not a Monday")]
    StartDateNotMonday(NaiveDate),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 24).unwrap();
        let err = RosterError::StartDateNotMonday(date);
        assert_eq!(err.to_string(), "start date 2023-10-24 is not a Monday");
    }
}
