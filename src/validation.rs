//! Input validation for staff lists.
//!
//! Checks structural integrity of a staff list before roster
//! generation. Detects:
//! - Duplicate staff codes
//! - Rotation or preferred-partner references to unknown or self codes
//! - Rotation pairs whose two sides contradict each other
//!
//! Generation itself tolerates dangling references by ignoring them;
//! validation exists so the staff forms can surface every problem at
//! once instead of silently dropping configuration.

use std::collections::{HashMap, HashSet};

use crate::models::StaffMember;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two staff members share the same code.
    DuplicateCode,
    /// A rotation or preferred-partner entry names an unknown code.
    UnknownPartner,
    /// A member is configured as their own partner.
    SelfPartner,
    /// The two sides of a rotation pair disagree.
    MismatchedRotation,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a staff list for roster generation.
///
/// Checks:
/// 1. No duplicate staff codes
/// 2. Rotation partners exist and are not the member themselves
/// 3. Reciprocal rotations agree on weekday and use opposite parities
/// 4. Preferred partners exist and are not the member themselves
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_staff(staff: &[StaffMember]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut codes = HashSet::new();
    for s in staff {
        if !codes.insert(s.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCode,
                format!("duplicate staff code: {}", s.code),
            ));
        }
    }

    let by_code: HashMap<&str, &StaffMember> =
        staff.iter().map(|s| (s.code.as_str(), s)).collect();

    for s in staff {
        if let Some(rotation) = &s.preferences.rotation {
            if rotation.partner == s.code {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfPartner,
                    format!("{} rotates with themselves", s.code),
                ));
            } else {
                match by_code.get(rotation.partner.as_str()) {
                    None => errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownPartner,
                        format!(
                            "{} rotates with unknown partner '{}'",
                            s.code, rotation.partner
                        ),
                    )),
                    // Reciprocity is checked from one side of the pair
                    // so a disagreement is reported once.
                    Some(partner) if s.code < partner.code => {
                        // A missing mirror record is fine; a present
                        // one has to agree with this side.
                        if let Some(back) = partner
                            .preferences
                            .rotation
                            .as_ref()
                            .filter(|back| back.partner == s.code)
                        {
                            if back.weekday != rotation.weekday {
                                errors.push(ValidationError::new(
                                    ValidationErrorKind::MismatchedRotation,
                                    format!(
                                        "{} and {} rotate on different weekdays",
                                        s.code, partner.code
                                    ),
                                ));
                            } else if back.parity == rotation.parity {
                                errors.push(ValidationError::new(
                                    ValidationErrorKind::MismatchedRotation,
                                    format!(
                                        "{} and {} both claim the same weeks of their rotation",
                                        s.code, partner.code
                                    ),
                                ));
                            }
                        }
                    }
                    Some(_) => {}
                }
            }
        }

        for partner in &s.preferences.preferred_partners {
            if partner == &s.code {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfPartner,
                    format!("{} lists themselves as a preferred partner", s.code),
                ));
            } else if !by_code.contains_key(partner.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownPartner,
                    format!("{} prefers unknown partner '{partner}'", s.code),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
