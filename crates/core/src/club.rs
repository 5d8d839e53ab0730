//! Club, club contact, and golf course rules.

use crate::error::CoreError;

pub const MAX_NAME_LENGTH: usize = 150;

/// Hole counts a course may have.
pub const VALID_HOLE_COUNTS: &[i16] = &[6, 9, 12, 18, 27, 36];

pub fn validate_club_name(name: &str) -> Result<(), CoreError> {
    crate::slug::validate_name("Name", name, MAX_NAME_LENGTH)
}

/// Validate a club contact person. The email is optional but must be valid.
pub fn validate_contact(name: &str, email: Option<&str>) -> Result<(), CoreError> {
    crate::slug::validate_name("Contact name", name, MAX_NAME_LENGTH)?;
    if let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) {
        crate::contact::validate_email(email)?;
    }
    Ok(())
}

/// Validate a golf course's name, hole count, and par.
pub fn validate_course(name: &str, holes: i16, par: Option<i16>) -> Result<(), CoreError> {
    crate::slug::validate_name("Course name", name, MAX_NAME_LENGTH)?;
    if !VALID_HOLE_COUNTS.contains(&holes) {
        return Err(CoreError::Validation(format!(
            "Invalid hole count {holes}. Must be one of: {VALID_HOLE_COUNTS:?}"
        )));
    }
    if let Some(par) = par {
        // Between par 3 and par 6 per hole on average.
        let (min, max) = (holes * 3, holes * 6);
        if par < min || par > max {
            return Err(CoreError::Validation(format!(
                "Par {par} is not plausible for {holes} holes ({min}..={max})"
            )));
        }
    }
    Ok(())
}
