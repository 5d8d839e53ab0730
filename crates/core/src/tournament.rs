//! Tournament and tournament-instance rules.

use chrono::NaiveDate;
use validator::ValidateUrl;

use crate::error::CoreError;

pub const MAX_NAME_LENGTH: usize = 150;
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Validate a tournament name.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    crate::slug::validate_name("Name", name, MAX_NAME_LENGTH)
}

/// Validate the year and date range of a tournament instance.
///
/// Dates are optional (an instance may be announced before it is
/// scheduled), but when both are set the end may not precede the start,
/// and the start must fall in the instance year.
pub fn validate_instance(
    year: i32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), CoreError> {
    use chrono::Datelike;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "Year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(CoreError::Validation(
                "End date must not be before start date".into(),
            ));
        }
    }
    if let Some(start) = start_date {
        if start.year() != year {
            return Err(CoreError::Validation(format!(
                "Start date {start} is not in year {year}"
            )));
        }
    }
    Ok(())
}

/// Validate an optional external URL (registration links, club websites).
pub fn validate_url(field: &str, url: Option<&str>) -> Result<(), CoreError> {
    match url.map(str::trim) {
        None | Some("") => Ok(()),
        Some(u)
            if (u.starts_with("https://") || u.starts_with("http://")) && u.validate_url() =>
        {
            Ok(())
        }
        Some(_) => Err(CoreError::Validation(format!(
            "{field} must be an http:// or https:// URL"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn instance_with_valid_dates() {
        assert!(validate_instance(2025, date(2025, 6, 1), date(2025, 6, 2)).is_ok());
        assert!(validate_instance(2025, None, None).is_ok());
        assert!(validate_instance(2025, date(2025, 6, 1), date(2025, 6, 1)).is_ok());
    }

    #[test]
    fn instance_rejects_inverted_range() {
        assert!(validate_instance(2025, date(2025, 6, 2), date(2025, 6, 1)).is_err());
    }

    #[test]
    fn instance_rejects_year_mismatch_and_range() {
        assert!(validate_instance(2025, date(2024, 6, 1), None).is_err());
        assert!(validate_instance(1800, None, None).is_err());
    }

    #[test]
    fn url_checks() {
        assert!(validate_url("Registration URL", None).is_ok());
        assert!(validate_url("Registration URL", Some("")).is_ok());
        assert!(validate_url("Registration URL", Some("https://golf.example/reg")).is_ok());
        assert!(validate_url("Registration URL", Some("javascript:alert(1)")).is_err());
        assert!(validate_url("Registration URL", Some("https://")).is_err());
    }
}
