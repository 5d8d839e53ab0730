//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for list endpoints that support an `include_inactive` flag.
///
/// Used by the admin tournament and club listings; the public site always
/// lists active rows only.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?year=` filter for membership listings.
#[derive(Debug, Deserialize)]
pub struct YearParams {
    pub year: Option<i32>,
}
