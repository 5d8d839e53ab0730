//! Request handlers.
//!
//! Admin handlers are grouped by resource and delegate to the matching
//! repository in `clubhouse_db`; the public site's handlers live in
//! [`site`]. Errors are mapped via [`AppError`](crate::error::AppError).

pub mod associations;
pub mod auth;
pub mod clubs;
pub mod content;
pub mod courses;
pub mod dashboard;
pub mod documents;
pub mod invitations;
pub mod memberships;
pub mod photos;
pub mod site;
pub mod tournaments;
pub mod users;
