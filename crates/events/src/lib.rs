//! Outbound side effects of the association CMS.
//!
//! - [`email`] -- SMTP delivery of invitation, membership and contact emails.
//! - [`revalidation`] -- HTTP client that asks the public site to drop cached pages.
//!
//! Callers treat both as best-effort: failures are logged, never surfaced.

pub mod email;
pub mod revalidation;

pub use email::{EmailConfig, EmailDelivery, EmailError};
pub use revalidation::{RevalidationClient, RevalidationConfig, RevalidationError};
