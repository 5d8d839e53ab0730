//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- The authenticated, still-active user behind a Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireEditor`] -- Requires `editor` or `admin` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.

pub mod auth;
pub mod rbac;
