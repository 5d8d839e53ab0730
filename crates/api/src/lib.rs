//! HTTP layer of the golf association CMS.
//!
//! One library, two binaries:
//!
//! - `clubhouse-admin` -- the admin dashboard API ([`state::AppState`],
//!   [`routes::api_routes`]).
//! - `clubhouse-site` -- the public site API ([`state::SiteState`],
//!   [`routes::site::api_routes`]).
//!
//! Both share config loading, error mapping, the middleware stack and
//! the health check, so integration tests build exactly what production runs.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod server;
pub mod state;
pub mod upload;
