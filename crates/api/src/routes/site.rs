//! Route definitions of the public site app.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::site::{contact, pages, revalidate, webhooks};
use crate::state::SiteState;

/// Build the public `/api/v1` route tree.
///
/// GET routes are served through the page cache.
///
/// ```text
/// GET  /content/{system_name}     -> pages::content
/// GET  /tournaments               -> pages::tournaments
/// GET  /tournaments/{slug}        -> pages::tournament
/// GET  /clubs                     -> pages::clubs
/// GET  /clubs/{slug}              -> pages::club
/// GET  /courses                   -> pages::courses
/// GET  /documents                 -> pages::documents
/// GET  /photos                    -> pages::photos
/// GET  /members?year=             -> pages::members
/// POST /contact                   -> contact::submit_contact
/// POST /webhooks/payment          -> webhooks::payment_webhook
/// ```
pub fn api_routes() -> Router<SiteState> {
    Router::new()
        .route("/content/{system_name}", get(pages::content))
        .route("/tournaments", get(pages::tournaments))
        .route("/tournaments/{slug}", get(pages::tournament))
        .route("/clubs", get(pages::clubs))
        .route("/clubs/{slug}", get(pages::club))
        .route("/courses", get(pages::courses))
        .route("/documents", get(pages::documents))
        .route("/photos", get(pages::photos))
        .route("/members", get(pages::members))
        .route("/contact", post(contact::submit_contact))
        .route("/webhooks/payment", post(webhooks::payment_webhook))
}

/// `POST /api/revalidate`, mounted beside `/api/v1`.
pub fn revalidate_routes() -> Router<SiteState> {
    Router::new().route("/api/revalidate", post(revalidate::revalidate))
}
