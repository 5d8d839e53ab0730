//! Public invitation routes, mounted at `/invitations`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::invitations;
use crate::state::AppState;

/// ```text
/// GET  /{token}   -> validate_invitation
/// POST /accept    -> accept_invitation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/accept", post(invitations::accept_invitation))
        .route("/{token}", get(invitations::validate_invitation))
}
