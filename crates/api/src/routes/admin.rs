//! Route definitions for the `/admin` resource.
//!
//! Role checks happen in the handlers' extractors: content routes take
//! `RequireEditor`, user/invitation/membership routes take `RequireAdmin`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{
    clubs, content, courses, dashboard, documents, invitations, memberships, photos, tournaments,
    users,
};
use crate::state::AppState;
use crate::upload::MAX_UPLOAD_BODY_BYTES;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /dashboard                              -> summary
///
/// GET    /content                                -> list_contents
/// GET    /content/{system_name}                  -> load_content
/// PUT    /content/{system_name}                  -> save_content
/// DELETE /content/{system_name}                  -> delete_content
///
/// GET    /users                                  -> list_users (admin)
/// GET    /users/{id}                             -> get_user (admin)
/// PUT    /users/{id}                             -> update_user (admin)
/// DELETE /users/{id}                             -> deactivate_user (admin)
///
/// GET    /invitations?status=                    -> list_invitations (admin)
/// POST   /invitations                            -> create_invitation (admin)
/// DELETE /invitations/{id}                       -> delete_invitation (admin)
/// POST   /invitations/{id}/revoke                -> revoke_invitation (admin)
/// POST   /invitations/{id}/resend                -> resend_invitation (admin)
///
/// GET    /memberships?year=                      -> list_memberships (admin)
///
/// /documents, /photos, /tournaments, /clubs, /courses: see the sub-routers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::summary))
        .route("/content", get(content::list_contents))
        .route(
            "/content/{system_name}",
            get(content::load_content)
                .put(content::save_content)
                .delete(content::delete_content),
        )
        .route("/users", get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::deactivate_user),
        )
        .route(
            "/invitations",
            get(invitations::list_invitations).post(invitations::create_invitation),
        )
        .route("/invitations/{id}", axum::routing::delete(invitations::delete_invitation))
        .route("/invitations/{id}/revoke", post(invitations::revoke_invitation))
        .route("/invitations/{id}/resend", post(invitations::resend_invitation))
        .route("/memberships", get(memberships::list_memberships))
        .nest("/documents", documents_router())
        .nest("/photos", photos_router())
        .nest("/tournaments", tournaments_router())
        .nest("/clubs", clubs_router())
        .nest("/courses", courses_router())
}

/// ```text
/// GET    /            -> list_documents
/// POST   /            -> upload_document (multipart)
/// GET    /{id}        -> get_document
/// PUT    /{id}        -> update_document
/// DELETE /{id}        -> delete_document
/// PUT    /{id}/file   -> replace_document_file (multipart)
/// ```
fn documents_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(documents::list_documents).post(documents::upload_document),
        )
        .route(
            "/{id}",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        .route("/{id}/file", put(documents::replace_document_file))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BODY_BYTES))
}

/// ```text
/// GET    /            -> list_photos
/// POST   /            -> upload_photo (multipart)
/// GET    /{id}        -> get_photo
/// PUT    /{id}        -> update_photo
/// DELETE /{id}        -> delete_photo
/// PUT    /{id}/file   -> replace_photo_file (multipart)
/// ```
fn photos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(photos::list_photos).post(photos::upload_photo))
        .route(
            "/{id}",
            get(photos::get_photo)
                .put(photos::update_photo)
                .delete(photos::delete_photo),
        )
        .route("/{id}/file", put(photos::replace_photo_file))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BODY_BYTES))
}

/// ```text
/// GET    /?include_inactive=                    -> list_tournaments
/// POST   /                                      -> create_tournament
/// GET    /{id}                                  -> get_tournament
/// PUT    /{id}                                  -> update_tournament
/// DELETE /{id}                                  -> delete_tournament
/// GET    /{id}/instances                        -> list_instances
/// POST   /{id}/instances                        -> create_instance
/// PUT    /{id}/instances/{instance_id}          -> update_instance
/// DELETE /{id}/instances/{instance_id}          -> delete_instance
/// ```
fn tournaments_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route(
            "/{id}",
            get(tournaments::get_tournament)
                .put(tournaments::update_tournament)
                .delete(tournaments::delete_tournament),
        )
        .route(
            "/{id}/instances",
            get(tournaments::list_instances).post(tournaments::create_instance),
        )
        .route(
            "/{id}/instances/{instance_id}",
            put(tournaments::update_instance).delete(tournaments::delete_instance),
        )
}

/// ```text
/// GET    /?include_inactive=                    -> list_clubs
/// POST   /                                      -> create_club
/// GET    /{id}                                  -> get_club
/// PUT    /{id}                                  -> update_club
/// DELETE /{id}                                  -> delete_club
/// GET    /{id}/contacts                         -> list_contacts
/// POST   /{id}/contacts                         -> create_contact
/// PUT    /{id}/contacts/{contact_id}            -> update_contact
/// DELETE /{id}/contacts/{contact_id}            -> delete_contact
/// ```
fn clubs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(clubs::list_clubs).post(clubs::create_club))
        .route(
            "/{id}",
            get(clubs::get_club)
                .put(clubs::update_club)
                .delete(clubs::delete_club),
        )
        .route(
            "/{id}/contacts",
            get(clubs::list_contacts).post(clubs::create_contact),
        )
        .route(
            "/{id}/contacts/{contact_id}",
            put(clubs::update_contact).delete(clubs::delete_contact),
        )
}

fn courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses).post(courses::create_course))
        .route(
            "/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
}
