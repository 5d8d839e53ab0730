pub mod admin;
pub mod auth;
pub mod health;
pub mod invitations;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// Build the admin app's `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user
/// /auth/change-password                            change own password
///
/// /invitations/{token}                             validate (public)
/// /invitations/accept                              accept (public)
///
/// /admin/dashboard                                 summary counts
/// /admin/content[/{system_name}]                   content blocks (editor)
/// /admin/documents[/{id}[/file]]                   documents (editor)
/// /admin/photos[/{id}[/file]]                      photos (editor)
/// /admin/tournaments[/{id}[/instances[/{id}]]]     tournaments (editor)
/// /admin/clubs[/{id}[/contacts[/{id}]]]            clubs (editor)
/// /admin/courses[/{id}]                            golf courses (editor)
/// /admin/users[/{id}]                              users (admin only)
/// /admin/invitations[/{id}[/revoke|/resend]]       invitations (admin only)
/// /admin/memberships                               memberships (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/invitations", invitations::router())
        .nest("/admin", admin::router())
}
