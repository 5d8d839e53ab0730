//! Handlers for `/admin/users` (user management).
//!
//! Users are only ever created by accepting an invitation, so there is no
//! create endpoint. All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubhouse_core::error::CoreError;
use clubhouse_core::roles::validate_role;
use clubhouse_core::types::DbId;
use clubhouse_db::models::user::{UpdateUser, User};
use clubhouse_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    /// Role name (`admin` or `editor`).
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update name, role and active flag. An admin cannot demote or
/// deactivate themself.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<User>>> {
    if let Some(name) = &input.name {
        clubhouse_core::slug::validate_name("Name", name, clubhouse_core::contact::MAX_NAME_LENGTH)?;
    }

    let role_id = match input.role.as_deref() {
        Some(role) => {
            validate_role(role)?;
            if id == admin.user_id && role != admin.role {
                return Err(AppError::Core(CoreError::Validation(
                    "You cannot change your own role".into(),
                )));
            }
            let role = RoleRepo::find_by_name(&state.pool, role)
                .await?
                .ok_or_else(|| AppError::InternalError(format!("Role '{role}' is not seeded")))?;
            Some(role.id)
        }
        None => None,
    };

    if id == admin.user_id && input.is_active == Some(false) {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot deactivate your own account".into(),
        )));
    }

    let update = UpdateUser {
        name: input.name.map(|n| n.trim().to_string()),
        role_id,
        is_active: input.is_active,
    };

    let previous = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    // Refresh tokens must not outlive the access they were issued for.
    if !user.is_active || user.role != previous.role {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;
        tracing::debug!(user_id = id, revoked, "Sessions revoked after user update");
    }

    tracing::info!(user_id = id, admin_id = admin.user_id, role = %user.role, "User updated");
    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivate a user and revoke their sessions. Returns 204 No Content,
/// also when the user was already inactive.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot deactivate your own account".into(),
        )));
    }

    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, admin_id = admin.user_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}
