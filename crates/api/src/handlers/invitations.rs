//! Handlers for invitations: admin management under `/admin/invitations`
//! and the public validate/accept pair under `/invitations`.
//!
//! The plaintext token only ever exists in the creation response and the
//! invitation email; lookups go through its SHA-256 digest.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use clubhouse_core::contact::{validate_email, MAX_NAME_LENGTH};
use clubhouse_core::error::CoreError;
use clubhouse_core::invitation::{
    accept_link, check_usable, expires_at, generate_token, hash_token, is_expired,
    InvitationStatus,
};
use clubhouse_core::roles::validate_role;
use clubhouse_core::slug::validate_name;
use clubhouse_core::types::{DbId, Timestamp};
use clubhouse_db::models::invitation::{
    AcceptInvitation, CreateInvitation, Invitation, InvitationListParams,
};
use clubhouse_db::models::user::User;
use clubhouse_db::repositories::{InvitationRepo, RoleRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/invitations`.
#[derive(Debug, Deserialize)]
pub struct CreateInvitationRequest {
    pub email: String,
    pub role: String,
}

/// A created or re-sent invitation. `accept_link` is shown once.
#[derive(Debug, Serialize)]
pub struct IssuedInvitation {
    pub invitation: Invitation,
    pub accept_link: String,
}

/// What the accept page needs to render a valid invitation.
#[derive(Debug, Serialize)]
pub struct InvitationDetails {
    pub email: String,
    pub role: String,
    pub expires_at: Timestamp,
}

/// Request body for `POST /invitations/accept`.
#[derive(Debug, Deserialize)]
pub struct AcceptInvitationRequest {
    pub token: String,
    pub name: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/invitations?status=
pub async fn list_invitations(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<InvitationListParams>,
) -> AppResult<Json<DataResponse<Vec<Invitation>>>> {
    let status = params
        .status
        .as_deref()
        .map(InvitationStatus::from_name)
        .transpose()?;
    let invitations = InvitationRepo::list(&state.pool, status).await?;
    Ok(Json(DataResponse { data: invitations }))
}

/// POST /api/v1/admin/invitations
///
/// Rejects an email that already belongs to a user or has an open
/// invitation. The invitation email is sent best-effort; the accept link is
/// also returned so the admin can pass it on by hand.
pub async fn create_invitation(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateInvitationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<IssuedInvitation>>)> {
    let email = input.email.trim().to_lowercase();
    validate_email(&email)?;
    validate_role(&input.role)?;

    if UserRepo::email_exists(&state.pool, &email).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with this email already exists".into(),
        )));
    }
    if InvitationRepo::has_open_invitation(&state.pool, &email).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "A pending invitation already exists for this email".into(),
        )));
    }

    let role = RoleRepo::find_by_name(&state.pool, &input.role)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Role '{}' is not seeded", input.role)))?;

    let token = generate_token();
    let create = CreateInvitation {
        email,
        token_hash: token.hash,
        role_id: role.id,
        expires_at: expires_at(Utc::now(), state.config.invitation_expiry_days),
        invited_by: admin.user_id,
    };
    let invitation = InvitationRepo::create(&state.pool, &create).await?;
    tracing::info!(
        invitation_id = invitation.id,
        role = %invitation.role,
        admin_id = admin.user_id,
        "Invitation created"
    );

    let link = accept_link(&state.config.admin_base_url, &token.plaintext);
    send_invitation_email(&state, &invitation, &link).await;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IssuedInvitation {
                invitation,
                accept_link: link,
            },
        }),
    ))
}

/// POST /api/v1/admin/invitations/{id}/revoke
pub async fn revoke_invitation(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Invitation>>> {
    match InvitationRepo::revoke(&state.pool, id).await? {
        Some(invitation) => {
            tracing::info!(invitation_id = id, admin_id = admin.user_id, "Invitation revoked");
            Ok(Json(DataResponse { data: invitation }))
        }
        None => Err(not_pending(&state, id).await),
    }
}

/// POST /api/v1/admin/invitations/{id}/resend
///
/// Issues a new token with a fresh expiry; the old link stops working.
pub async fn resend_invitation(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<IssuedInvitation>>> {
    let token = generate_token();
    let new_expiry = expires_at(Utc::now(), state.config.invitation_expiry_days);

    let invitation = match InvitationRepo::refresh_token(&state.pool, id, &token.hash, new_expiry)
        .await?
    {
        Some(invitation) => invitation,
        None => return Err(not_pending(&state, id).await),
    };
    tracing::info!(invitation_id = id, admin_id = admin.user_id, "Invitation re-sent");

    let link = accept_link(&state.config.admin_base_url, &token.plaintext);
    send_invitation_email(&state, &invitation, &link).await;

    Ok(Json(DataResponse {
        data: IssuedInvitation {
            invitation,
            accept_link: link,
        },
    }))
}

/// DELETE /api/v1/admin/invitations/{id}
pub async fn delete_invitation(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !InvitationRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Invitation",
            id,
        }));
    }
    tracing::info!(invitation_id = id, admin_id = admin.user_id, "Invitation deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/invitations/{token}
pub async fn validate_invitation(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<InvitationDetails>>> {
    let invitation = usable_invitation(&state, &token).await?;
    Ok(Json(DataResponse {
        data: InvitationDetails {
            email: invitation.email,
            role: invitation.role,
            expires_at: invitation.expires_at,
        },
    }))
}

/// POST /api/v1/invitations/accept
///
/// Creates the user (verified email, invited role), its password account,
/// and marks the invitation accepted, all in one transaction.
pub async fn accept_invitation(
    State(state): State<AppState>,
    Json(input): Json<AcceptInvitationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    let invitation = usable_invitation(&state, &input.token).await?;

    validate_name("Name", &input.name, MAX_NAME_LENGTH)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let accept = AcceptInvitation {
        name: input.name,
        password_hash,
    };
    // `None` means the invitation changed state after it was validated.
    let user = InvitationRepo::accept(&state.pool, invitation.id, &accept)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Invitation is no longer valid".into(),
            ))
        })?;

    tracing::info!(
        invitation_id = invitation.id,
        user_id = user.id,
        role = %user.role,
        "Invitation accepted"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look an invitation up by plaintext token and check it can be accepted.
///
/// A pending invitation past its expiry is marked `expired` on the way out.
async fn usable_invitation(state: &AppState, token: &str) -> AppResult<Invitation> {
    let invitation = InvitationRepo::find_by_token_hash(&state.pool, &hash_token(token))
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid invitation".into()))?;

    let status = InvitationStatus::from_name(&invitation.status)?;
    let now = Utc::now();

    if status == InvitationStatus::Pending && is_expired(invitation.expires_at, now) {
        InvitationRepo::mark_expired(&state.pool, invitation.id).await?;
        tracing::info!(invitation_id = invitation.id, "Invitation marked expired");
    }

    check_usable(status, invitation.expires_at, now)?;
    Ok(invitation)
}

/// The error for a revoke/resend that found no pending row.
async fn not_pending(state: &AppState, id: DbId) -> AppError {
    match InvitationRepo::find_by_id(&state.pool, id).await {
        Ok(Some(invitation)) => AppError::Core(CoreError::Conflict(format!(
            "Invitation is {}, only pending invitations can be changed",
            invitation.status
        ))),
        Ok(None) => AppError::Core(CoreError::NotFound {
            entity: "Invitation",
            id,
        }),
        Err(e) => AppError::Database(e),
    }
}

async fn send_invitation_email(state: &AppState, invitation: &Invitation, link: &str) {
    let Some(email) = &state.email else {
        tracing::debug!(invitation_id = invitation.id, "Email not configured, invitation not sent");
        return;
    };
    if let Err(e) = email
        .send_invitation(&invitation.email, link, &invitation.role, invitation.expires_at)
        .await
    {
        tracing::warn!(invitation_id = invitation.id, error = %e, "Failed to send invitation email");
    }
}
