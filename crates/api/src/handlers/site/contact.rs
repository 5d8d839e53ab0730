//! Public contact form.

use axum::extract::State;
use axum::Json;
use clubhouse_core::contact::ContactSubmission;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::SiteState;

#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub sent: bool,
}

/// POST /api/v1/contact
///
/// Forwards the message to the association's inbox. The email is the whole
/// operation, so a missing mail setup or a failed send is a 502 rather than
/// a logged warning.
pub async fn submit_contact(
    State(state): State<SiteState>,
    Json(submission): Json<ContactSubmission>,
) -> AppResult<Json<DataResponse<ContactReceipt>>> {
    // Honeypot hit: answer like a success so the bot learns nothing.
    if submission.is_spam() {
        tracing::info!("Contact submission dropped by honeypot");
        return Ok(Json(DataResponse {
            data: ContactReceipt { sent: true },
        }));
    }

    submission.validate()?;

    let (Some(email), Some(recipient)) = (&state.email, &state.config.contact_recipient) else {
        tracing::error!("Contact form submitted but email delivery is not configured");
        return Err(AppError::BadGateway("Failed to send message".into()));
    };

    if let Err(e) = email.send_contact(recipient, &submission).await {
        tracing::error!(error = %e, "Failed to forward contact message");
        return Err(AppError::BadGateway("Failed to send message".into()));
    }

    Ok(Json(DataResponse {
        data: ContactReceipt { sent: true },
    }))
}
