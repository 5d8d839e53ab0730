//! Inbound payment webhook: completed checkouts become membership rows.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use clubhouse_core::membership::{
    verify_signature, CheckoutSession, MembershipPayment, PaymentEvent, EVENT_CHECKOUT_COMPLETED,
};
use clubhouse_core::revalidation::{paths_for, Target};
use clubhouse_db::models::membership::Membership;
use clubhouse_db::repositories::MembershipRepo;
use clubhouse_db::is_unique_violation;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::SiteState;

/// Header carrying `t=<unix>,v1=<hex>[,v1=<hex>...]`.
pub const SIGNATURE_HEADER: &str = "payment-signature";

const PAYMENT_REFERENCE_CONSTRAINT: &str = "uq_memberships_payment_reference";

/// Acknowledgement returned to the payment provider.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<bool>,
}

impl WebhookAck {
    fn handled(handled: bool) -> Self {
        Self {
            received: true,
            handled: Some(handled),
            duplicate: None,
        }
    }

    fn duplicate() -> Self {
        Self {
            received: true,
            handled: None,
            duplicate: Some(true),
        }
    }
}

/// POST /api/v1/webhooks/payment
///
/// The body is taken as raw bytes because the signature covers the exact
/// payload. Replays of an already recorded checkout are acknowledged as
/// duplicates without a second row.
pub async fn payment_webhook(
    State(state): State<SiteState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if let Err(e) = verify_signature(
        &state.config.payment_webhook_secret,
        signature,
        &body,
        Utc::now().timestamp(),
    ) {
        tracing::warn!(reason = %e, "Rejected payment webhook");
        return Err(AppError::BadRequest("Invalid signature".into()));
    }

    let event: PaymentEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed event: {e}")))?;

    if event.event_type != EVENT_CHECKOUT_COMPLETED {
        tracing::debug!(event_id = %event.id, event_type = %event.event_type, "Ignoring payment event");
        return Ok(Json(WebhookAck::handled(false)));
    }

    let session: CheckoutSession = serde_json::from_value(event.data.object)
        .map_err(|e| AppError::BadRequest(format!("Malformed checkout session: {e}")))?;
    let payment = session.to_membership_payment()?;

    if MembershipRepo::find_by_payment_reference(&state.pool, &payment.payment_reference)
        .await?
        .is_some()
    {
        tracing::info!(payment_reference = %payment.payment_reference, "Duplicate payment event");
        return Ok(Json(WebhookAck::duplicate()));
    }

    let membership = match MembershipRepo::create(&state.pool, &payment).await {
        Ok(membership) => membership,
        Err(e) if is_unique_violation(&e, PAYMENT_REFERENCE_CONSTRAINT) => {
            tracing::info!(
                payment_reference = %payment.payment_reference,
                "Concurrent duplicate payment event"
            );
            return Ok(Json(WebhookAck::duplicate()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        membership_id = membership.id,
        club_id = membership.club_id,
        year = membership.year,
        "Membership recorded"
    );

    send_confirmation(&state, &payment, &membership).await;

    let evicted = state.cache.evict(&paths_for(Target::Membership)).await;
    tracing::debug!(evicted, "Members page evicted");

    Ok(Json(WebhookAck::handled(true)))
}

/// Best-effort confirmation email to the payer.
async fn send_confirmation(state: &SiteState, payment: &MembershipPayment, membership: &Membership) {
    let (Some(email), Some(to)) = (&state.email, payment.payer_email.as_deref()) else {
        return;
    };
    if let Err(e) = email
        .send_membership_confirmation(
            to,
            &membership.club_name,
            membership.year,
            membership.amount_cents,
            &membership.currency,
        )
        .await
    {
        tracing::warn!(error = %e, membership_id = membership.id, "Failed to send membership confirmation");
    }
}
