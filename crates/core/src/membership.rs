//! Payment webhook verification and membership extraction.
//!
//! The payment processor signs every webhook delivery with a header of the
//! form `t=<unix seconds>,v1=<hex hmac>[,v1=<hex hmac>...]`, where each
//! signature is HMAC-SHA256 over `"{t}.{raw body}"` keyed by the endpoint
//! secret. Several `v1` entries appear while a secret is being rolled.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::CoreError;
use crate::types::DbId;

type HmacSha256 = Hmac<Sha256>;

/// Maximum age (and future skew) of a signed webhook timestamp.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// The only event type that creates memberships.
pub const EVENT_CHECKOUT_COMPLETED: &str = "checkout.session.completed";

/// Earliest and latest membership year accepted from checkout metadata.
pub const MIN_MEMBERSHIP_YEAR: i32 = 2000;
pub const MAX_MEMBERSHIP_YEAR: i32 = 2100;

// ---------------------------------------------------------------------------
// Signature verification
// ---------------------------------------------------------------------------

/// Reasons a webhook signature header is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature header has no timestamp")]
    MissingTimestamp,
    #[error("signature header has no v1 signatures")]
    NoSignatures,
    #[error("timestamp is outside the tolerance window")]
    OutsideTolerance,
    #[error("no signature matches the payload")]
    Mismatch,
}

/// Compute the hex `v1` signature for `payload` signed at `timestamp`.
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex_encode(&mac.finalize().into_bytes())
}

/// Verify a signature header against the raw request body.
///
/// `now` is the current Unix time in seconds. Comparison of each candidate
/// signature is constant-time.
pub fn verify_signature(
    secret: &str,
    header: &str,
    payload: &[u8],
    now: i64,
) -> Result<(), SignatureError> {
    let mut timestamp: Option<i64> = None;
    let mut signatures: Vec<&str> = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            "v1" => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MissingTimestamp)?;
    if signatures.is_empty() {
        return Err(SignatureError::NoSignatures);
    }
    if now.abs_diff(timestamp) > SIGNATURE_TOLERANCE_SECS.unsigned_abs() {
        return Err(SignatureError::OutsideTolerance);
    }

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    let matched = signatures.iter().any(|candidate| {
        hex_decode(candidate)
            .map(|bytes| mac.clone().verify_slice(&bytes).is_ok())
            .unwrap_or(false)
    });

    if matched {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Event payloads
// ---------------------------------------------------------------------------

/// Webhook event envelope.
#[derive(Debug, Deserialize)]
pub struct PaymentEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: PaymentEventData,
}

#[derive(Debug, Deserialize)]
pub struct PaymentEventData {
    pub object: serde_json::Value,
}

/// The subset of a completed checkout session the membership needs.
#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
    /// Either a plain id or an expanded object with an `id` field.
    pub payment_intent: Option<serde_json::Value>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub customer_details: Option<CustomerDetails>,
    pub customer_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerDetails {
    pub email: Option<String>,
}

/// Membership data extracted from a completed checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipPayment {
    pub club_id: DbId,
    pub year: i32,
    pub amount_cents: i64,
    pub currency: String,
    /// Checkout session id; the idempotency key.
    pub payment_reference: String,
    pub payment_intent_id: Option<String>,
    pub payer_email: Option<String>,
}

impl CheckoutSession {
    /// Extract the membership payment, validating the checkout metadata.
    pub fn to_membership_payment(&self) -> Result<MembershipPayment, CoreError> {
        let club_id: DbId = self
            .metadata
            .get("club_id")
            .ok_or_else(|| CoreError::Validation("Checkout metadata is missing club_id".into()))?
            .parse()
            .map_err(|_| CoreError::Validation("Checkout metadata club_id is not a number".into()))?;

        let year: i32 = self
            .metadata
            .get("year")
            .ok_or_else(|| CoreError::Validation("Checkout metadata is missing year".into()))?
            .parse()
            .map_err(|_| CoreError::Validation("Checkout metadata year is not a number".into()))?;

        if !(MIN_MEMBERSHIP_YEAR..=MAX_MEMBERSHIP_YEAR).contains(&year) {
            return Err(CoreError::Validation(format!(
                "Membership year {year} is out of range"
            )));
        }

        let amount_cents = self
            .amount_total
            .ok_or_else(|| CoreError::Validation("Checkout session is missing amount_total".into()))?;

        let currency = self
            .currency
            .as_deref()
            .ok_or_else(|| CoreError::Validation("Checkout session is missing currency".into()))?
            .to_lowercase();

        let payment_intent_id = match &self.payment_intent {
            Some(serde_json::Value::String(id)) => Some(id.clone()),
            Some(serde_json::Value::Object(obj)) => {
                obj.get("id").and_then(|v| v.as_str()).map(str::to_string)
            }
            _ => None,
        };

        let payer_email = self
            .customer_details
            .as_ref()
            .and_then(|d| d.email.clone())
            .or_else(|| self.customer_email.clone());

        Ok(MembershipPayment {
            club_id,
            year,
            amount_cents,
            currency,
            payment_reference: self.id.clone(),
            payment_intent_id,
            payer_email,
        })
    }
}

/// Render an amount in minor units for humans, e.g. `150000, "sek"` -> `"1500.00 SEK"`.
pub fn format_amount(amount_cents: i64, currency: &str) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let abs = amount_cents.unsigned_abs();
    format!(
        "{sign}{}.{:02} {}",
        abs / 100,
        abs % 100,
        currency.to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SECRET: &str = "whsec_test_secret";

    fn header_for(payload: &[u8], timestamp: i64) -> String {
        format!("t={timestamp},v1={}", compute_signature(SECRET, timestamp, payload))
    }

    #[test]
    fn valid_signature_verifies() {
        let body = br#"{"id":"evt_1"}"#;
        let now = 1_700_000_000;
        assert_eq!(verify_signature(SECRET, &header_for(body, now), body, now), Ok(()));
    }

    #[test]
    fn any_matching_v1_is_accepted() {
        let body = b"payload";
        let now = 1_700_000_000;
        let good = compute_signature(SECRET, now, body);
        let header = format!("t={now},v1={},v1={good}", "00".repeat(32));
        assert_eq!(verify_signature(SECRET, &header, body, now), Ok(()));
    }

    #[test]
    fn extreme_timestamps_are_outside_tolerance() {
        let now = 1_700_000_000;
        for t in [i64::MIN, i64::MAX] {
            let header = format!("t={t},v1={}", "00".repeat(32));
            assert_eq!(
                verify_signature(SECRET, &header, b"{}", now),
                Err(SignatureError::OutsideTolerance)
            );
        }
    }

    #[test]
    fn tampered_body_is_rejected() {
        let now = 1_700_000_000;
        let header = header_for(b"original", now);
        assert_eq!(
            verify_signature(SECRET, &header, b"tampered", now),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let now = 1_700_000_000;
        let header = format!("t={now},v1={}", compute_signature("other", now, b"x"));
        assert_eq!(
            verify_signature(SECRET, &header, b"x", now),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let signed_at = 1_700_000_000;
        let header = header_for(b"x", signed_at);
        assert_eq!(
            verify_signature(SECRET, &header, b"x", signed_at + SIGNATURE_TOLERANCE_SECS + 1),
            Err(SignatureError::OutsideTolerance)
        );
    }

    #[test]
    fn malformed_headers_are_rejected() {
        assert_eq!(
            verify_signature(SECRET, "v1=abcd", b"x", 0),
            Err(SignatureError::MissingTimestamp)
        );
        assert_eq!(
            verify_signature(SECRET, "t=10", b"x", 10),
            Err(SignatureError::NoSignatures)
        );
        assert_eq!(
            verify_signature(SECRET, "t=10,v1=zz", b"x", 10),
            Err(SignatureError::Mismatch)
        );
    }

    fn session(metadata: serde_json::Value) -> CheckoutSession {
        serde_json::from_value(serde_json::json!({
            "id": "cs_test_123",
            "amount_total": 150000,
            "currency": "SEK",
            "payment_intent": { "id": "pi_456" },
            "metadata": metadata,
            "customer_details": { "email": "treasurer@club.example" }
        }))
        .unwrap()
    }

    #[test]
    fn extracts_membership_payment() {
        let payment = session(serde_json::json!({ "club_id": "7", "year": "2025" }))
            .to_membership_payment()
            .unwrap();
        assert_eq!(
            payment,
            MembershipPayment {
                club_id: 7,
                year: 2025,
                amount_cents: 150000,
                currency: "sek".into(),
                payment_reference: "cs_test_123".into(),
                payment_intent_id: Some("pi_456".into()),
                payer_email: Some("treasurer@club.example".into()),
            }
        );
    }

    #[test]
    fn missing_metadata_is_a_validation_error() {
        let err = session(serde_json::json!({ "year": "2025" }))
            .to_membership_payment()
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("club_id"));

        let err = session(serde_json::json!({ "club_id": "7", "year": "1850" }))
            .to_membership_payment()
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn format_amount_uses_minor_units() {
        assert_eq!(format_amount(150000, "sek"), "1500.00 SEK");
        assert_eq!(format_amount(5, "eur"), "0.05 EUR");
    }
}
