//! Email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer is constructed.

use chrono::{DateTime, Utc};
use clubhouse_core::contact::ContactSubmission;
use clubhouse_core::membership::format_amount;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@clubhouse.local";

/// Prefix for every subject line.
const SUBJECT_PREFIX: &str = "[Golf Association]";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `SMTP_HOST`     | yes      | -                          |
    /// | `SMTP_PORT`     | no       | `587`                      |
    /// | `SMTP_FROM`     | no       | `noreply@clubhouse.local`  |
    /// | `SMTP_USER`     | no       | -                          |
    /// | `SMTP_PASSWORD` | no       | -                          |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok().filter(|h| !h.is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Message builders
// ---------------------------------------------------------------------------

/// Invitation to join the admin dashboard.
pub fn invitation_message(
    from: &str,
    to: &str,
    accept_link: &str,
    role: &str,
    expires_at: DateTime<Utc>,
) -> Result<Message, EmailError> {
    let body = format!(
        "You have been invited to the golf association admin dashboard as {role}.\n\n\
         Accept the invitation here:\n{accept_link}\n\n\
         The link expires on {}.\n\n\
         If you were not expecting this email you can ignore it.",
        expires_at.format("%Y-%m-%d %H:%M UTC"),
    );
    Message::builder()
        .from(from.parse()?)
        .to(to.parse()?)
        .subject(format!("{SUBJECT_PREFIX} You have been invited"))
        .header(ContentType::TEXT_PLAIN)
        .body(body)
        .map_err(|e| EmailError::Build(e.to_string()))
}

/// Receipt sent to the payer after a membership payment.
pub fn membership_confirmation_message(
    from: &str,
    to: &str,
    club_name: &str,
    year: i32,
    amount_cents: i64,
    currency: &str,
) -> Result<Message, EmailError> {
    let body = format!(
        "Thank you! The {year} membership for {club_name} is registered.\n\n\
         Amount paid: {}\n",
        format_amount(amount_cents, currency),
    );
    Message::builder()
        .from(from.parse()?)
        .to(to.parse()?)
        .subject(format!("{SUBJECT_PREFIX} Membership {year} confirmed"))
        .header(ContentType::TEXT_PLAIN)
        .body(body)
        .map_err(|e| EmailError::Build(e.to_string()))
}

/// A contact form submission forwarded to the association, with reply-to
/// pointing at the sender.
pub fn contact_message(
    from: &str,
    recipient: &str,
    submission: &ContactSubmission,
) -> Result<Message, EmailError> {
    let body = format!(
        "Name: {}\nEmail: {}\n\n{}",
        submission.name.trim(),
        submission.email.trim(),
        submission.message.trim(),
    );
    Message::builder()
        .from(from.parse()?)
        .reply_to(submission.email.trim().parse()?)
        .to(recipient.parse()?)
        .subject(format!("{SUBJECT_PREFIX} {}", submission.mail_subject()))
        .header(ContentType::TEXT_PLAIN)
        .body(body)
        .map_err(|e| EmailError::Build(e.to_string()))
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDelivery {
    /// Create a delivery service. Fails if the relay host is invalid.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: transport_builder.build(),
            config,
        })
    }

    /// Sender address used for every message.
    pub fn from_address(&self) -> &str {
        &self.config.from_address
    }

    pub async fn send_invitation(
        &self,
        to: &str,
        accept_link: &str,
        role: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), EmailError> {
        let message = invitation_message(self.from_address(), to, accept_link, role, expires_at)?;
        self.mailer.send(message).await?;
        tracing::info!(to, role, "Invitation email sent");
        Ok(())
    }

    pub async fn send_membership_confirmation(
        &self,
        to: &str,
        club_name: &str,
        year: i32,
        amount_cents: i64,
        currency: &str,
    ) -> Result<(), EmailError> {
        let message = membership_confirmation_message(
            self.from_address(),
            to,
            club_name,
            year,
            amount_cents,
            currency,
        )?;
        self.mailer.send(message).await?;
        tracing::info!(to, year, "Membership confirmation sent");
        Ok(())
    }

    pub async fn send_contact(
        &self,
        recipient: &str,
        submission: &ContactSubmission,
    ) -> Result<(), EmailError> {
        let message = contact_message(self.from_address(), recipient, submission)?;
        self.mailer.send(message).await?;
        tracing::info!(recipient, "Contact message forwarded");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
