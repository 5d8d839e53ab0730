//! Public contact form validation and the shared email-address check.

use serde::Deserialize;
use validator::ValidateEmail;

use crate::error::CoreError;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_SUBJECT_LENGTH: usize = 200;
pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// Whether `email` is a syntactically valid address.
pub fn is_valid_email(email: &str) -> bool {
    email.trim().to_string().validate_email()
}

/// Validate an email field, naming it in the error.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("'{}' is not a valid email address", email.trim())))
    }
}

/// Submission from the public contact form.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    /// Honeypot field. Hidden from humans; bots tend to fill it in.
    #[serde(default)]
    pub website: Option<String>,
}

impl ContactSubmission {
    /// A non-empty honeypot marks the submission as spam.
    pub fn is_spam(&self) -> bool {
        self.website.as_deref().is_some_and(|w| !w.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        crate::slug::validate_name("Name", &self.name, MAX_NAME_LENGTH)?;
        validate_email(&self.email)?;
        if let Some(subject) = &self.subject {
            if subject.chars().count() > MAX_SUBJECT_LENGTH {
                return Err(CoreError::Validation(format!(
                    "Subject must be at most {MAX_SUBJECT_LENGTH} characters"
                )));
            }
        }
        crate::slug::validate_name("Message", &self.message, MAX_MESSAGE_LENGTH)
    }

    /// Email subject line for the association's inbox.
    pub fn mail_subject(&self) -> String {
        match self.subject.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(subject) => format!("Contact form: {subject}"),
            None => format!("Contact form message from {}", self.name.trim()),
        }
    }
}
