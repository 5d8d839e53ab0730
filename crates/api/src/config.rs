use crate::auth::jwt::JwtConfig;

/// Default allowed origin for local frontend development.
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Admin dashboard configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Base URL of the admin frontend, used in invitation links.
    pub admin_base_url: String,
    /// Days until a new invitation expires (default: `7`).
    pub invitation_expiry_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `ADMIN_BASE_URL`         | `http://localhost:5173`    |
    /// | `INVITATION_EXPIRY_DAYS` | `7`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let admin_base_url =
            std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.into());

        let invitation_expiry_days: i64 = std::env::var("INVITATION_EXPIRY_DAYS")
            .unwrap_or_else(|_| clubhouse_core::invitation::DEFAULT_EXPIRY_DAYS.to_string())
            .parse()
            .expect("INVITATION_EXPIRY_DAYS must be a valid i64");
        assert!(
            invitation_expiry_days > 0,
            "INVITATION_EXPIRY_DAYS must be positive"
        );

        Self {
            host,
            port,
            cors_origins: cors_origins_from_env(),
            request_timeout_secs: request_timeout_from_env(),
            jwt: JwtConfig::from_env(),
            admin_base_url,
            invitation_expiry_days,
        }
    }
}

/// Public site configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// How long a cached page stays fresh (default: `3600`).
    pub page_cache_ttl_secs: u64,
    /// Shared secret for `POST /api/revalidate`. Unset rejects every call.
    pub revalidate_secret: Option<String>,
    /// Signing secret of the payment provider's webhooks.
    pub payment_webhook_secret: String,
    /// Inbox for contact form messages. Unset makes the form fail with 502.
    pub contact_recipient: Option<String>,
}

impl SiteConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `SITE_HOST`              | `0.0.0.0`                  |
    /// | `SITE_PORT`              | `3001`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `PAGE_CACHE_TTL_SECS`    | `3600`                     |
    /// | `REVALIDATE_SECRET`      | unset                      |
    /// | `PAYMENT_WEBHOOK_SECRET` | **required**               |
    /// | `CONTACT_RECIPIENT`      | unset                      |
    ///
    /// # Panics
    ///
    /// Panics if `PAYMENT_WEBHOOK_SECRET` is not set or a value is malformed.
    pub fn from_env() -> Self {
        let host = std::env::var("SITE_HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("SITE_PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("SITE_PORT must be a valid u16");

        let page_cache_ttl_secs: u64 = std::env::var("PAGE_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("PAGE_CACHE_TTL_SECS must be a valid u64");

        let payment_webhook_secret = std::env::var("PAYMENT_WEBHOOK_SECRET")
            .expect("PAYMENT_WEBHOOK_SECRET must be set in the environment");
        assert!(
            !payment_webhook_secret.is_empty(),
            "PAYMENT_WEBHOOK_SECRET must not be empty"
        );

        let contact_recipient = std::env::var("CONTACT_RECIPIENT")
            .ok()
            .filter(|s| !s.is_empty());
        if let Some(recipient) = &contact_recipient {
            assert!(
                clubhouse_core::contact::is_valid_email(recipient),
                "CONTACT_RECIPIENT must be a valid email address"
            );
        }

        Self {
            host,
            port,
            cors_origins: cors_origins_from_env(),
            request_timeout_secs: request_timeout_from_env(),
            page_cache_ttl_secs,
            revalidate_secret: std::env::var("REVALIDATE_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            payment_webhook_secret,
            contact_recipient,
        }
    }
}

fn cors_origins_from_env() -> Vec<String> {
    parse_origins(&std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.into()))
}

fn request_timeout_from_env() -> u64 {
    std::env::var("REQUEST_TIMEOUT_SECS")
        .unwrap_or_else(|_| "30".into())
        .parse()
        .expect("REQUEST_TIMEOUT_SECS must be a valid u64")
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_trims_and_drops_blanks() {
        assert_eq!(
            parse_origins(" https://a.example.com ,, https://b.example.com,"),
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert!(parse_origins("").is_empty());
    }
}
