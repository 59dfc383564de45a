//! Application Configuration
//!
//! Configuration for the membership application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Identity exchange endpoint used when none is configured
pub const DEFAULT_IDENTITY_GATEWAY_URL: &str =
    "https://demobackend.emergentagent.com/auth/v1/env/oauth/session-data";

/// Membership application configuration
#[derive(Debug, Clone)]
pub struct MembershipConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Absolute session lifetime
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Identity provider session-data endpoint
    pub identity_gateway_url: String,
    /// Upper bound for one identity exchange
    pub identity_gateway_timeout: Duration,
    /// Shared secret that may promote owners without an owner session
    pub owner_bootstrap_secret: Option<String>,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_token".to_string(),
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            cookie_secure: true,
            cookie_same_site: SameSite::None,
            identity_gateway_url: DEFAULT_IDENTITY_GATEWAY_URL.to_string(),
            identity_gateway_timeout: Duration::from_secs(10),
            owner_bootstrap_secret: None,
        }
    }
}

impl MembershipConfig {
    /// Create config for development (insecure cookie, Lax)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            cookie_same_site: SameSite::Lax,
            ..Default::default()
        }
    }

    /// Session TTL as a chrono duration
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or_else(|_| chrono::Duration::days(7))
    }

    /// Cookie attributes for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }
}
