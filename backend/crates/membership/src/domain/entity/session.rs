//! Session Entity
//!
//! A bearer credential issued by the identity provider and bound to a user.
//! Only the SHA-256 digest of the token is kept.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;

/// Session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub token_digest: Vec<u8>,
    /// Absolute expiry, never slides
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Issue a session for `user_id` valid for `ttl` from now
    pub fn issue(user_id: UserId, token: &str, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            token_digest: platform::token::token_digest(token),
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
