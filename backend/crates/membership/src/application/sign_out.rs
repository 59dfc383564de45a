//! Sign Out Use Case
//!
//! Deletes the caller's session if there is one. Signing out without a
//! session is not an error.

use std::sync::Arc;

use crate::domain::repository::MemberStore;
use crate::error::MembershipResult;

/// Sign out use case
pub struct SignOutUseCase<R>
where
    R: MemberStore,
{
    repo: Arc<R>,
}

impl<R> SignOutUseCase<R>
where
    R: MemberStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns whether a session was deleted
    pub async fn execute(&self, session_token: Option<&str>) -> MembershipResult<bool> {
        let Some(token) = session_token else {
            return Ok(false);
        };

        let digest = platform::token::token_digest(token);
        let deleted = self.repo.delete_session(&digest).await?;

        tracing::info!(deleted = deleted, "User signed out");
        Ok(deleted)
    }
}
