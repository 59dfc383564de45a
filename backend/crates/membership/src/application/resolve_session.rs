//! Resolve Session Use Case
//!
//! Turns an opaque session token into the user it belongs to. Read-only:
//! resolution never extends or deletes the session.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entity::user::User;
use crate::domain::repository::MemberStore;
use crate::error::{MembershipError, MembershipResult};

/// Resolve session use case
pub struct ResolveSessionUseCase<R>
where
    R: MemberStore,
{
    repo: Arc<R>,
}

impl<R> ResolveSessionUseCase<R>
where
    R: MemberStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, session_token: Option<&str>) -> MembershipResult<User> {
        let token = session_token.ok_or(MembershipError::NotAuthenticated)?;
        let digest = platform::token::token_digest(token);

        let session = self
            .repo
            .find_session(&digest)
            .await?
            .ok_or(MembershipError::InvalidSession)?;

        if session.is_expired_at(Utc::now()) {
            return Err(MembershipError::SessionExpired);
        }

        self.repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(MembershipError::UserNotFound)
    }
}

/// Gate for owner-only actions
pub fn require_owner(user: &User, denial: &'static str) -> MembershipResult<()> {
    if user.is_owner() {
        Ok(())
    } else {
        Err(MembershipError::OwnerRequired(denial))
    }
}

/// Gate for club content: owners or members with an active subscription
pub fn require_content_access(user: &User) -> MembershipResult<()> {
    if user.can_view_content() {
        Ok(())
    } else {
        Err(MembershipError::SubscriptionInactive)
    }
}
