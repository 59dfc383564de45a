//! Save Push Token Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::MemberStore;
use crate::error::{MembershipError, MembershipResult};

/// Stores the caller's device token for puzzle notifications
pub struct SavePushTokenUseCase<R>
where
    R: MemberStore,
{
    repo: Arc<R>,
}

impl<R> SavePushTokenUseCase<R>
where
    R: MemberStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Writes only the token column; the returned user is the stored row
    pub async fn execute(&self, user: &User, push_token: &str) -> MembershipResult<User> {
        let push_token = push_token.trim();
        if push_token.is_empty() {
            return Err(MembershipError::InvalidArgument(
                "push_token cannot be empty".to_string(),
            ));
        }

        let user = self
            .repo
            .set_push_token(&user.user_id, push_token)
            .await?
            .ok_or(MembershipError::UserNotFound)?;

        tracing::debug!(user_id = %user.user_id, "Push token saved");
        Ok(user)
    }
}
