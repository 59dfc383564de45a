//! Admin Use Cases
//!
//! Member listing and owner promotion.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::application::config::MembershipConfig;
use crate::application::resolve_session::{ResolveSessionUseCase, require_owner};
use crate::domain::entity::user::User;
use crate::domain::repository::MemberStore;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{MembershipError, MembershipResult};

/// List members use case
pub struct ListMembersUseCase<R>
where
    R: MemberStore,
{
    repo: Arc<R>,
}

impl<R> ListMembersUseCase<R>
where
    R: MemberStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All users, newest first
    pub async fn execute(&self, caller: &User) -> MembershipResult<Vec<User>> {
        require_owner(caller, "Only owners can view members")?;
        self.repo.list_newest_first().await
    }
}

/// Promote owner input
#[derive(Debug, Clone, Default)]
pub struct PromoteOwnerInput {
    pub session_token: Option<String>,
    /// Value of the `X-Bootstrap-Secret` header
    pub bootstrap_secret: Option<String>,
    pub email: String,
}

/// Promote owner use case
///
/// Allowed for an existing owner, or for a caller presenting the configured
/// bootstrap secret. With no secret configured only owners can promote.
pub struct PromoteOwnerUseCase<R>
where
    R: MemberStore,
{
    repo: Arc<R>,
    config: Arc<MembershipConfig>,
}

impl<R> PromoteOwnerUseCase<R>
where
    R: MemberStore,
{
    pub fn new(repo: Arc<R>, config: Arc<MembershipConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: PromoteOwnerInput) -> MembershipResult<User> {
        let authorized_by = if self.bootstrap_secret_matches(input.bootstrap_secret.as_deref()) {
            "bootstrap_secret".to_string()
        } else {
            let caller = ResolveSessionUseCase::new(self.repo.clone())
                .execute(input.session_token.as_deref())
                .await?;
            require_owner(&caller, "Only owners can promote owners")?;
            caller.user_id.to_string()
        };

        let email = Email::normalize(&input.email).map_err(|_| MembershipError::UserNotFound)?;
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(MembershipError::UserNotFound)?;

        if user.is_owner() {
            tracing::debug!(user_id = %user.user_id, "User already an owner");
            return Ok(user);
        }

        let user = self
            .repo
            .set_role(&user.user_id, UserRole::Owner)
            .await?
            .ok_or(MembershipError::UserNotFound)?;
        tracing::warn!(
            user_id = %user.user_id,
            email = %user.email,
            authorized_by = %authorized_by,
            "User promoted to owner"
        );

        Ok(user)
    }

    /// Compares digests so the comparison time does not depend on the prefix
    fn bootstrap_secret_matches(&self, presented: Option<&str>) -> bool {
        match (self.config.owner_bootstrap_secret.as_deref(), presented) {
            (Some(expected), Some(presented)) if !expected.is_empty() => {
                Sha256::digest(expected.as_bytes()) == Sha256::digest(presented.as_bytes())
            }
            _ => false,
        }
    }
}
