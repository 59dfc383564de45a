//! Create Session Use Case
//!
//! Exchanges an external session identifier with the identity provider,
//! provisions or refreshes the user, and records a new session.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::MembershipConfig;
use crate::domain::entity::{session::Session, user::User};
use crate::domain::gateway::IdentityGateway;
use crate::domain::repository::MemberStore;
use crate::domain::value_object::email::Email;
use crate::error::{MembershipError, MembershipResult};

/// Create session output
#[derive(Debug, Clone)]
pub struct CreateSessionOutput {
    pub user: User,
    /// Provider-issued token; also the cookie value
    pub session_token: String,
    /// True when the email had never been seen before
    pub provisioned: bool,
}

/// Create session use case
pub struct CreateSessionUseCase<R, G>
where
    R: MemberStore,
    G: IdentityGateway,
{
    repo: Arc<R>,
    gateway: Arc<G>,
    config: Arc<MembershipConfig>,
}

impl<R, G> CreateSessionUseCase<R, G>
where
    R: MemberStore,
    G: IdentityGateway,
{
    pub fn new(repo: Arc<R>, gateway: Arc<G>, config: Arc<MembershipConfig>) -> Self {
        Self {
            repo,
            gateway,
            config,
        }
    }

    pub async fn execute(&self, external_session_id: &str) -> MembershipResult<CreateSessionOutput> {
        let external_session_id = external_session_id.trim();
        if external_session_id.is_empty() {
            return Err(MembershipError::MissingHeader("X-Session-ID"));
        }

        let identity = self.gateway.exchange(external_session_id).await?;
        let email = Email::normalize(&identity.email)
            .map_err(|e| MembershipError::IdentityExchange(format!("unusable email: {e}")))?;
        let name = identity.name.as_str();
        let picture = identity.picture.as_deref();

        let (user, provisioned) = match self.repo.find_by_email(&email).await? {
            Some(existing) => (self.refresh(&existing.user_id, name, picture).await?, false),
            None => {
                let user =
                    User::provision(email.clone(), name.to_string(), picture.map(str::to_string));
                match self.repo.create(&user).await {
                    Ok(()) => (user, true),
                    Err(MembershipError::EmailTaken) => {
                        // A concurrent first sign-in inserted the row first
                        tracing::debug!(email = %email, "Lost provisioning race, reusing user");
                        let existing = self
                            .repo
                            .find_by_email(&email)
                            .await?
                            .ok_or(MembershipError::UserNotFound)?;
                        (self.refresh(&existing.user_id, name, picture).await?, false)
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        // Every exchange gets its own session, even if others are still live
        let session = Session::issue(
            user.user_id,
            &identity.session_token,
            self.config.session_ttl_chrono(),
        );
        self.repo.create_session(&session).await?;

        tracing::info!(
            user_id = %user.user_id,
            provisioned = provisioned,
            "Session created"
        );

        Ok(CreateSessionOutput {
            user,
            session_token: identity.session_token,
            provisioned,
        })
    }

    async fn refresh(
        &self,
        user_id: &UserId,
        name: &str,
        picture: Option<&str>,
    ) -> MembershipResult<User> {
        self.repo
            .refresh_profile(user_id, name, picture)
            .await?
            .ok_or(MembershipError::UserNotFound)
    }
}
