//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure layer.

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{
    email::Email, subscription::Subscription, user_role::UserRole,
};
use crate::error::MembershipResult;
use kernel::id::UserId;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user; a taken email is `EmailTaken`
    async fn create(&self, user: &User) -> MembershipResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> MembershipResult<Option<User>>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &Email) -> MembershipResult<Option<User>>;

    /// Replace name and picture; returns the stored user, `None` if absent
    async fn refresh_profile(
        &self,
        user_id: &UserId,
        name: &str,
        picture: Option<&str>,
    ) -> MembershipResult<Option<User>>;

    /// Replace the device token only
    async fn set_push_token(
        &self,
        user_id: &UserId,
        push_token: &str,
    ) -> MembershipResult<Option<User>>;

    /// Replace the role only
    async fn set_role(&self, user_id: &UserId, role: UserRole) -> MembershipResult<Option<User>>;

    /// Replace status and expiry only
    async fn set_subscription(
        &self,
        user_id: &UserId,
        subscription: &Subscription,
    ) -> MembershipResult<Option<User>>;

    /// All users, newest first
    async fn list_newest_first(&self) -> MembershipResult<Vec<User>>;

    /// Push tokens of non-owner members whose subscription is active
    async fn push_tokens_of_active_members(&self) -> MembershipResult<Vec<String>>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Store a session; reissuing the same token replaces the old row
    async fn create_session(&self, session: &Session) -> MembershipResult<()>;

    /// Exact-match lookup by token digest
    async fn find_session(&self, digest: &[u8]) -> MembershipResult<Option<Session>>;

    /// Delete a session, returning whether one existed
    async fn delete_session(&self, digest: &[u8]) -> MembershipResult<bool>;

    /// Clean up expired sessions
    async fn cleanup_expired_sessions(&self) -> MembershipResult<u64>;
}

/// Everything the membership use cases need from one store
pub trait MemberStore: UserRepository + SessionRepository + Clone + Send + Sync + 'static {}

impl<T> MemberStore for T where T: UserRepository + SessionRepository + Clone + Send + Sync + 'static
{}
