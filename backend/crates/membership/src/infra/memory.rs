//! In-Memory Repository Implementations
//!
//! Backs tests and runs without `DATABASE_URL`. Uniqueness rules mirror the
//! database schema.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use parking_lot::RwLock;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, subscription::Subscription, user_role::UserRole,
};
use crate::error::{MembershipError, MembershipResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    sessions: HashMap<Vec<u8>, Session>,
}

/// Process-local membership repository
#[derive(Clone, Default)]
pub struct InMemoryMembershipRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field-level write under one lock, like a single-row UPDATE
    fn modify(&self, user_id: &UserId, change: impl FnOnce(&mut User)) -> Option<User> {
        let mut tables = self.tables.write();
        let user = tables.users.get_mut(user_id)?;
        change(user);
        Some(user.clone())
    }
}

impl UserRepository for InMemoryMembershipRepository {
    async fn create(&self, user: &User) -> MembershipResult<()> {
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(MembershipError::EmailTaken);
        }
        tables.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> MembershipResult<Option<User>> {
        Ok(self.tables.read().users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> MembershipResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn refresh_profile(
        &self,
        user_id: &UserId,
        name: &str,
        picture: Option<&str>,
    ) -> MembershipResult<Option<User>> {
        Ok(self.modify(user_id, |u| {
            u.refresh_profile(name.to_string(), picture.map(str::to_string))
        }))
    }

    async fn set_push_token(
        &self,
        user_id: &UserId,
        push_token: &str,
    ) -> MembershipResult<Option<User>> {
        Ok(self.modify(user_id, |u| u.set_push_token(push_token.to_string())))
    }

    async fn set_role(&self, user_id: &UserId, role: UserRole) -> MembershipResult<Option<User>> {
        Ok(self.modify(user_id, |u| u.role = role))
    }

    async fn set_subscription(
        &self,
        user_id: &UserId,
        subscription: &Subscription,
    ) -> MembershipResult<Option<User>> {
        Ok(self.modify(user_id, |u| u.set_subscription(*subscription)))
    }

    async fn list_newest_first(&self) -> MembershipResult<Vec<User>> {
        let mut users: Vec<User> = self.tables.read().users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn push_tokens_of_active_members(&self) -> MembershipResult<Vec<String>> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .filter(|u| u.subscription_status.is_active() && !u.is_owner())
            .filter_map(|u| u.push_token.clone())
            .filter(|t| !t.is_empty())
            .collect())
    }
}

impl SessionRepository for InMemoryMembershipRepository {
    async fn create_session(&self, session: &Session) -> MembershipResult<()> {
        self.tables
            .write()
            .sessions
            .insert(session.token_digest.clone(), session.clone());
        Ok(())
    }

    async fn find_session(&self, digest: &[u8]) -> MembershipResult<Option<Session>> {
        Ok(self.tables.read().sessions.get(digest).cloned())
    }

    async fn delete_session(&self, digest: &[u8]) -> MembershipResult<bool> {
        Ok(self.tables.write().sessions.remove(digest).is_some())
    }

    async fn cleanup_expired_sessions(&self) -> MembershipResult<u64> {
        let now = Utc::now();
        let mut tables = self.tables.write();
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - tables.sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::subscription::SubscriptionStatus;
    use chrono::Duration;

    fn user(email: &str) -> User {
        User::provision(Email::new(email).unwrap(), "Player".to_string(), None)
    }

    #[tokio::test]
    async fn test_email_is_unique() {
        let repo = InMemoryMembershipRepository::new();
        repo.create(&user("a@club.org")).await.unwrap();
        assert!(matches!(
            repo.create(&user("A@club.org")).await,
            Err(MembershipError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn test_field_writes_leave_other_fields_alone() {
        let repo = InMemoryMembershipRepository::new();
        let stale = user("m@club.org");
        repo.create(&stale).await.unwrap();

        let active = Subscription {
            status: SubscriptionStatus::Active,
            expires_at: Some(Utc::now() + Duration::days(30)),
        };
        repo.set_subscription(&stale.user_id, &active).await.unwrap();
        repo.set_push_token(&stale.user_id, "ExponentPushToken[m]")
            .await
            .unwrap();
        let stored = repo
            .refresh_profile(&stale.user_id, "Renamed", None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stored.subscription(), active);
        assert_eq!(stored.push_token.as_deref(), Some("ExponentPushToken[m]"));
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.role, UserRole::Member);

        assert!(repo
            .set_role(&UserId::new(), UserRole::Owner)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_push_tokens_only_for_active_members() {
        let repo = InMemoryMembershipRepository::new();

        let mut active = user("active@club.org");
        active.subscription_status = SubscriptionStatus::Active;
        active.set_push_token("ExponentPushToken[a]".to_string());
        let mut inactive = user("inactive@club.org");
        inactive.set_push_token("ExponentPushToken[b]".to_string());
        let mut silent = user("silent@club.org");
        silent.subscription_status = SubscriptionStatus::Active;

        for u in [&active, &inactive, &silent] {
            repo.create(u).await.unwrap();
        }

        let tokens = repo.push_tokens_of_active_members().await.unwrap();
        assert_eq!(tokens, vec!["ExponentPushToken[a]".to_string()]);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let repo = InMemoryMembershipRepository::new();
        let live = Session::issue(UserId::new(), "live", Duration::days(7));
        let stale = Session::issue(UserId::new(), "stale", Duration::days(-1));
        repo.create_session(&live).await.unwrap();
        repo.create_session(&stale).await.unwrap();

        assert_eq!(repo.cleanup_expired_sessions().await.unwrap(), 1);
        assert!(repo.find_session(&live.token_digest).await.unwrap().is_some());
        assert!(repo.delete_session(&live.token_digest).await.unwrap());
        assert!(!repo.delete_session(&live.token_digest).await.unwrap());
    }
}
