//! User Entity
//!
//! A club user, keyed internally by a system id and externally by email.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email,
    subscription::{Subscription, SubscriptionStatus},
    user_role::UserRole,
};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    /// Unique; the join key to the external identity
    pub email: Email,
    pub name: String,
    pub picture: Option<String>,
    pub role: UserRole,
    pub subscription_status: SubscriptionStatus,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    /// Expo device token for push notifications
    pub push_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Provision a user seen for the first time.
    ///
    /// New users are inactive members with no expiry. There is no trial.
    pub fn provision(email: Email, name: String, picture: Option<String>) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            name,
            picture,
            role: UserRole::Member,
            subscription_status: SubscriptionStatus::Inactive,
            subscription_expires_at: None,
            push_token: None,
            created_at: Utc::now(),
        }
    }

    /// Refresh the profile fields owned by the identity provider
    pub fn refresh_profile(&mut self, name: String, picture: Option<String>) {
        self.name = name;
        self.picture = picture;
    }

    pub fn is_owner(&self) -> bool {
        self.role.is_owner()
    }

    /// Owners always see content; members need an active subscription
    pub fn can_view_content(&self) -> bool {
        self.is_owner() || self.subscription_status.is_active()
    }

    pub fn subscription(&self) -> Subscription {
        Subscription {
            status: self.subscription_status,
            expires_at: self.subscription_expires_at,
        }
    }

    pub fn set_subscription(&mut self, subscription: Subscription) {
        self.subscription_status = subscription.status;
        self.subscription_expires_at = subscription.expires_at;
    }

    pub fn set_push_token(&mut self, token: String) {
        self.push_token = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::subscription::SubscriptionAction;
    use chrono::Duration;

    fn member() -> User {
        User::provision(
            Email::new("Player@Example.com").unwrap(),
            "Player".to_string(),
            None,
        )
    }

    #[test]
    fn test_provision_has_no_trial() {
        let user = member();
        assert_eq!(user.email.as_str(), "player@example.com");
        assert_eq!(user.role, UserRole::Member);
        assert_eq!(user.subscription_status, SubscriptionStatus::Inactive);
        assert!(user.subscription_expires_at.is_none());
        assert!(!user.can_view_content());
    }

    #[test]
    fn test_refresh_profile_keeps_role_and_subscription() {
        let mut user = member();
        user.role = UserRole::Owner;
        user.subscription_status = SubscriptionStatus::Active;

        user.refresh_profile("New Name".to_string(), Some("https://img".to_string()));

        assert_eq!(user.name, "New Name");
        assert_eq!(user.picture.as_deref(), Some("https://img"));
        assert_eq!(user.role, UserRole::Owner);
        assert_eq!(user.subscription_status, SubscriptionStatus::Active);
    }

    #[test]
    fn test_owner_sees_content_without_subscription() {
        let mut user = member();
        user.role = UserRole::Owner;
        assert!(user.is_owner());
        assert!(user.can_view_content());
    }

    #[test]
    fn test_set_subscription_activates() {
        let now = Utc::now();
        let mut user = member();
        let next = user
            .subscription()
            .apply(SubscriptionAction::Activate, 1, now)
            .unwrap();
        user.set_subscription(next);
        assert!(user.can_view_content());
        assert_eq!(user.subscription_expires_at, Some(now + Duration::days(30)));
    }
}
