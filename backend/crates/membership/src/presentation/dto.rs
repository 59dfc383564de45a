//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    subscription::{SubscriptionAction, SubscriptionStatus},
    user_role::UserRole,
};

// ============================================================================
// Users
// ============================================================================

/// User record as clients see it. The push token stays server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub role: UserRole,
    pub subscription_status: SubscriptionStatus,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            picture: user.picture.clone(),
            role: user.role,
            subscription_status: user.subscription_status,
            subscription_expires_at: user.subscription_expires_at,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// POST /auth/session response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub session_token: String,
}

/// Save push token request
#[derive(Debug, Clone, Deserialize)]
pub struct SavePushTokenRequest {
    pub push_token: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Subscription
// ============================================================================

/// GET /subscription response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub status: SubscriptionStatus,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<&User> for SubscriptionResponse {
    fn from(user: &User) -> Self {
        Self {
            status: user.subscription_status,
            expires_at: user.subscription_expires_at,
            is_active: user.subscription_status.is_active(),
        }
    }
}

/// Query of POST /admin/members/{user_id}/subscription
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubscriptionQuery {
    pub action: String,
    #[serde(default = "default_months")]
    pub months: i64,
}

fn default_months() -> i64 {
    1
}

/// Subscription update response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionUpdatedResponse {
    pub message: String,
    pub action: String,
    pub subscription_status: SubscriptionStatus,
    pub subscription_expires_at: Option<DateTime<Utc>>,
}

impl SubscriptionUpdatedResponse {
    pub fn new(member: &User, action: SubscriptionAction) -> Self {
        Self {
            message: "Subscription updated successfully".to_string(),
            action: action.to_string(),
            subscription_status: member.subscription_status,
            subscription_expires_at: member.subscription_expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::email::Email;

    #[test]
    fn test_session_response_is_flat_and_hides_push_token() {
        let mut user = User::provision(
            Email::new("m@club.org").unwrap(),
            "M".to_string(),
            None,
        );
        user.set_push_token("ExponentPushToken[x]".to_string());

        let body = serde_json::to_value(SessionResponse {
            user: UserResponse::from(&user),
            session_token: "tok".to_string(),
        })
        .unwrap();

        assert_eq!(body["session_token"], "tok");
        assert_eq!(body["email"], "m@club.org");
        assert_eq!(body["role"], "member");
        assert_eq!(body["subscription_status"], "inactive");
        assert!(body["subscription_expires_at"].is_null());
        assert!(body.get("push_token").is_none());
    }
}
