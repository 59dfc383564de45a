//! Membership Error Types
//!
//! This module provides membership-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Membership-specific result type alias
pub type MembershipResult<T> = Result<T, MembershipError>;

/// Membership-specific error variants
#[derive(Debug, Error)]
pub enum MembershipError {
    /// No session token on the request
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Token does not match any stored session
    #[error("Invalid session")]
    InvalidSession,

    /// Session found but past its absolute expiry
    #[error("Session expired")]
    SessionExpired,

    /// Session points at a user that no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Another user already holds this email
    #[error("Email already registered")]
    EmailTaken,

    /// Admin target does not exist
    #[error("Member not found")]
    MemberNotFound,

    /// Caller is not an owner
    #[error("{0}")]
    OwnerRequired(&'static str),

    /// Member without an active subscription
    #[error(
        "Your subscription is inactive. Please contact the club owner to activate your membership."
    )]
    SubscriptionInactive,

    /// Identity provider rejected or failed the exchange
    #[error("Failed to validate session: {0}")]
    IdentityExchange(String),

    /// Missing required header
    #[error("{0} header required")]
    MissingHeader(&'static str),

    /// Unknown subscription action
    #[error("Invalid action")]
    InvalidAction(String),

    /// Input validation error
    #[error("{0}")]
    InvalidArgument(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MembershipError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MembershipError::NotAuthenticated
            | MembershipError::InvalidSession
            | MembershipError::SessionExpired
            | MembershipError::IdentityExchange(_) => ErrorKind::Unauthorized,
            MembershipError::UserNotFound | MembershipError::MemberNotFound => ErrorKind::NotFound,
            MembershipError::EmailTaken => ErrorKind::Conflict,
            MembershipError::OwnerRequired(_) | MembershipError::SubscriptionInactive => {
                ErrorKind::Forbidden
            }
            MembershipError::MissingHeader(_)
            | MembershipError::InvalidAction(_)
            | MembershipError::InvalidArgument(_) => ErrorKind::BadRequest,
            MembershipError::Database(_) | MembershipError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Machine-stable reason code
    pub fn code(&self) -> &'static str {
        match self {
            MembershipError::NotAuthenticated => "UNAUTHENTICATED",
            MembershipError::InvalidSession => "INVALID_SESSION",
            MembershipError::SessionExpired => "SESSION_EXPIRED",
            MembershipError::UserNotFound => "USER_NOT_FOUND",
            MembershipError::MemberNotFound => "MEMBER_NOT_FOUND",
            MembershipError::EmailTaken => "EMAIL_TAKEN",
            MembershipError::OwnerRequired(_) => "OWNER_REQUIRED",
            MembershipError::SubscriptionInactive => "SUBSCRIPTION_INACTIVE",
            MembershipError::IdentityExchange(_) => "IDENTITY_EXCHANGE_FAILED",
            MembershipError::MissingHeader(_) => "MISSING_HEADER",
            MembershipError::InvalidAction(_) => "INVALID_ACTION",
            MembershipError::InvalidArgument(_) => "INVALID_ARGUMENT",
            MembershipError::Database(_) => "DATABASE",
            MembershipError::Internal(_) => "INTERNAL",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            // Never leak driver details to clients
            MembershipError::Database(_) | MembershipError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        AppError::new(self.kind(), message).with_code(self.code())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            MembershipError::Database(e) => {
                tracing::error!(error = %e, "Membership database error");
            }
            MembershipError::Internal(msg) => {
                tracing::error!(message = %msg, "Membership internal error");
            }
            MembershipError::IdentityExchange(reason) => {
                tracing::warn!(reason = %reason, "Identity exchange failed");
            }
            MembershipError::OwnerRequired(_) => {
                tracing::warn!(error = %self, "Owner-only action attempted by non-owner");
            }
            _ => {
                tracing::debug!(error = %self, "Membership error");
            }
        }
    }
}

impl IntoResponse for MembershipError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for MembershipError {
    fn from(err: AppError) -> Self {
        MembershipError::Internal(err.to_string())
    }
}
