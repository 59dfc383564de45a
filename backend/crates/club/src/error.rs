//! Club Error Types
//!
//! This module provides club-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use membership::MembershipError;
use thiserror::Error;

/// Club-specific result type alias
pub type ClubResult<T> = Result<T, ClubError>;

/// Club-specific error variants
///
/// Authentication and role gates surface as the wrapped membership error.
#[derive(Debug, Error)]
pub enum ClubError {
    /// Session or role gate failure
    #[error(transparent)]
    Membership(#[from] MembershipError),

    /// Post does not exist (or the id is malformed)
    #[error("Post not found")]
    PostNotFound,

    /// Submission against a non-puzzle post
    #[error("This post is not a puzzle")]
    NotAPuzzle,

    /// Post payload validation error
    #[error("{0}")]
    InvalidPost(String),

    /// Lost every retry of the conditional attempt insert
    #[error("Concurrent submission in progress, please retry")]
    SubmissionConflict,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClubError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClubError::Membership(e) => e.status_code(),
            other => StatusCode::from_u16(other.kind().status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClubError::Membership(e) => e.kind(),
            ClubError::PostNotFound => ErrorKind::NotFound,
            ClubError::NotAPuzzle | ClubError::InvalidPost(_) => ErrorKind::BadRequest,
            ClubError::SubmissionConflict => ErrorKind::Conflict,
            ClubError::Database(_) | ClubError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Machine-stable reason code
    pub fn code(&self) -> &'static str {
        match self {
            ClubError::Membership(e) => e.code(),
            ClubError::PostNotFound => "POST_NOT_FOUND",
            ClubError::NotAPuzzle => "NOT_A_PUZZLE",
            ClubError::InvalidPost(_) => "INVALID_ARGUMENT",
            ClubError::SubmissionConflict => "SUBMISSION_CONFLICT",
            ClubError::Database(_) => "DATABASE",
            ClubError::Internal(_) => "INTERNAL",
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            ClubError::Membership(e) => e.log(),
            ClubError::Database(e) => {
                tracing::error!(error = %e, "Club database error");
            }
            ClubError::Internal(msg) => {
                tracing::error!(message = %msg, "Club internal error");
            }
            ClubError::SubmissionConflict => {
                tracing::warn!("Puzzle submission lost every insert race");
            }
            _ => {
                tracing::debug!(error = %self, "Club error");
            }
        }
    }
}

impl From<ClubError> for AppError {
    fn from(err: ClubError) -> Self {
        match err {
            ClubError::Membership(e) => e.to_app_error(),
            ClubError::Database(_) | ClubError::Internal(_) => {
                AppError::new(err.kind(), "Internal server error").with_code(err.code())
            }
            other => AppError::new(other.kind(), other.to_string()).with_code(other.code()),
        }
    }
}

impl IntoResponse for ClubError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
