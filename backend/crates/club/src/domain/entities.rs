//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{AttemptId, PostId, UserId};

use crate::domain::value_objects::AttemptNumber;

/// Puzzle half of a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Expected move, compared trimmed and case-insensitively
    pub answer: String,
    pub success_message: Option<String>,
    pub failure_message: Option<String>,
}

/// Club content item. Created and deleted by owners, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: PostId,
    pub title: String,
    pub content: String,
    /// Base64 image payload
    pub image: Option<String>,
    /// Present iff the post is a puzzle
    pub puzzle: Option<Puzzle>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        title: String,
        content: String,
        image: Option<String>,
        puzzle: Option<Puzzle>,
        created_by: UserId,
    ) -> Self {
        Self {
            post_id: PostId::new(),
            title,
            content,
            image,
            puzzle,
            created_by,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_puzzle(&self) -> bool {
        self.puzzle.is_some()
    }
}

/// One scored submission. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleAttempt {
    pub attempt_id: AttemptId,
    pub user_id: UserId,
    /// Weak reference; deleting the post keeps its attempts
    pub post_id: PostId,
    /// Raw answer as submitted
    pub answer: String,
    pub is_correct: bool,
    pub attempt_number: AttemptNumber,
    pub created_at: DateTime<Utc>,
}

impl PuzzleAttempt {
    pub fn record(
        user_id: UserId,
        post_id: PostId,
        answer: String,
        is_correct: bool,
        attempt_number: AttemptNumber,
    ) -> Self {
        Self {
            attempt_id: AttemptId::new(),
            user_id,
            post_id,
            answer,
            is_correct,
            attempt_number,
            created_at: Utc::now(),
        }
    }
}
