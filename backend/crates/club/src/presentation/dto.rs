//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::{CreatePostInput, SubmissionOutcome};
use crate::domain::entities::Post;
use crate::domain::value_objects::PuzzleProgress;

// ============================================================================
// Posts
// ============================================================================

/// Request for POST /api/posts
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_puzzle: bool,
    #[serde(default)]
    pub puzzle_answer: Option<String>,
    #[serde(default)]
    pub success_message: Option<String>,
    #[serde(default)]
    pub failure_message: Option<String>,
}

impl From<CreatePostRequest> for CreatePostInput {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            image: req.image,
            is_puzzle: req.is_puzzle,
            puzzle_answer: req.puzzle_answer,
            success_message: req.success_message,
            failure_message: req.failure_message,
        }
    }
}

/// Post as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub post_id: PostId,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub is_puzzle: bool,
    pub puzzle_answer: Option<String>,
    pub success_message: Option<String>,
    pub failure_message: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl PostResponse {
    /// Members never see the expected answer
    pub fn from_post(post: &Post, reveal_answer: bool) -> Self {
        let puzzle = post.puzzle.as_ref();

        Self {
            post_id: post.post_id,
            title: post.title.clone(),
            content: post.content.clone(),
            image: post.image.clone(),
            is_puzzle: post.is_puzzle(),
            puzzle_answer: puzzle
                .filter(|_| reveal_answer)
                .map(|p| p.answer.clone()),
            success_message: puzzle.and_then(|p| p.success_message.clone()),
            failure_message: puzzle.and_then(|p| p.failure_message.clone()),
            created_by: post.created_by,
            created_at: post.created_at,
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Puzzles
// ============================================================================

/// Request for POST /api/puzzles/submit
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub post_id: String,
    pub answer: String,
}

/// Response for POST /api/puzzles/submit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    pub attempts_remaining: u8,
    pub is_correct: bool,
}

impl From<SubmissionOutcome> for SubmissionResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            attempts_remaining: outcome.attempts_remaining,
            is_correct: outcome.is_correct,
        }
    }
}

/// Response for GET /api/puzzles/{post_id}/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleStatusResponse {
    pub attempts_used: usize,
    pub attempts_remaining: u8,
    pub has_solved: bool,
}

impl From<PuzzleProgress> for PuzzleStatusResponse {
    fn from(progress: PuzzleProgress) -> Self {
        Self {
            attempts_used: progress.attempts_used,
            attempts_remaining: progress.attempts_remaining(),
            has_solved: progress.has_solved,
        }
    }
}
