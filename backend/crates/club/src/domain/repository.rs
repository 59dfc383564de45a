//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure layer.

use kernel::id::{PostId, UserId};

use crate::domain::entities::{Post, PuzzleAttempt};
use crate::error::ClubResult;

/// Result of a conditional attempt insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    /// Another submission already holds this (user, post, attempt_number)
    SlotTaken,
}

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    async fn create_post(&self, post: &Post) -> ClubResult<()>;

    async fn find_post(&self, post_id: &PostId) -> ClubResult<Option<Post>>;

    /// At most `limit` posts, newest first
    async fn list_posts_newest_first(&self, limit: u32) -> ClubResult<Vec<Post>>;

    /// Hard delete; returns whether the post existed. Attempts are kept.
    async fn delete_post(&self, post_id: &PostId) -> ClubResult<bool>;
}

/// Puzzle attempt log
#[trait_variant::make(PuzzleAttemptRepository: Send)]
pub trait LocalPuzzleAttemptRepository {
    /// Attempts of one user on one post, in attempt order
    async fn attempts_for(&self, user_id: &UserId, post_id: &PostId)
    -> ClubResult<Vec<PuzzleAttempt>>;

    /// Insert unless the (user, post, attempt_number) slot is already taken
    async fn append_attempt(&self, attempt: &PuzzleAttempt) -> ClubResult<AppendOutcome>;
}

/// Everything the club use cases need from one store
pub trait ClubStore:
    PostRepository + PuzzleAttemptRepository + Clone + Send + Sync + 'static
{
}

impl<T> ClubStore for T where
    T: PostRepository + PuzzleAttemptRepository + Clone + Send + Sync + 'static
{
}
