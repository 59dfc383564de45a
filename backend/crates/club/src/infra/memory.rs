//! In-Memory Repository Implementations
//!
//! Same conditional-append semantics as the `puzzle_attempts` unique key.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{PostId, UserId};
use parking_lot::RwLock;

use crate::domain::entities::{Post, PuzzleAttempt};
use crate::domain::repository::{AppendOutcome, PostRepository, PuzzleAttemptRepository};
use crate::error::ClubResult;

#[derive(Default)]
struct Tables {
    posts: HashMap<PostId, Post>,
    attempts: Vec<PuzzleAttempt>,
}

/// Process-local club repository
#[derive(Clone, Default)]
pub struct InMemoryClubRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryClubRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostRepository for InMemoryClubRepository {
    async fn create_post(&self, post: &Post) -> ClubResult<()> {
        self.tables.write().posts.insert(post.post_id, post.clone());
        Ok(())
    }

    async fn find_post(&self, post_id: &PostId) -> ClubResult<Option<Post>> {
        Ok(self.tables.read().posts.get(post_id).cloned())
    }

    async fn list_posts_newest_first(&self, limit: u32) -> ClubResult<Vec<Post>> {
        let mut posts: Vec<Post> = self.tables.read().posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn delete_post(&self, post_id: &PostId) -> ClubResult<bool> {
        Ok(self.tables.write().posts.remove(post_id).is_some())
    }
}

impl PuzzleAttemptRepository for InMemoryClubRepository {
    async fn attempts_for(
        &self,
        user_id: &UserId,
        post_id: &PostId,
    ) -> ClubResult<Vec<PuzzleAttempt>> {
        let mut attempts: Vec<PuzzleAttempt> = self
            .tables
            .read()
            .attempts
            .iter()
            .filter(|a| &a.user_id == user_id && &a.post_id == post_id)
            .cloned()
            .collect();
        attempts.sort_by_key(|a| a.attempt_number);
        Ok(attempts)
    }

    async fn append_attempt(&self, attempt: &PuzzleAttempt) -> ClubResult<AppendOutcome> {
        let mut tables = self.tables.write();
        let taken = tables.attempts.iter().any(|a| {
            a.user_id == attempt.user_id
                && a.post_id == attempt.post_id
                && a.attempt_number == attempt.attempt_number
        });
        if taken {
            return Ok(AppendOutcome::SlotTaken);
        }

        tables.attempts.push(attempt.clone());
        Ok(AppendOutcome::Appended)
    }
}
