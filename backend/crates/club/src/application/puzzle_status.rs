//! Puzzle Status Use Case
//!
//! Read-only view of the caller's progress on one puzzle.

use std::sync::Arc;

use kernel::id::PostId;
use membership::domain::entity::user::User;

use crate::domain::repository::ClubStore;
use crate::domain::value_objects::PuzzleProgress;
use crate::error::ClubResult;

pub struct PuzzleStatusUseCase<R>
where
    R: ClubStore,
{
    repo: Arc<R>,
}

impl<R> PuzzleStatusUseCase<R>
where
    R: ClubStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Unknown or malformed post ids report zero attempts
    pub async fn execute(&self, caller: &User, post_id: &str) -> ClubResult<PuzzleProgress> {
        let Ok(post_id) = post_id.parse::<PostId>() else {
            return Ok(PuzzleProgress::default());
        };
        let attempts = self.repo.attempts_for(&caller.user_id, &post_id).await?;

        Ok(PuzzleProgress::from_attempts(&attempts))
    }
}
