//! Delete Post Use Case
//!
//! Hard delete. Attempts recorded against the post are left alone.

use std::sync::Arc;

use kernel::id::PostId;
use membership::application::require_owner;
use membership::domain::entity::user::User;

use crate::domain::repository::ClubStore;
use crate::error::{ClubError, ClubResult};

pub struct DeletePostUseCase<R>
where
    R: ClubStore,
{
    repo: Arc<R>,
}

impl<R> DeletePostUseCase<R>
where
    R: ClubStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, caller: &User, post_id: &str) -> ClubResult<()> {
        require_owner(caller, "Only owners can delete posts")?;

        let post_id: PostId = post_id.parse().map_err(|_| ClubError::PostNotFound)?;
        if !self.repo.delete_post(&post_id).await? {
            return Err(ClubError::PostNotFound);
        }

        tracing::info!(post_id = %post_id, owner_id = %caller.user_id, "Post deleted");
        Ok(())
    }
}
