//! List Posts Use Case

use std::sync::Arc;

use membership::application::require_content_access;
use membership::domain::entity::user::User;

use crate::application::config::ClubConfig;
use crate::domain::entities::Post;
use crate::domain::repository::ClubStore;
use crate::error::ClubResult;

/// Posts for owners and active members, newest first, capped by
/// `ClubConfig::post_list_limit`
pub struct ListPostsUseCase<R>
where
    R: ClubStore,
{
    repo: Arc<R>,
    config: Arc<ClubConfig>,
}

impl<R> ListPostsUseCase<R>
where
    R: ClubStore,
{
    pub fn new(repo: Arc<R>, config: Arc<ClubConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, caller: &User) -> ClubResult<Vec<Post>> {
        require_content_access(caller)?;
        self.repo
            .list_posts_newest_first(self.config.post_list_limit)
            .await
    }
}
