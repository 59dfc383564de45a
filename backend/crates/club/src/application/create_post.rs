//! Create Post Use Case
//!
//! Owners publish content. Publishing a puzzle notifies active members
//! after the post is stored; notification trouble never fails the request.

use std::sync::Arc;

use membership::application::require_owner;
use membership::domain::entity::user::User;
use membership::domain::repository::MemberStore;

use crate::application::config::ClubConfig;
use crate::application::notify::{DispatchReport, NotificationDispatcher};
use crate::domain::entities::{Post, Puzzle};
use crate::domain::notifier::PushSender;
use crate::domain::repository::ClubStore;
use crate::error::{ClubError, ClubResult};

/// Create post input
#[derive(Debug, Clone, Default)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub is_puzzle: bool,
    pub puzzle_answer: Option<String>,
    pub success_message: Option<String>,
    pub failure_message: Option<String>,
}

/// Create post output
#[derive(Debug, Clone)]
pub struct CreatePostOutput {
    pub post: Post,
    /// Present when a puzzle notification was attempted
    pub notification: Option<DispatchReport>,
}

/// Create post use case
pub struct CreatePostUseCase<M, R, N>
where
    M: MemberStore,
    R: ClubStore,
    N: PushSender + Sync,
{
    members: Arc<M>,
    repo: Arc<R>,
    push: Arc<N>,
    config: Arc<ClubConfig>,
}

impl<M, R, N> CreatePostUseCase<M, R, N>
where
    M: MemberStore,
    R: ClubStore,
    N: PushSender + Sync,
{
    pub fn new(members: Arc<M>, repo: Arc<R>, push: Arc<N>, config: Arc<ClubConfig>) -> Self {
        Self {
            members,
            repo,
            push,
            config,
        }
    }

    pub async fn execute(&self, caller: &User, input: CreatePostInput) -> ClubResult<CreatePostOutput> {
        require_owner(caller, "Only owners can create posts")?;

        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(ClubError::InvalidPost("title cannot be empty".to_string()));
        }

        let puzzle = if input.is_puzzle {
            let answer = input
                .puzzle_answer
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .ok_or_else(|| {
                    ClubError::InvalidPost("puzzle_answer is required for puzzles".to_string())
                })?;
            Some(Puzzle {
                answer: answer.to_string(),
                success_message: non_blank(input.success_message),
                failure_message: non_blank(input.failure_message),
            })
        } else {
            None
        };

        let post = Post::new(
            title,
            input.content,
            non_blank(input.image),
            puzzle,
            caller.user_id,
        );
        self.repo.create_post(&post).await?;

        tracing::info!(
            post_id = %post.post_id,
            owner_id = %caller.user_id,
            is_puzzle = post.is_puzzle(),
            "Post created"
        );

        let notification = if post.is_puzzle() {
            Some(self.notify_members(&post).await)
        } else {
            None
        };

        Ok(CreatePostOutput { post, notification })
    }

    async fn notify_members(&self, post: &Post) -> DispatchReport {
        let tokens = match self.members.push_tokens_of_active_members().await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::error!(error = %e, post_id = %post.post_id, "Failed to load push tokens");
                return DispatchReport::default();
            }
        };
        if tokens.is_empty() {
            return DispatchReport::default();
        }

        let recipients = tokens.len();
        let data = serde_json::json!({
            "type": "puzzle",
            "post_id": post.post_id.to_string(),
        });
        let report = NotificationDispatcher::new(self.push.clone())
            .dispatch(
                tokens,
                &self.config.puzzle_notification_title,
                &post.title,
                data,
            )
            .await;

        tracing::info!(
            post_id = %post.post_id,
            recipients = recipients,
            successful = report.successful,
            failed = report.failed,
            "Sent puzzle notification"
        );
        report
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
