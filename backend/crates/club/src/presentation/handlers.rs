//! HTTP Handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use kernel::extract::AppJson;
use std::sync::Arc;

use membership::domain::repository::MemberStore;
use membership::presentation::CurrentUser;

use crate::application::config::{ClubConfig, ClubInfo};
use crate::application::{
    CreatePostUseCase, DeletePostUseCase, ListPostsUseCase, PuzzleStatusUseCase,
    SubmitAnswerUseCase,
};
use crate::domain::notifier::PushSender;
use crate::domain::repository::ClubStore;
use crate::error::ClubResult;
use crate::presentation::dto::{
    CreatePostRequest, MessageResponse, PostResponse, PuzzleStatusResponse, SubmissionResponse,
    SubmitAnswerRequest,
};

/// Shared state for club handlers
#[derive(Clone)]
pub struct ClubAppState<M, R, N>
where
    M: MemberStore,
    R: ClubStore,
    N: PushSender + Clone + Sync + 'static,
{
    pub members: Arc<M>,
    pub repo: Arc<R>,
    pub push: Arc<N>,
    pub config: Arc<ClubConfig>,
}

// ============================================================================
// Posts
// ============================================================================

/// GET /api/posts
pub async fn list_posts<M, R, N>(
    State(state): State<ClubAppState<M, R, N>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
) -> ClubResult<Json<Vec<PostResponse>>>
where
    M: MemberStore,
    R: ClubStore,
    N: PushSender + Clone + Sync + 'static,
{
    let posts = ListPostsUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&caller)
        .await?;

    let reveal_answer = caller.is_owner();
    Ok(Json(
        posts
            .iter()
            .map(|p| PostResponse::from_post(p, reveal_answer))
            .collect(),
    ))
}

/// POST /api/posts
pub async fn create_post<M, R, N>(
    State(state): State<ClubAppState<M, R, N>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    AppJson(req): AppJson<CreatePostRequest>,
) -> ClubResult<Json<PostResponse>>
where
    M: MemberStore,
    R: ClubStore,
    N: PushSender + Clone + Sync + 'static,
{
    let use_case = CreatePostUseCase::new(
        state.members.clone(),
        state.repo.clone(),
        state.push.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(&caller, req.into()).await?;

    Ok(Json(PostResponse::from_post(&output.post, true)))
}

/// DELETE /api/posts/{post_id}
pub async fn delete_post<M, R, N>(
    State(state): State<ClubAppState<M, R, N>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> ClubResult<Json<MessageResponse>>
where
    M: MemberStore,
    R: ClubStore,
    N: PushSender + Clone + Sync + 'static,
{
    DeletePostUseCase::new(state.repo.clone())
        .execute(&caller, &post_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}

// ============================================================================
// Puzzles
// ============================================================================

/// POST /api/puzzles/submit
pub async fn submit_answer<M, R, N>(
    State(state): State<ClubAppState<M, R, N>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    AppJson(req): AppJson<SubmitAnswerRequest>,
) -> ClubResult<Json<SubmissionResponse>>
where
    M: MemberStore,
    R: ClubStore,
    N: PushSender + Clone + Sync + 'static,
{
    let outcome = SubmitAnswerUseCase::new(state.repo.clone())
        .execute(&caller, &req.post_id, req.answer)
        .await?;

    Ok(Json(outcome.into()))
}

/// GET /api/puzzles/{post_id}/status
pub async fn puzzle_status<M, R, N>(
    State(state): State<ClubAppState<M, R, N>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> ClubResult<Json<PuzzleStatusResponse>>
where
    M: MemberStore,
    R: ClubStore,
    N: PushSender + Clone + Sync + 'static,
{
    let progress = PuzzleStatusUseCase::new(state.repo.clone())
        .execute(&caller, &post_id)
        .await?;

    Ok(Json(progress.into()))
}

// ============================================================================
// Club info
// ============================================================================

/// GET /api/club-info
pub async fn club_info<M, R, N>(State(state): State<ClubAppState<M, R, N>>) -> Json<ClubInfo>
where
    M: MemberStore,
    R: ClubStore,
    N: PushSender + Clone + Sync + 'static,
{
    Json(state.config.club_info.clone())
}
