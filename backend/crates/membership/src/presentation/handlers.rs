//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use kernel::extract::{AppJson, AppQuery};
use std::sync::Arc;

use crate::application::config::MembershipConfig;
use crate::application::{
    CreateSessionUseCase, ListMembersUseCase, PromoteOwnerInput, PromoteOwnerUseCase,
    SavePushTokenUseCase, SignOutUseCase, UpdateSubscriptionInput, UpdateSubscriptionUseCase,
};
use crate::domain::gateway::IdentityGateway;
use crate::domain::repository::MemberStore;
use crate::error::{MembershipError, MembershipResult};
use crate::presentation::dto::{
    MessageResponse, SavePushTokenRequest, SessionResponse, SubscriptionResponse,
    SubscriptionUpdatedResponse, UpdateSubscriptionQuery, UserResponse,
};
use crate::presentation::middleware::{CurrentUser, session_token};

pub const SESSION_ID_HEADER: &str = "X-Session-ID";
pub const BOOTSTRAP_SECRET_HEADER: &str = "X-Bootstrap-Secret";

/// Shared state for membership handlers
#[derive(Clone)]
pub struct MembershipAppState<R, G>
where
    R: MemberStore,
    G: IdentityGateway + Clone + Sync + 'static,
{
    pub repo: Arc<R>,
    pub gateway: Arc<G>,
    pub config: Arc<MembershipConfig>,
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/session
pub async fn create_session<R, G>(
    State(state): State<MembershipAppState<R, G>>,
    headers: HeaderMap,
) -> MembershipResult<impl IntoResponse>
where
    R: MemberStore,
    G: IdentityGateway + Clone + Sync + 'static,
{
    let external_session_id = headers
        .get(SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(MembershipError::MissingHeader(SESSION_ID_HEADER))?;

    let use_case = CreateSessionUseCase::new(
        state.repo.clone(),
        state.gateway.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(external_session_id).await?;

    let cookie =
        platform::cookie::set_cookie_header(&state.config.session_cookie(), &output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse {
            user: UserResponse::from(&output.user),
            session_token: output.session_token,
        }),
    ))
}

/// GET /api/auth/me
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// POST /api/auth/logout
pub async fn logout<R, G>(
    State(state): State<MembershipAppState<R, G>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: MemberStore,
    G: IdentityGateway + Clone + Sync + 'static,
{
    let token = session_token(&headers, &state.config);

    // The cookie is cleared even when the store is unreachable
    if let Err(e) = SignOutUseCase::new(state.repo.clone())
        .execute(token.as_deref())
        .await
    {
        e.log();
    }

    let cookie = state.config.session_cookie().build_delete_cookie();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// POST /api/auth/save-push-token
pub async fn save_push_token<R, G>(
    State(state): State<MembershipAppState<R, G>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    AppJson(req): AppJson<SavePushTokenRequest>,
) -> MembershipResult<Json<MessageResponse>>
where
    R: MemberStore,
    G: IdentityGateway + Clone + Sync + 'static,
{
    SavePushTokenUseCase::new(state.repo.clone())
        .execute(&user, &req.push_token)
        .await?;

    Ok(Json(MessageResponse::new("Push token saved successfully")))
}

// ============================================================================
// Subscription
// ============================================================================

/// GET /api/subscription
pub async fn subscription(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<SubscriptionResponse> {
    Json(SubscriptionResponse::from(&user))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/members
pub async fn list_members<R, G>(
    State(state): State<MembershipAppState<R, G>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
) -> MembershipResult<Json<Vec<UserResponse>>>
where
    R: MemberStore,
    G: IdentityGateway + Clone + Sync + 'static,
{
    let members = ListMembersUseCase::new(state.repo.clone())
        .execute(&caller)
        .await?;

    Ok(Json(members.iter().map(UserResponse::from).collect()))
}

/// POST /api/admin/members/{user_id}/subscription?action=&months=
pub async fn update_subscription<R, G>(
    State(state): State<MembershipAppState<R, G>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(member_id): Path<String>,
    AppQuery(query): AppQuery<UpdateSubscriptionQuery>,
) -> MembershipResult<Json<SubscriptionUpdatedResponse>>
where
    R: MemberStore,
    G: IdentityGateway + Clone + Sync + 'static,
{
    let input = UpdateSubscriptionInput {
        member_id,
        action: query.action,
        months: query.months,
    };

    let (member, action) = UpdateSubscriptionUseCase::new(state.repo.clone())
        .execute(&caller, input)
        .await?;

    Ok(Json(SubscriptionUpdatedResponse::new(&member, action)))
}

/// POST /api/admin/make-owner/{user_email}
pub async fn make_owner<R, G>(
    State(state): State<MembershipAppState<R, G>>,
    headers: HeaderMap,
    Path(user_email): Path<String>,
) -> MembershipResult<Json<MessageResponse>>
where
    R: MemberStore,
    G: IdentityGateway + Clone + Sync + 'static,
{
    let input = PromoteOwnerInput {
        session_token: session_token(&headers, &state.config),
        bootstrap_secret: headers
            .get(BOOTSTRAP_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        email: user_email,
    };

    let user = PromoteOwnerUseCase::new(state.repo.clone(), state.config.clone())
        .execute(input)
        .await?;

    Ok(Json(MessageResponse::new(format!(
        "User {} is now an owner",
        user.email
    ))))
}
