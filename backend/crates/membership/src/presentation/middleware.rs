//! Session Middleware
//!
//! Resolves the caller's session before protected handlers run and hands
//! the user to them as a request extension.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::ResolveSessionUseCase;
use crate::application::config::MembershipConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::MemberStore;

/// Middleware state
#[derive(Clone)]
pub struct SessionGateState<R>
where
    R: MemberStore,
{
    pub repo: Arc<R>,
    pub config: Arc<MembershipConfig>,
}

/// The authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Session token from the cookie, or from `Authorization: Bearer` when the
/// cookie is absent
pub fn session_token(headers: &HeaderMap, config: &MembershipConfig) -> Option<String> {
    platform::token::extract_session_token(headers, &config.session_cookie_name)
}

/// Middleware that requires a live session
pub async fn require_session<R>(
    State(state): State<SessionGateState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: MemberStore,
{
    let token = session_token(req.headers(), &state.config);

    match ResolveSessionUseCase::new(state.repo.clone())
        .execute(token.as_deref())
        .await
    {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
