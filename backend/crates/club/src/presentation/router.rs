//! Club Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use membership::MembershipConfig;
use membership::domain::repository::MemberStore;
use membership::presentation::{SessionGateState, require_session};

use crate::application::config::ClubConfig;
use crate::domain::notifier::PushSender;
use crate::domain::repository::ClubStore;
use crate::infra::{ExpoPushSender, PgClubRepository};
use crate::presentation::handlers::{self, ClubAppState};

/// Create the club router with PostgreSQL repositories and Expo push
pub fn club_router(
    members: membership::PgMembershipRepository,
    repo: PgClubRepository,
    push: ExpoPushSender,
    membership_config: MembershipConfig,
    config: ClubConfig,
) -> Router {
    club_router_generic(members, repo, push, membership_config, config)
}

/// Create a generic club router for any store and push sender
pub fn club_router_generic<M, R, N>(
    members: M,
    repo: R,
    push: N,
    membership_config: MembershipConfig,
    config: ClubConfig,
) -> Router
where
    M: MemberStore,
    R: ClubStore,
    N: PushSender + Clone + Sync + 'static,
{
    let state = ClubAppState {
        members: Arc::new(members),
        repo: Arc::new(repo),
        push: Arc::new(push),
        config: Arc::new(config),
    };
    let gate = SessionGateState {
        repo: state.members.clone(),
        config: Arc::new(membership_config),
    };

    let protected = Router::new()
        .route(
            "/posts",
            get(handlers::list_posts::<M, R, N>).post(handlers::create_post::<M, R, N>),
        )
        .route("/posts/{post_id}", delete(handlers::delete_post::<M, R, N>))
        .route("/puzzles/submit", post(handlers::submit_answer::<M, R, N>))
        .route(
            "/puzzles/{post_id}/status",
            get(handlers::puzzle_status::<M, R, N>),
        )
        .route_layer(middleware::from_fn_with_state(gate, require_session::<M>));

    Router::new()
        .route("/club-info", get(handlers::club_info::<M, R, N>))
        .merge(protected)
        .with_state(state)
}
