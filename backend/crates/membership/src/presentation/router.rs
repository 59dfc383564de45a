//! Membership Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::MembershipConfig;
use crate::domain::gateway::IdentityGateway;
use crate::domain::repository::MemberStore;
use crate::infra::{HttpIdentityGateway, PgMembershipRepository};
use crate::presentation::handlers::{self, MembershipAppState};
use crate::presentation::middleware::{SessionGateState, require_session};

/// Create the membership router with PostgreSQL repository and the HTTP
/// identity gateway
pub fn membership_router(
    repo: PgMembershipRepository,
    gateway: HttpIdentityGateway,
    config: MembershipConfig,
) -> Router {
    membership_router_generic(repo, gateway, config)
}

/// Create a generic membership router for any repository and gateway
pub fn membership_router_generic<R, G>(repo: R, gateway: G, config: MembershipConfig) -> Router
where
    R: MemberStore,
    G: IdentityGateway + Clone + Sync + 'static,
{
    let state = MembershipAppState {
        repo: Arc::new(repo),
        gateway: Arc::new(gateway),
        config: Arc::new(config),
    };
    let gate = SessionGateState {
        repo: state.repo.clone(),
        config: state.config.clone(),
    };

    let protected = Router::new()
        .route("/auth/me", get(handlers::me))
        .route("/auth/save-push-token", post(handlers::save_push_token::<R, G>))
        .route("/subscription", get(handlers::subscription))
        .route("/admin/members", get(handlers::list_members::<R, G>))
        .route(
            "/admin/members/{user_id}/subscription",
            post(handlers::update_subscription::<R, G>),
        )
        .route_layer(middleware::from_fn_with_state(gate, require_session::<R>));

    Router::new()
        .route("/auth/session", post(handlers::create_session::<R, G>))
        .route("/auth/logout", post(handlers::logout::<R, G>))
        .route("/admin/make-owner/{user_email}", post(handlers::make_owner::<R, G>))
        .merge(protected)
        .with_state(state)
}
