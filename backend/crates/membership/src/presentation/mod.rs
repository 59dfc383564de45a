//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::MembershipAppState;
pub use middleware::{CurrentUser, SessionGateState, require_session, session_token};
pub use router::{membership_router, membership_router_generic};
