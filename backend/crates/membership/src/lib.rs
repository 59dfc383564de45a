//! Membership Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and gateway traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL, in-memory and HTTP implementations
//! - `presentation/` - HTTP handlers, DTOs, router, session middleware
//!
//! ## Features
//! - Sign-in by exchanging an identity provider session id
//! - Server-side sessions with cookie or bearer tokens (absolute 7 day expiry)
//! - Owner-managed subscriptions (activate, extend, deactivate)
//! - Device push token registration
//!
//! ## Security Model
//! - Session tokens are stored as SHA-256 digests
//! - Resolution never slides the expiry
//! - Owner promotion needs an owner session or the bootstrap secret

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::MembershipConfig;
pub use error::{MembershipError, MembershipResult};
pub use infra::{HttpIdentityGateway, InMemoryMembershipRepository, PgMembershipRepository};
pub use presentation::router::{membership_router, membership_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
