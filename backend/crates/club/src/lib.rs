//! Club Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Posts, puzzle attempts, repository and push traits
//! - `application/` - Use cases and the notification dispatcher
//! - `infra/` - PostgreSQL, in-memory and Expo push implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Puzzle Rules
//! - At most two scored attempts per (user, puzzle), numbered 1 then 2
//! - A correct first attempt still occupies a slot
//! - Attempt slots are claimed with a conditional insert
//! - Deleting a post never removes its attempts

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{ClubConfig, ClubInfo};
pub use error::{ClubError, ClubResult};
pub use infra::{ExpoPushSender, InMemoryClubRepository, PgClubRepository};
pub use presentation::router::{club_router, club_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
