//! Domain Layer
//!
//! Contains entities, value objects, repository and gateway traits.

pub mod entity;
pub mod gateway;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{session::Session, user::User};
pub use gateway::{IdentityGateway, VerifiedIdentity};
pub use repository::{MemberStore, SessionRepository, UserRepository};
