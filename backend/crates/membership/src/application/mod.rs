//! Application Layer
//!
//! Use cases and application services.

pub mod admin;
pub mod config;
pub mod create_session;
pub mod resolve_session;
pub mod save_push_token;
pub mod sign_out;
pub mod update_subscription;

// Re-exports
pub use admin::{ListMembersUseCase, PromoteOwnerInput, PromoteOwnerUseCase};
pub use config::MembershipConfig;
pub use create_session::{CreateSessionOutput, CreateSessionUseCase};
pub use resolve_session::{ResolveSessionUseCase, require_content_access, require_owner};
pub use save_push_token::SavePushTokenUseCase;
pub use sign_out::SignOutUseCase;
pub use update_subscription::{UpdateSubscriptionInput, UpdateSubscriptionUseCase};
