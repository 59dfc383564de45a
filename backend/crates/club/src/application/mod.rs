//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_post;
pub mod delete_post;
pub mod list_posts;
pub mod notify;
pub mod puzzle_status;
pub mod submit_answer;

// Re-exports
pub use config::{ClubConfig, ClubInfo};
pub use create_post::{CreatePostInput, CreatePostOutput, CreatePostUseCase};
pub use delete_post::DeletePostUseCase;
pub use list_posts::ListPostsUseCase;
pub use notify::{DispatchReport, NotificationDispatcher};
pub use puzzle_status::PuzzleStatusUseCase;
pub use submit_answer::{SubmissionOutcome, SubmitAnswerUseCase};
