//! Domain Layer
//!
//! Posts, the puzzle attempt log and the push channel interface.

pub mod entities;
pub mod notifier;
pub mod repository;
pub mod services;
pub mod value_objects;

// Re-exports
pub use entities::{Post, Puzzle, PuzzleAttempt};
pub use notifier::{PushMessage, PushSender};
pub use repository::{AppendOutcome, ClubStore, PostRepository, PuzzleAttemptRepository};
pub use value_objects::{AttemptNumber, MAX_ATTEMPTS, PuzzleProgress, PuzzleState};
