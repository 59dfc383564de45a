//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every club crate agrees on:
//! - The unified error type, its classification and HTTP rendering
//! - Typed identifiers for users, posts and puzzle attempts
//! - Body and query extractors that reject with the unified error
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
