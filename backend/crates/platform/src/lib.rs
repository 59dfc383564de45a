//! Platform Crate - Technical Infrastructure
//!
//! Shared HTTP plumbing used by the membership and club crates:
//! - Cookie building and parsing
//! - Session token extraction (cookie first, then bearer header)
//! - Token digests for storage

pub mod cookie;
pub mod token;
