//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router. Session gating comes from the
//! membership crate.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ClubAppState;
pub use router::{club_router, club_router_generic};
