//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod identity_gateway;
pub mod memory;
pub mod postgres;

pub use identity_gateway::HttpIdentityGateway;
pub use memory::InMemoryMembershipRepository;
pub use postgres::PgMembershipRepository;
