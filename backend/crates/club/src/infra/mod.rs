//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod expo_push;
pub mod memory;
pub mod postgres;

pub use expo_push::ExpoPushSender;
pub use memory::InMemoryClubRepository;
pub use postgres::PgClubRepository;
