//! Value Object Module

pub mod email;
pub mod subscription;
pub mod user_role;

pub use email::{Email, EmailError};
pub use subscription::{
    ExpiryOutOfRange, MAX_MONTHS, Subscription, SubscriptionAction, SubscriptionStatus,
};
pub use user_role::UserRole;
