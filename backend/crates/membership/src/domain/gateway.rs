//! Identity Gateway
//!
//! Exchanges an external session identifier for a verified profile.

use crate::error::MembershipResult;

/// Profile and bearer token returned by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    /// Becomes the caller's session credential as-is
    pub session_token: String,
}

#[trait_variant::make(IdentityGateway: Send)]
pub trait LocalIdentityGateway {
    /// Single attempt with a bounded timeout; every failure is an
    /// authentication failure.
    async fn exchange(&self, external_session_id: &str) -> MembershipResult<VerifiedIdentity>;
}
