//! HTTP Identity Gateway
//!
//! Calls the identity provider's session-data endpoint with the external
//! session id in `X-Session-ID`.

use serde::Deserialize;

use crate::application::config::MembershipConfig;
use crate::domain::gateway::{IdentityGateway, VerifiedIdentity};
use crate::error::{MembershipError, MembershipResult};

#[derive(Debug, Deserialize)]
struct SessionDataResponse {
    email: String,
    name: String,
    #[serde(default)]
    picture: Option<String>,
    session_token: String,
}

/// reqwest-backed identity gateway
#[derive(Clone)]
pub struct HttpIdentityGateway {
    http_client: reqwest::Client,
    url: String,
}

impl HttpIdentityGateway {
    pub fn new(config: &MembershipConfig) -> MembershipResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.identity_gateway_timeout)
            .build()
            .map_err(|e| MembershipError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            url: config.identity_gateway_url.clone(),
        })
    }
}

impl IdentityGateway for HttpIdentityGateway {
    async fn exchange(&self, external_session_id: &str) -> MembershipResult<VerifiedIdentity> {
        let response = self
            .http_client
            .get(&self.url)
            .header("X-Session-ID", external_session_id)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| MembershipError::IdentityExchange(e.to_string()))?;

        let data: SessionDataResponse = response
            .json()
            .await
            .map_err(|e| MembershipError::IdentityExchange(e.to_string()))?;

        if data.session_token.trim().is_empty() {
            return Err(MembershipError::IdentityExchange(
                "empty session_token".to_string(),
            ));
        }

        Ok(VerifiedIdentity {
            email: data.email,
            name: data.name,
            picture: data.picture.filter(|p| !p.is_empty()),
            session_token: data.session_token,
        })
    }
}
