//! Expo Push Sender
//!
//! Posts one message per request to the Expo push API. A ticket with
//! `status: "error"` counts as a failed delivery.

use serde::Deserialize;

use crate::application::config::ClubConfig;
use crate::domain::notifier::{PushError, PushMessage, PushSender};
use crate::error::{ClubError, ClubResult};

#[derive(Debug, Deserialize)]
struct PushTicket {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TicketData {
    One(PushTicket),
    Many(Vec<PushTicket>),
}

#[derive(Debug, Deserialize)]
struct PushResponse {
    data: Option<TicketData>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// reqwest-backed Expo push sender
#[derive(Clone)]
pub struct ExpoPushSender {
    http_client: reqwest::Client,
    url: String,
}

impl ExpoPushSender {
    pub fn new(config: &ClubConfig) -> ClubResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.push_timeout)
            .build()
            .map_err(|e| ClubError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            url: config.expo_push_url.clone(),
        })
    }
}

impl PushSender for ExpoPushSender {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError> {
        let response: PushResponse = self
            .http_client
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(message)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PushError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        if let Some(first) = response.errors.first() {
            return Err(PushError::Rejected(first.to_string()));
        }

        let tickets = match response.data {
            Some(TicketData::One(ticket)) => vec![ticket],
            Some(TicketData::Many(tickets)) => tickets,
            None => Vec::new(),
        };

        match tickets.into_iter().find(|t| t.status == "error") {
            Some(ticket) => Err(PushError::Rejected(
                ticket.message.unwrap_or_else(|| "unknown push error".to_string()),
            )),
            None => Ok(()),
        }
    }
}
