//! Push Channel
//!
//! One message to one device token. Delivery is best-effort.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PushError {
    #[error("push transport error: {0}")]
    Transport(String),

    #[error("push rejected: {0}")]
    Rejected(String),
}

/// Expo-style push message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushMessage {
    pub to: String,
    pub title: String,
    pub body: String,
    pub sound: &'static str,
    pub data: serde_json::Value,
}

impl PushMessage {
    pub fn new(to: String, title: &str, body: &str, data: serde_json::Value) -> Self {
        Self {
            to,
            title: title.to_string(),
            body: body.to_string(),
            sound: "default",
            data,
        }
    }
}

#[trait_variant::make(PushSender: Send)]
pub trait LocalPushSender {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError>;
}
