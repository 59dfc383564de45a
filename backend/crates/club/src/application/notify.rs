//! Notification Dispatcher
//!
//! Fans a message out to device tokens one at a time. A failing token never
//! affects the others, and nothing here returns an error.

use std::sync::Arc;

use crate::domain::notifier::{PushMessage, PushSender};

/// Per-dispatch delivery counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub successful: usize,
    pub failed: usize,
}

pub struct NotificationDispatcher<N>
where
    N: PushSender + Sync,
{
    sender: Arc<N>,
}

impl<N> NotificationDispatcher<N>
where
    N: PushSender + Sync,
{
    pub fn new(sender: Arc<N>) -> Self {
        Self { sender }
    }

    pub async fn dispatch(
        &self,
        tokens: Vec<String>,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        for token in tokens {
            let message = PushMessage::new(token, title, body, data.clone());
            match self.sender.send(&message).await {
                Ok(()) => report.successful += 1,
                Err(e) => {
                    tracing::warn!(token = %message.to, error = %e, "Push notification failed");
                    report.failed += 1;
                }
            }
        }

        report
    }
}
