//! Demo transport: simulates a successful delivery without network access

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::info;

use crate::error::Result;
use crate::transport::{Transport, TransportInfo};
use contact_relay_shared::{SubmissionRecord, WebhookReply};

pub const DEMO_SUCCESS_MESSAGE: &str = "Demo submission successful";

/// Transport used when no webhook is configured
#[derive(Debug, Clone)]
pub struct DemoTransport {
    latency: Duration,
}

impl DemoTransport {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl Transport for DemoTransport {
    async fn deliver(&self, record: &SubmissionRecord) -> Result<WebhookReply> {
        info!(
            fields = record.len(),
            "Demo submission: {}",
            serde_json::to_string(record)?
        );

        tokio::time::sleep(self.latency).await;

        Ok(WebhookReply::from_json(json!({
            "success": true,
            "message": DEMO_SUCCESS_MESSAGE,
            "data": record,
        })))
    }

    fn info(&self) -> TransportInfo {
        TransportInfo {
            name: "Demo".to_string(),
            description: format!("Simulated delivery after {:?}", self.latency),
            simulated: true,
        }
    }
}
