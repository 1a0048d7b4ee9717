//! Delivery strategies for a submission
//!
//! - Webhook transport (HTTP POST to the configured endpoint)
//! - Demo transport (simulated success, no network)
//!
//! The strategy is picked once, from configuration, by [`select_transport`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::ContactFormConfig;
use crate::error::Result;
use contact_relay_shared::{SubmissionRecord, WebhookReply};

pub mod demo;
pub mod webhook;

pub use demo::DemoTransport;
pub use webhook::WebhookTransport;

/// Trait that every delivery strategy implements
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver the record and return the normalized reply
    async fn deliver(&self, record: &SubmissionRecord) -> Result<WebhookReply>;

    fn info(&self) -> TransportInfo;
}

/// Information about a transport
#[derive(Debug, Clone)]
pub struct TransportInfo {
    pub name: String,
    pub description: String,
    pub simulated: bool,
}

/// Build the transport the configuration calls for
pub fn select_transport(config: &ContactFormConfig) -> Result<Arc<dyn Transport>> {
    match config.webhook_url() {
        Some(url) => {
            info!("Submissions will be delivered to webhook {}", url);
            Ok(Arc::new(WebhookTransport::new(url, config)?))
        }
        None => {
            warn!("Demo mode enabled - form submissions will be simulated");
            Ok(Arc::new(DemoTransport::new(config.demo_latency())))
        }
    }
}
