//! Turns a validated record into a [`SubmissionResult`]
//!
//! The submitter owns the transport chosen at startup and never lets an error
//! escape: every failure path ends as `SubmissionResult::Failure`.

use std::sync::Arc;
use tracing::{error, info};

use crate::config::ContactFormConfig;
use crate::error::{ContactFormError, Result};
use crate::transport::{select_transport, Transport};
use contact_relay_shared::{SubmissionRecord, SubmissionResult, WebhookReply};

/// Message used when the webhook reports failure without saying why
pub const SEND_FAILED_FALLBACK: &str = "Failed to send message";

#[derive(Clone)]
pub struct Submitter {
    transport: Arc<dyn Transport>,
}

impl Submitter {
    /// Pick the transport for this configuration; done once per process
    pub fn from_config(config: &ContactFormConfig) -> Result<Self> {
        Ok(Self::with_transport(select_transport(config)?))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// True when deliveries are simulated
    pub fn is_simulated(&self) -> bool {
        self.transport.info().simulated
    }

    /// Deliver the record and return the normalized reply unchanged
    pub async fn send(&self, record: &SubmissionRecord) -> Result<WebhookReply> {
        self.transport.deliver(record).await
    }

    /// Deliver the record and settle the outcome
    pub async fn submit(&self, record: &SubmissionRecord) -> SubmissionResult {
        let transport = self.transport.info().name;
        info!(transport = %transport, "Submitting contact form");

        match self.send(record).await.and_then(interpret) {
            Ok(message) => {
                info!(transport = %transport, "Contact form submitted");
                SubmissionResult::success(message)
            }
            Err(e) => {
                error!(
                    transport = %transport,
                    code = e.error_code(),
                    "Form submission error: {}",
                    e
                );
                SubmissionResult::failure(e.to_string())
            }
        }
    }
}

fn interpret(reply: WebhookReply) -> Result<String> {
    if reply.is_success() {
        Ok(reply.message().unwrap_or_default())
    } else {
        Err(ContactFormError::application(
            reply
                .message()
                .unwrap_or_else(|| SEND_FAILED_FALLBACK.to_string()),
        ))
    }
}
