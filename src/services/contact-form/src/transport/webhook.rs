//! Webhook transport implementation using HTTP POST

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ContactFormConfig;
use crate::error::{ContactFormError, Result};
use crate::transport::{Transport, TransportInfo};
use contact_relay_shared::{SubmissionRecord, WebhookEnvelope, WebhookReply};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Transport that posts submissions to a webhook
#[derive(Clone)]
pub struct WebhookTransport {
    client: Client,
    url: String,
    api_key: Option<String>,
    source: String,
}

impl WebhookTransport {
    /// Create a webhook transport for `url` using the webhook settings
    pub fn new(url: &str, config: &ContactFormConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.webhook.user_agent)
            .danger_accept_invalid_certs(!config.webhook.verify_ssl);

        if let Some(seconds) = config.webhook.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder.build().map_err(|e| {
            ContactFormError::config(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            url: url.to_string(),
            api_key: config.api_key().map(str::to_string),
            source: config.webhook.source.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for WebhookTransport {
    async fn deliver(&self, record: &SubmissionRecord) -> Result<WebhookReply> {
        info!("Sending contact form submission to {}", self.url);

        let envelope = WebhookEnvelope::contact(record, &self.source);

        let mut request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(&envelope);

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Webhook rejected submission");
            return Err(ContactFormError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains(JSON_CONTENT_TYPE))
            .unwrap_or(false);

        let body = response.text().await?;
        debug!(json = is_json, bytes = body.len(), "Webhook reply received");

        if is_json {
            let value: serde_json::Value = serde_json::from_str(&body)?;
            Ok(WebhookReply::from_json(value))
        } else {
            Ok(WebhookReply::from_text(body))
        }
    }

    fn info(&self) -> TransportInfo {
        TransportInfo {
            name: "Webhook".to_string(),
            description: format!("HTTP POST to {}", self.url),
            simulated: false,
        }
    }
}
