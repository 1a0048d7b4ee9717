//! Configuration module for the contact form service
//!
//! Settings are read once at startup and handed to the components that need
//! them. Whether submissions go to a real webhook or to the demo responder is
//! decided here, from the webhook URL alone.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use contact_relay_shared::DEFAULT_SOURCE;

/// Host of the sample webhook URL shipped with the form
pub const PLACEHOLDER_WEBHOOK_HOST: &str = "your-n8n-instance.com";

/// Sample webhook URL shipped with the form; never contacted
pub const PLACEHOLDER_WEBHOOK_URL: &str = "https://your-n8n-instance.com/webhook/contact-form";

/// Main configuration structure for the contact form service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactFormConfig {
    /// Webhook delivery configuration
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Demo responder configuration
    #[serde(default)]
    pub demo: DemoConfig,

    /// Alert presentation configuration
    #[serde(default)]
    pub presenter: PresenterConfig,

    /// Client metadata attached to every submission
    #[serde(default)]
    pub client: ClientConfig,
}

/// Webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub source: String,
    /// Unset leaves the HTTP client default in place
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
    pub verify_ssl: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenterConfig {
    pub success_auto_hide_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Sent as `clientContext`
    pub context: String,
    /// Sent as `sourceUrl`
    pub source_url: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            source: DEFAULT_SOURCE.to_string(),
            timeout_seconds: None,
            user_agent: format!("contact-form/{}", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { latency_ms: 1500 }
    }
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            success_auto_hide_seconds: 10,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            context: format!(
                "contact-form/{} ({})",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::OS
            ),
            source_url: "cli://contact-form".to_string(),
        }
    }
}

impl ContactFormConfig {
    /// Load configuration from environment variables and config file
    ///
    /// The file named by `CONTACT_FORM_CONFIG_FILE` is used when present.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config_file = std::env::var("CONTACT_FORM_CONFIG_FILE").ok();
        Self::load(config_file.as_deref())
    }

    /// Load configuration: defaults, then the optional file, then
    /// `CONTACT_FORM__*` environment variables
    pub fn load(config_file: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut cfg = config::Config::builder();

        cfg = cfg.add_source(config::Config::try_from(&ContactFormConfig::default())?);

        if let Some(config_file) = config_file {
            cfg = cfg.add_source(config::File::with_name(config_file).required(true));
        }

        cfg = cfg.add_source(
            config::Environment::with_prefix("CONTACT_FORM")
                .separator("__")
                .try_parsing(true),
        );

        cfg.build()?.try_deserialize()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(url) = self.webhook_url() {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| format!("Invalid webhook URL '{}': {}", url, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!(
                    "Webhook URL must use http or https, got '{}'",
                    parsed.scheme()
                ));
            }
        }

        if self.webhook.timeout_seconds == Some(0) {
            return Err("Webhook timeout must be greater than 0".to_string());
        }

        if self.webhook.source.trim().is_empty() {
            return Err("Webhook source identifier must not be empty".to_string());
        }

        Ok(())
    }

    /// True when no usable webhook is configured
    pub fn is_demo_mode(&self) -> bool {
        match self.webhook.url.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(url) => url.contains(PLACEHOLDER_WEBHOOK_HOST),
        }
    }

    /// Webhook URL to deliver to, or `None` in demo mode
    pub fn webhook_url(&self) -> Option<&str> {
        if self.is_demo_mode() {
            return None;
        }
        self.webhook.url.as_deref().map(str::trim)
    }

    /// Bearer token, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.webhook
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn demo_latency(&self) -> Duration {
        Duration::from_millis(self.demo.latency_ms)
    }

    pub fn success_auto_hide(&self) -> Duration {
        Duration::from_secs(self.presenter.success_auto_hide_seconds)
    }
}
