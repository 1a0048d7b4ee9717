//! Wire types exchanged with the webhook receiver

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::form::SubmissionRecord;

/// `formType` value sent with every submission
pub const CONTACT_FORM_TYPE: &str = "contact";

/// Default `source` identifier placed in the envelope
pub const DEFAULT_SOURCE: &str = "ai-n8nmail-form";

/// Request body posted to the webhook
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEnvelope<'a> {
    pub form_type: &'static str,
    pub data: &'a SubmissionRecord,
    pub source: &'a str,
}

impl<'a> WebhookEnvelope<'a> {
    pub fn contact(data: &'a SubmissionRecord, source: &'a str) -> Self {
        Self {
            form_type: CONTACT_FORM_TYPE,
            data,
            source,
        }
    }
}

/// Normalized reply from the webhook
///
/// JSON replies are kept as-is; anything else is wrapped as
/// `{"success": true, "message": <text>}`. The receiver is loosely specified,
/// so `success` is read with JavaScript truthiness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookReply(Value);

impl WebhookReply {
    pub fn from_json(value: Value) -> Self {
        Self(value)
    }

    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Self(json!({
            "success": true,
            "message": text.into(),
        }))
    }

    pub fn is_success(&self) -> bool {
        self.0.get("success").map(is_truthy).unwrap_or(false)
    }

    /// Reply message, if it carries a truthy one
    pub fn message(&self) -> Option<String> {
        match self.0.get("message")? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) if is_truthy(&Value::Number(number.clone())) => {
                Some(number.to_string())
            }
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
