//! Builds a [`SubmissionRecord`] from the current form entries

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::ClientConfig;
use contact_relay_shared::{
    SubmissionRecord, CLIENT_CONTEXT_FIELD, METADATA_FIELDS, SOURCE_URL_FIELD, TIMESTAMP_FIELD,
};

/// Host-supplied metadata describing where a submission comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub client_context: String,
    pub source_url: String,
}

impl ClientContext {
    pub fn new<C: Into<String>, U: Into<String>>(client_context: C, source_url: U) -> Self {
        Self {
            client_context: client_context.into(),
            source_url: source_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.context, &config.source_url)
    }
}

/// Collect the entries into a record stamped with the current instant
pub fn collect<I, K, V>(entries: I, context: &ClientContext) -> SubmissionRecord
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    collect_at(entries, context, Utc::now())
}

/// Collect the entries into a record stamped with `collected_at`
///
/// Values are trimmed. Metadata keys always come last and cannot be supplied
/// through the form.
pub fn collect_at<I, K, V>(
    entries: I,
    context: &ClientContext,
    collected_at: DateTime<Utc>,
) -> SubmissionRecord
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let user_fields = entries
        .into_iter()
        .map(|(name, value)| (name.into(), value.as_ref().trim().to_string()))
        .filter(|(name, _)| !METADATA_FIELDS.contains(&name.as_str()));

    let metadata = [
        (
            TIMESTAMP_FIELD.to_string(),
            collected_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        (
            CLIENT_CONTEXT_FIELD.to_string(),
            context.client_context.clone(),
        ),
        (SOURCE_URL_FIELD.to_string(), context.source_url.clone()),
    ];

    SubmissionRecord::new(user_fields.chain(metadata))
}
