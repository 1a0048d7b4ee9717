//! Form-side type definitions for the contact relay
//!
//! These types describe a single submission attempt as it moves from the form
//! through validation and out to the webhook.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// ============================================================================
// FIELD NAMES
// ============================================================================

/// Fields every submission must carry, in the order they are reported when missing
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

/// ISO-8601 instant at which the record was collected
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// User-agent equivalent of the hosting client
pub const CLIENT_CONTEXT_FIELD: &str = "clientContext";

/// Location of the page hosting the form
pub const SOURCE_URL_FIELD: &str = "sourceUrl";

/// Metadata keys appended by the collector; never taken from user input
pub const METADATA_FIELDS: [&str; 3] = [TIMESTAMP_FIELD, CLIENT_CONTEXT_FIELD, SOURCE_URL_FIELD];

// ============================================================================
// SUBMISSION RECORD
// ============================================================================

/// Normalized form values plus request metadata for one submission attempt
///
/// Entries keep the order in which they were collected. The record exposes no
/// mutating accessors once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRecord {
    fields: Vec<(String, String)>,
}

impl SubmissionRecord {
    /// Build a record from already-normalized entries.
    ///
    /// Later entries with a name already present replace the earlier value in
    /// place.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: Vec<(String, String)> = Vec::new();

        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match fields.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => fields.push((key, value)),
            }
        }

        Self { fields }
    }

    /// Value stored under `key`, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Value stored under `key`, or the empty string when absent
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for SubmissionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// Result of checking a record against the form rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid { reason: String },
}

impl ValidationOutcome {
    pub fn invalid<S: Into<String>>(reason: S) -> Self {
        ValidationOutcome::Invalid {
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Human-readable reason for an invalid outcome
    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid { reason } => Some(reason),
        }
    }
}

/// Settled outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionResult {
    Success { message: String },
    Failure { message: String },
}

impl SubmissionResult {
    pub fn success<S: Into<String>>(message: S) -> Self {
        SubmissionResult::Success {
            message: message.into(),
        }
    }

    pub fn failure<S: Into<String>>(message: S) -> Self {
        SubmissionResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            SubmissionResult::Success { message } | SubmissionResult::Failure { message } => {
                message
            }
        }
    }
}

// ============================================================================
// PRESENTATION STATE
// ============================================================================

/// Submission state of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    Idle,
    Submitting,
}

impl Default for UiState {
    fn default() -> Self {
        UiState::Idle
    }
}

/// Style classification of the alert region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Error => "error",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
