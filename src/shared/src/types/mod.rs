//! Shared type definitions for the contact relay
//!
//! Types used by every layer of the submission pipeline live here so the
//! form host and the service agree on one data model.

pub mod form;
pub mod webhook;

pub use form::{
    AlertKind, SubmissionRecord, SubmissionResult, UiState, ValidationOutcome,
    CLIENT_CONTEXT_FIELD, METADATA_FIELDS, REQUIRED_FIELDS, SOURCE_URL_FIELD, TIMESTAMP_FIELD,
};
pub use webhook::{WebhookEnvelope, WebhookReply, CONTACT_FORM_TYPE, DEFAULT_SOURCE};
