//! # Contact Form Service
//!
//! Submission pipeline for a contact form providing:
//! - Collection of trimmed form values plus client metadata
//! - Validation of required fields, email shape and message length
//! - Delivery to a webhook as JSON, with optional bearer authentication
//! - A demo responder when no webhook is configured
//! - Presentation of loading state and success/error alerts
//!
//! ## Usage
//!
//! ```rust,no_run
//! use contact_form_service::{ContactFormConfig, FormController, MemoryForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ContactFormConfig::from_env()?;
//!
//!     let mut form = MemoryForm::contact();
//!     form.set_value("name", "Ada Lovelace");
//!     form.set_value("email", "ada@example.com");
//!     form.set_value("subject", "Analytical Engine");
//!     form.set_value("message", "I would like to know more.");
//!
//!     let controller = FormController::from_config(form, &config)?;
//!     let outcome = controller.submit().await;
//!     println!("Submission outcome: {:?}", outcome);
//!
//!     Ok(())
//! }
//! ```

pub mod collector;
pub mod config;
pub mod controller;
pub mod error;
pub mod presenter;
pub mod submitter;
pub mod transport;
pub mod validator;
pub mod view;

pub use collector::ClientContext;
pub use config::ContactFormConfig;
pub use controller::{FormController, SubmitOutcome};
pub use error::{ContactFormError, Result};
pub use presenter::Presenter;
pub use submitter::Submitter;
pub use transport::{DemoTransport, Transport, WebhookTransport};
pub use view::{ControlKind, FormControl, FormView, MemoryForm};

// Re-export shared types for convenience
pub use contact_relay_shared::{
    AlertKind, SubmissionRecord, SubmissionResult, UiState, ValidationOutcome, WebhookReply,
};
