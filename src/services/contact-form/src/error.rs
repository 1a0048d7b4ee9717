//! Error handling for the contact form service
//!
//! Every failure in the submission pipeline is one of these variants. None of
//! them reach the user as a crash: the controller turns them into an alert.

use thiserror::Error;

/// Result type alias for contact form operations
pub type Result<T> = std::result::Result<T, ContactFormError>;

/// Main error type for the contact form service
#[derive(Error, Debug)]
pub enum ContactFormError {
    /// User-correctable input problems
    #[error("{reason}")]
    Validation { reason: String },

    /// Malformed settings detected at startup
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The request never produced a response
    #[error("{message}")]
    Transport { message: String },

    /// The webhook answered outside the 2xx range
    #[error("HTTP {status}{}", reason_suffix(.status_text))]
    HttpStatus { status: u16, status_text: String },

    /// The webhook answered 2xx but reported failure in its body
    #[error("{message}")]
    Application { message: String },

    /// Request or reply body could not be (de)serialized
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The HTTP client gave up waiting
    #[error("Operation timed out: {operation}")]
    Timeout { operation: String },
}

impl ContactFormError {
    /// Get the error code for logs and diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            ContactFormError::Validation { .. } => "VALIDATION_ERROR",
            ContactFormError::Config { .. } => "CONFIG_ERROR",
            ContactFormError::Transport { .. } => "TRANSPORT_ERROR",
            ContactFormError::HttpStatus { .. } => "HTTP_STATUS_ERROR",
            ContactFormError::Application { .. } => "APPLICATION_ERROR",
            ContactFormError::Serialization { .. } => "SERIALIZATION_ERROR",
            ContactFormError::Timeout { .. } => "TIMEOUT",
        }
    }

    /// Whether the user can fix this by editing the form
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, ContactFormError::Validation { .. })
    }
}

// Conversion implementations for external error types

impl From<reqwest::Error> for ContactFormError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ContactFormError::Timeout {
                operation: "HTTP request".to_string(),
            }
        } else if err.is_decode() {
            ContactFormError::Serialization {
                message: err.to_string(),
            }
        } else {
            ContactFormError::Transport {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ContactFormError {
    fn from(err: serde_json::Error) -> Self {
        ContactFormError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for ContactFormError {
    fn from(err: config::ConfigError) -> Self {
        ContactFormError::Config {
            message: err.to_string(),
        }
    }
}

// Utility functions for creating specific error types

impl ContactFormError {
    pub fn validation<S: Into<String>>(reason: S) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn http_status<S: Into<String>>(status: u16, status_text: S) -> Self {
        Self::HttpStatus {
            status,
            status_text: status_text.into(),
        }
    }

    pub fn application<S: Into<String>>(message: S) -> Self {
        Self::Application {
            message: message.into(),
        }
    }

    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

fn reason_suffix(status_text: &str) -> String {
    if status_text.is_empty() {
        String::new()
    } else {
        format!(": {}", status_text)
    }
}
