//! Shared types and utilities for the contact relay

pub mod types;

pub use types::*;
