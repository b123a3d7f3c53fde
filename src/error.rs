//! Error types for the viewer surface.
//!
//! The particle core itself is infallible; these errors come from parsing
//! user input and validating configuration.

use thiserror::Error;

/// Errors produced by model selection and configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetError {
    /// A model name that does not match any transistor architecture.
    #[error("Unknown transistor model: '{0}'")]
    UnknownModel(String),

    /// A configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FetError>;
