// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Error types for declm

use thiserror::Error;

/// Result type alias for declm operations
pub type Result<T> = core::result::Result<T, Error>;

/// Main error type for declm
#[derive(Error, Debug)]
pub enum Error {
    /// Signature declaration errors (duplicate fields, unusable shapes)
    #[error("Signature error: {0}")]
    Signature(String),

    /// An overridable operation was invoked without an implementation.
    #[error("{operation} is not implemented for {module}")]
    Unimplemented {
        /// Module type that lacks the operation
        module: String,
        /// Name of the missing operation
        operation: &'static str,
    },

    /// A required collaborator is missing (e.g. no language model configured)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport or API failure reported by a language model client.
    ///
    /// Propagated unchanged through `forward`/`call`.
    #[error("{provider} API error: {message}")]
    Lm {
        /// Provider that produced the error
        provider: String,
        /// Provider-specific message
        message: String,
        /// HTTP status, when the failure came from a response
        status: Option<u16>,
    },

    /// Retriever failures
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML errors
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Parse errors (type tags, log levels, signature strings)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a signature error
    pub fn signature(msg: impl Into<String>) -> Self {
        Self::Signature(msg.into())
    }

    /// Create an unimplemented-operation error
    pub fn unimplemented(module: impl Into<String>, operation: &'static str) -> Self {
        Self::Unimplemented {
            module: module.into(),
            operation,
        }
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a language model error without an HTTP status
    pub fn lm(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lm {
            provider: provider.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a language model error carrying the response status
    pub fn lm_status(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Lm {
            provider: provider.into(),
            message: message.into(),
            status: Some(status),
        }
    }

    /// Create a retrieval error
    pub fn retrieval(msg: impl Into<String>) -> Self {
        Self::Retrieval(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// HTTP status attached to an LM error, if any.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Lm { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if this error came from a language model client.
    #[inline]
    pub fn is_lm_error(&self) -> bool {
        matches!(self, Self::Lm { .. })
    }

    /// Check if this error signals a programming mistake rather than a runtime failure.
    #[inline]
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            Self::Unimplemented { .. } | Self::Signature(_) | Self::Configuration(_)
        )
    }

    /// Get the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Signature(_) => "signature",
            Self::Unimplemented { .. } => "unimplemented",
            Self::Configuration(_) => "configuration",
            Self::Lm { .. } => "lm",
            Self::Retrieval(_) => "retrieval",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            #[cfg(feature = "yaml")]
            Self::Yaml(_) => "yaml",
            Self::Parse(_) => "parse",
            Self::Other(_) => "other",
        }
    }
}
