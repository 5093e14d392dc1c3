//! Core error types for ntexplorer-core.
//!
//! Errors are split by concern: configuration, the recommendation
//! collaborator, quiz flow transitions and user-supplied values. All of them
//! fold into [`CoreError`] for callers that don't care about the distinction.

use std::path::PathBuf;
use thiserror::Error;

use crate::quiz::flow::StepKind;

/// Core error type for ntexplorer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Recommendation collaborator errors
    #[error("Recommendation error: {0}")]
    Recommend(#[from] RecommendError),

    /// Quiz flow transition errors
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the config directory
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures while obtaining recommendations.
///
/// The variants stay distinct for logging, but every one of them is shown
/// to the user as the same localized "failed to load matches" message.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// No API key in config or environment
    #[error("No Gemini API key configured (set GEMINI_API_KEY or gemini.api_key)")]
    MissingApiKey,

    /// Request could not be sent or the reply body could not be read
    #[error("Transport failure: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The service answered with a non-success status
    #[error("Gemini API error (HTTP {status}): {body}")]
    Http { status: u16, body: String },

    /// The reply text did not contain a parseable JSON array
    #[error("Invalid response format: {reason}")]
    MalformedResponse { reason: String },
}

impl RecommendError {
    /// Whether this is a response-format failure rather than a transport one.
    pub fn is_malformed(&self) -> bool {
        matches!(self, RecommendError::MalformedResponse { .. })
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        RecommendError::MalformedResponse {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for RecommendError {
    fn from(err: reqwest::Error) -> Self {
        RecommendError::Transport {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// A flow operation was invoked from a step that doesn't permit it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Cannot {action} while in the {step} step")]
    InvalidTransition {
        action: &'static str,
        step: StepKind,
    },
}

/// Validation errors for values coming from outside the type system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Unknown filter name
    #[error("Unknown filter '{0}' (expected transport, price, duration or timeOfDay)")]
    UnknownFilter(String),

    /// Value outside a filter's domain
    #[error("Invalid value '{value}' for filter '{filter}'")]
    InvalidFilterValue { filter: String, value: String },

    /// Unsupported locale code
    #[error("Unsupported locale '{0}' (expected en or zh)")]
    UnknownLocale(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
