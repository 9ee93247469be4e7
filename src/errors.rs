/*!
 * Error types for the subsafe library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Only parsing raises `SubtitleError`. The sanitizers never fail: their worst
 * case is an empty string reported through `was_modified`.
 */

use thiserror::Error;

use crate::subtitle::SubtitleFormat;

/// Errors that can occur while parsing subtitle text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// A timestamp did not match the grammar of its format.
    ///
    /// Block parsers catch this and drop the offending block.
    #[error("Invalid {format} timestamp: '{input}'")]
    TimestampParse {
        /// Grammar the timestamp was checked against
        format: SubtitleFormat,
        /// The rejected input
        input: String,
    },

    /// The input as a whole cannot be read as the requested format
    #[error("Not a valid {format} document: {reason}")]
    FormatParse {
        /// Format the parser expected
        format: SubtitleFormat,
        /// Why the document was rejected
        reason: String,
    },
}

impl SubtitleError {
    pub(crate) fn timestamp(format: SubtitleFormat, input: &str) -> Self {
        Self::TimestampParse {
            format,
            input: input.to_string(),
        }
    }

    pub(crate) fn format(format: SubtitleFormat, reason: impl Into<String>) -> Self {
        Self::FormatParse {
            format,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when working with translation providers
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether another attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A batch came back with no usable lines after every retry
    #[error("Batch {batch} returned no translations (expected {expected})")]
    EmptyBatch {
        /// Zero-based batch number
        batch: usize,
        /// Number of cues in the batch
        expected: usize,
    },
}

/// Errors surfaced by the command line tool
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
