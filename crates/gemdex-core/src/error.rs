//! Error types for gemdex.
//!
//! Every stage of the interception pipeline has its own error enum so that
//! the boundaries that swallow failures can log what actually went wrong.

use thiserror::Error;

/// The unified error type for gemdex operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Response body or payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Network hooks could not be installed or used.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// A cross-context message could not be delivered.
    #[error("relay error: {0}")]
    Relay(#[from] RelayError),

    /// The key-value store failed to read or write.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (bad record id, glyph, URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Decoding failures inside the interception pipeline.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The embedded RPC payload string was not valid JSON.
    #[error("RPC payload is not valid JSON: {message}")]
    Payload { message: String },
}

/// Failures around installing or driving the wrapped network primitives.
#[derive(Debug, Error)]
pub enum HookError {
    /// Hooks were already installed on this page scope.
    #[error("network hooks are already installed for this page")]
    AlreadyInstalled,

    /// The underlying fetch primitive failed.
    #[error("fetch failed: {message}")]
    Fetch { message: String },

    /// A response body was read more than once.
    #[error("response body already consumed")]
    BodyConsumed,
}

/// Cross-context delivery failures.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Nobody is listening on the other end yet (or any more).
    #[error("no receiver is listening for {channel}")]
    NotListening { channel: String },

    /// The message could not be encoded for transport.
    #[error("message encoding failed: {message}")]
    Encode { message: String },
}

/// Key-value storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem I/O failed.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// A stored value could not be (de)serialized.
    #[error("value for key '{key}' is malformed: {message}")]
    Codec { key: String, message: String },
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Store(StoreError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid record id.
    #[error("invalid record id '{value}': {reason}")]
    RecordId { value: String, reason: String },

    /// Invalid emoji glyph.
    #[error("invalid emoji '{value}': {reason}")]
    Emoji { value: String, reason: String },

    /// Invalid URL.
    #[error("invalid URL '{value}': {reason}")]
    Url { value: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_store_errors() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Store(StoreError::Io { .. })));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn nested_display_is_prefixed() {
        let err = Error::from(HookError::AlreadyInstalled);
        assert_eq!(
            err.to_string(),
            "hook error: network hooks are already installed for this page"
        );
    }
}
