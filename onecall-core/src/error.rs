use std::time::Duration;

use thiserror::Error;

/// Errors returned by [`OneCallClient`](crate::OneCallClient).
#[derive(Debug, Error)]
pub enum Error {
    /// The client was built with an empty API key. No request was sent.
    #[error("no API key present")]
    MissingApiKey,

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The body was not valid JSON or did not match the response shape.
    #[error("failed to decode One Call response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors produced by a [`Transport`](crate::Transport) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A section name that is not one of [`Part::all`](crate::Part::all).
#[derive(Debug, Error)]
#[error("Unknown part '{0}'. Supported parts: current, minutely, hourly, daily, alerts.")]
pub struct UnknownPart(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_message() {
        assert_eq!(Error::MissingApiKey.to_string(), "no API key present");
    }

    #[test]
    fn transport_error_is_wrapped_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: Error = TransportError::from(io).into();

        assert!(matches!(err, Error::Transport(TransportError::Io(_))));
        assert!(err.to_string().contains("refused"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn timeout_message_mentions_seconds() {
        let err = TransportError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "request timed out after 5s");
    }
}
