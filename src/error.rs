//! The single error kind reported by task gateways

use reqwest::StatusCode;
use thiserror::Error;

/// Any failure while talking to a task gateway: network failure, unexpected HTTP status, undecodable payload...
///
/// No distinction is made between "not found", "validation" or "server" errors: they are all reported the same way, by their message.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    message: String,
}

impl GatewayError {
    pub fn new<S: ToString>(message: S) -> Self {
        Self { message: message.to_string() }
    }

    /// The server answered, but not with a 2xx status
    pub fn unexpected_status(status: StatusCode) -> Self {
        Self::new(format!("Unexpected HTTP status code {:?}", status))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err)
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        Self::new(err)
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err)
    }
}
