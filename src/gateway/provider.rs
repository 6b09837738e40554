use std::fmt;

use async_trait::async_trait;

use crate::core::state::DraftMessage;

/// Errors that can occur while handing a draft to the email relay.
/// All of them surface to the user as the same failure line.
#[derive(Debug)]
pub enum GatewayError {
    /// Gateway misconfigured (missing service, template or public key).
    Config(String),
    /// Network-level failure (DNS, connection refused, TLS).
    Network(String),
    /// Relay answered with a non-success status.
    Api { status: u16, message: String },
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Config(msg) => write!(f, "config error: {msg}"),
            GatewayError::Network(msg) => write!(f, "network error: {msg}"),
            GatewayError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
        }
    }
}

impl std::error::Error for GatewayError {}

#[async_trait]
pub trait EmailGateway: Send + Sync {
    /// Returns the name of the gateway.
    fn name(&self) -> &str;

    /// Delivers a completed draft. Resolves once the relay answers or the
    /// transport fails; there is no timeout.
    async fn send(&self, draft: &DraftMessage) -> Result<(), GatewayError>;
}
