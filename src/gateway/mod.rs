//! Boundary to the external messaging-protocol daemon.
//!
//! The daemon owns login, session state and message transport; this side of
//! the seam only formats the recipient JID and hands over one outbound text
//! per request. Handlers depend on the [`MessageGateway`] trait so tests can
//! substitute a fake.

pub mod http;
pub use self::http::HttpGateway;

use async_trait::async_trait;
use thiserror::Error;

/// Host part appended to a numeric recipient to form its JID.
const JID_HOST: &str = "s.whatsapp.net";

/// Format a numeric recipient id as the JID the protocol addresses.
#[must_use]
pub fn jid_for(number: &str) -> String {
    format!("{number}@{JID_HOST}")
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway unreachable: {0}")]
    Transport(String),
    #[error("gateway rejected message: {status}: {detail}")]
    Rejected {
        status: reqwest::StatusCode,
        detail: String,
    },
}

/// One-shot message delivery into the protocol daemon.
///
/// No retry or timeout is layered on top here; a slow gateway call blocks
/// its request until the daemon answers.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Deliver a single text message to the given JID.
    ///
    /// # Errors
    /// Returns [`GatewayError`] if the daemon is unreachable or rejects the
    /// message.
    async fn send_text(&self, jid: &str, text: &str) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jid_for() {
        assert_eq!(jid_for("6281234567890"), "6281234567890@s.whatsapp.net");
    }

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "gateway unreachable: connection refused");
    }
}
