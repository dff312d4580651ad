//! HTTP bridge to the messaging-protocol daemon.

use crate::gateway::{GatewayError, MessageGateway};
use crate::APP_USER_AGENT;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tokio::time::{interval, Duration};
use tracing::{debug, info, instrument};
use url::Url;

const SESSION_POLL_SECONDS: u64 = 2;

#[derive(Debug, Deserialize)]
struct SessionStatus {
    status: String,
    code: Option<String>,
}

/// Gateway implementation talking to the protocol daemon over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Connect to the daemon and block until its session is logged in.
    ///
    /// While the daemon is pairing, the code it reports is logged so the
    /// operator can complete device pairing out-of-band.
    ///
    /// # Errors
    /// Returns an error if the daemon cannot be reached or answers with a
    /// malformed session status.
    pub async fn connect(base_url: Url) -> Result<Self> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        let gateway = Self { client, base_url };

        gateway.wait_for_session().await?;

        Ok(gateway)
    }

    #[instrument(skip(self))]
    async fn wait_for_session(&self) -> Result<()> {
        let url = self.endpoint("v1/session")?;

        let mut ticker = interval(Duration::from_secs(SESSION_POLL_SECONDS));

        // Sequential wait loop, the daemon owns the pairing state machine.
        loop {
            ticker.tick().await;

            let session: SessionStatus = self
                .client
                .get(url.clone())
                .send()
                .await
                .context("Failed to query gateway session status")?
                .error_for_status()?
                .json()
                .await
                .context("Malformed gateway session status")?;

            match session.status.as_str() {
                "connected" => {
                    info!("Gateway session connected");
                    return Ok(());
                }
                "pairing" => {
                    if let Some(code) = session.code {
                        info!("Pairing code: {}", code);
                    }
                }
                other => debug!("Gateway session event: {}", other),
            }
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid gateway endpoint {path}"))
    }
}

#[async_trait]
impl MessageGateway for HttpGateway {
    #[instrument(skip(self, text))]
    async fn send_text(&self, jid: &str, text: &str) -> Result<(), GatewayError> {
        let url = self
            .endpoint("v1/messages")
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        debug!("Sending to {} via {}", jid, url);

        let response = self
            .client
            .post(url)
            .json(&json!({ "jid": jid, "text": text }))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let detail = response.text().await.unwrap_or_default();

        Err(GatewayError::Rejected { status, detail })
    }
}
