use crate::api;
use crate::auth::{AuthGate, Credentials};
use crate::cli::actions::Action;
use crate::gateway::HttpGateway;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            credentials_file,
            gateway_url,
        } => {
            // Fatal before serving traffic, a broken credentials file must
            // not start an unauthenticated server.
            let credentials = Credentials::load(&credentials_file)?;

            info!("Loaded credentials for user {}", credentials.username());

            let gateway_url = Url::parse(&gateway_url).context("Invalid gateway URL")?;

            // Blocks until the daemon's session is paired and connected.
            let gateway = HttpGateway::connect(gateway_url).await?;

            api::new(port, Arc::new(AuthGate::new(credentials)), Arc::new(gateway)).await?;
        }
    }

    Ok(())
}
