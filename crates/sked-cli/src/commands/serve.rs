use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use super::Service;
use crate::cli::ServeCommand;
use crate::config::Config;
use crate::server::{AppState, Server};

/// Serves until Ctrl-C, then drains open requests.
pub async fn serve(service: Service, command: ServeCommand, config: &Config) -> Result<()> {
    let port = command.port.unwrap_or(config.port);
    let state = AppState {
        service,
        web_dir: Arc::new(config.web_dir.clone()),
        task_limit: config.task_limit,
    };

    let server = Server::start(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)), state).await?;
    info!(
        web_dir = %config.web_dir.display(),
        dbfile = %config.dbfile.display(),
        "sked is ready"
    );

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    info!("shutting down");
    server.shutdown().await;
    Ok(())
}
