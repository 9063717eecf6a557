use std::sync::Arc;

use anyhow::Context;

use propinv_api::app::{build_app, services::build_services};
use propinv_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first: it loads `.env`, which may carry RUST_LOG / LOG_FORMAT.
    let config = AppConfig::from_env();
    propinv_observability::init();

    let config = config.inspect_err(|e| tracing::error!(error = %e, "invalid configuration"))?;

    let services = Arc::new(build_services(&config).await?);
    let app = build_app(services.clone(), &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(propinv_api::shutdown::signal())
        .await
        .context("server error")?;

    services.shutdown().await;
    tracing::info!("shutdown complete");
    Ok(())
}
