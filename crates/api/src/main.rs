use std::sync::Arc;

use anyhow::Context;

use catalog_api::app::{self, services::AppServices};
use catalog_infra::CatalogConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CatalogConfig::from_env().context("invalid configuration")?;
    catalog_observability::init(config.log_format);

    let services = AppServices::from_config(&config)
        .await
        .context("failed to initialize product store")?;
    tracing::info!(
        backend = services.backend(),
        stock_ceiling = config.stock_ceiling,
        "product store ready"
    );

    let app = app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
