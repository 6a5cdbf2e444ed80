use anyhow::Context;

use transitplan_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_validated().context("invalid configuration")?;
    transitplan_observability::init(&config.server.log_level);

    let app = transitplan_api::app::build_app(&config).context("failed to open planning stores")?;

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
