//! HTTP surface for the Pokemon catalog.

pub mod cli;
pub mod error;
pub mod router;
pub mod routes;

use anyhow::Context;
use pokedex_core::Catalog;
use pokedex_utils_readiness::Readiness;
use tokio::net::TcpListener;
use tracing::info;
use tracing::warn;

pub use cli::ServerArgs;
pub use router::API_PREFIX;
pub use router::app_router;

/// Starts ingestion, binds the listener and serves until Ctrl-C.
pub async fn run(args: ServerArgs) -> anyhow::Result<()> {
    let config = args.catalog_config();
    let (catalog, ingest) =
        Catalog::load(&config).context("failed to set up the enrichment client")?;

    if args.wait_for_ingest {
        info!(data = %config.data_path.display(), "waiting for dataset ingestion");
        catalog.readiness().wait_ready().await?;
    }

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app_router(catalog))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    ingest.abort();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
