//! Chronicle backend - HTTP entry point

use std::sync::Arc;

use chronicle_server::{logging, router, AppContext};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env file loaded"),
    }

    let config = chronicle_infra::config::load()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let ctx = Arc::new(AppContext::new(config)?);
    let app = router(ctx);

    info!(%addr, "chronicle server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
