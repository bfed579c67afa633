use std::sync::Arc;

use partlens::api::api_router;
use partlens::state::AppState;
use partlens::{config, init_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let state = Arc::new(AppState::from_env());
    let router = api_router(state);

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        inference = %config::inference_base_url(),
        "API server listening"
    );

    axum::serve(listener, router).await
}
