//! Binary entrypoint for the flowsync HTTP server.
//!
//! See [`flowsync_server::config`] for the environment variables read at
//! startup. A store that fails to open does not stop the server: it starts
//! in degraded mode and reports `firebase_connected: false` on `/health`.

use flowsync_server::config::ServerConfig;
use flowsync_server::router::build_router;
use flowsync_server::state::AppState;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let state = AppState::from_config(&config);
    if !state.store_connected() {
        tracing::warn!(
            "document store not initialized; server will start but flow routes will fail"
        );
    }

    let app = build_router(state);

    let addr = config.bind_address();
    tracing::info!("flowsync server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}
