use std::sync::Arc;

use aimachine::api;
use aimachine::config::Config;
use aimachine::metrics;
use aimachine::session::registry::SessionRegistry;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    metrics::register_metrics();

    let config = Arc::new(Config::load());
    let port = config.port;
    tracing::info!("Game server at {}", config.game_server_url);

    let app = api::router(config, SessionRegistry::new());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to port {port}: {e}"));

    tracing::info!("Aimachine AI listening on port {port}");
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
