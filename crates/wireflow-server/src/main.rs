//! Binary entrypoint for the wireflow websocket server.
//!
//! Reads configuration from environment variables:
//! - `WIREFLOW_PORT`: listen port (default: "8891")

use wireflow_server::router::build_router;
use wireflow_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let port = std::env::var("WIREFLOW_PORT").unwrap_or_else(|_| "8891".to_string());

    let state = AppState::new(wireflow_library::default_catalog());
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("wireflow server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
