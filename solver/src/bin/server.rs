use std::sync::Arc;

use explodice::server::{create_router, ServerConfig};

#[tokio::main]
async fn main() {
    let port = explodice::env_config::server_port();
    let threads = explodice::env_config::init_rayon_threads();
    println!("Starting explodice API server...");
    println!("Rayon threads: {}", threads);

    let config = Arc::new(ServerConfig::default());
    let app = create_router(config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();
    println!("Server is running on port {}. Press Ctrl+C to stop.", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("\nStopping server...");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
}
