//! Multi-Room Line-Chat Relay - Entry Point
//!
//! Starts the TCP listener, the broadcast router, and the operator
//! console, then accepts connections.

use std::env;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chat_relay::{console, handle_connection, router, ChatState, Router};

/// Default server address
const DEFAULT_ADDR: &str = "127.0.0.1:3334";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=chat_relay=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chat_relay=info")),
        )
        .init();

    // Get bind address from command line or use default
    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    let listener = TcpListener::bind(&addr).await?;
    info!("Chat relay listening on {}", addr);

    // Shared state plus the router that serializes fan-out
    let (publish, queue) = Router::channel();
    let state = ChatState::shared(publish);

    tokio::spawn(router::run(state.clone(), queue));
    tokio::spawn(console::run(state.clone()));

    // Connection accept loop
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                info!("New connection from {}", peer);
                let state = state.clone();

                // Spawn handler task for each connection
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, peer.to_string(), state).await {
                        error!("Connection handler error: {}", e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
