//! PawMart API server binary.

use pawmart_api::{
    config::{AppConfig, StoreConfig},
    server::start_server,
    state::AppState,
    telemetry::init_tracing,
};
use pawmart_store::{
    backend::StoreBackendBuilder,
    memory::InMemoryStore,
    mongodb::MongoDbStore,
    store::DocumentStore,
};
use secrecy::ExposeSecret;

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("Failed to load configuration");

    init_tracing();

    tracing::info!(
        addr = %config.socket_addr(),
        backend = ?config.store.kind(),
        "Starting PawMart API"
    );

    let store = match &config.store {
        StoreConfig::Memory => DocumentStore::new(
            InMemoryStore::builder()
                .build()
                .await
                .expect("Failed to create in-memory store"),
        ),
        StoreConfig::MongoDb { uri, database } => DocumentStore::new(
            MongoDbStore::builder(uri.expose_secret(), database)
                .build()
                .await
                .expect("Failed to create MongoDB client"),
        ),
    };

    // An unreachable store is not fatal; requests fail until it comes back
    match store.ping().await {
        Ok(()) => tracing::info!("Document store reachable"),
        Err(e) => tracing::warn!(error = %e, "Document store ping failed"),
    }

    start_server(AppState::new(store), config.socket_addr(), shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
