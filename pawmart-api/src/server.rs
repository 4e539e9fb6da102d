//! HTTP server setup.

use std::{future::Future, net::SocketAddr};

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, warn};

use crate::{
    handlers::{health, listings, orders},
    request_id::request_id_middleware,
    state::AppState,
};

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/order", post(orders::create_order))
        .route("/listing", get(listings::all_listings).post(listings::create_listing))
        .route("/recentListing", get(listings::recent_listings))
        .route(
            "/listing/{id}",
            get(listings::get_listing)
                .put(listings::update_listing)
                .delete(listings::delete_listing),
        )
        .route("/listing/user/{email}", get(listings::listings_by_owner))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the HTTP server and serves until `shutdown` resolves.
///
/// The document store is shut down after the last in-flight request completes.
pub async fn start_server<F>(state: AppState, addr: SocketAddr, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = state.store.clone();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    if let Err(e) = store.shutdown().await {
        warn!(error = %e, "Document store shutdown failed");
    }
    info!("Server stopped");

    Ok(())
}
