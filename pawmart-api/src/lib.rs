//! HTTP API for the PawMart marketplace.
//!
//! Exposes listings and orders over JSON. Each route maps to a single
//! document store operation; see [`server::create_router`] for the route table.
//!
//! The store handle is built once at startup and injected through
//! [`state::AppState`], so the router runs equally against MongoDB or the
//! in-memory backend:
//!
//! ```ignore
//! use pawmart_api::{server::create_router, state::AppState};
//! use pawmart_store::{memory::InMemoryStore, store::DocumentStore};
//!
//! let app = create_router(AppState::new(DocumentStore::new(InMemoryStore::new())));
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod json;
pub mod models;
pub mod request_id;
pub mod server;
pub mod state;
pub mod telemetry;
