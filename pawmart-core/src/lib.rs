//! Document store abstraction behind the PawMart API.
//!
//! This crate provides:
//!
//! - **Document traits** ([`document`]) - Typed views over open BSON documents
//! - **Store backend abstraction** ([`backend`]) - Trait implemented by the storage backends
//! - **Query and filtering API** ([`query`]) - Filter expressions and a visitor to execute them
//! - **Collections interface** ([`collection`]) - Untyped and typed collection handles
//! - **Document store** ([`store`]) - Shareable handle owning the backend
//! - **Write acknowledgments** ([`outcome`]) - Insert, update and delete results
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use pawmart_core::{store::DocumentStore, query::Filter};
//! use bson::doc;
//!
//! let store = DocumentStore::new(backend);
//! let listings = store.collection("listing");
//!
//! let ack = listings.insert_one(doc! { "name": "Leash", "email": "a@x.com" }).await?;
//! let stored = listings.find_one(Filter::id(ack.inserted_id)).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as pawmart_core;

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod outcome;
pub mod query;
pub mod store;
