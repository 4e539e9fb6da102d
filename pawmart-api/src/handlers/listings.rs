//! Listing routes.

use axum::{
    Json,
    extract::{Path, State},
};
use pawmart_store::{
    document::Document,
    outcome::{DeleteResult, InsertOneResult, UpdateResult},
    query::{Filter, Query},
};
use serde_json::Value;
use tracing::{debug, instrument};

use super::parse_id;
use crate::{
    error::ApiError,
    json::{JsonObject, render_document, to_document},
    models::{EMAIL_FIELD, Listing},
    state::AppState,
};

/// Number of listings returned by the "recent" route.
pub const RECENT_LIMIT: usize = 6;

fn render_all(listings: Vec<Listing>) -> Json<Vec<Value>> {
    Json(
        listings
            .into_iter()
            .map(|listing| render_document(listing.into_document()))
            .collect()
    )
}

#[instrument(skip_all)]
pub async fn create_listing(
    State(state): State<AppState>,
    Json(body): Json<JsonObject>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let listing = Listing::from_document(to_document(&body)?)?;

    let ack = state.store
        .typed_collection::<Listing>()
        .insert_one(listing)
        .await?;

    debug!(collection = Listing::collection_name(), id = %ack.inserted_id, "Inserted listing");

    Ok(Json(ack))
}

/// Up to six listings in the store's natural order.
#[instrument(skip_all)]
pub async fn recent_listings(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let listings = state.store
        .typed_collection::<Listing>()
        .find(Query::builder().limit(RECENT_LIMIT).build())
        .await?;

    Ok(render_all(listings))
}

#[instrument(skip_all)]
pub async fn all_listings(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let listings = state.store
        .typed_collection::<Listing>()
        .find(Query::all())
        .await?;

    Ok(render_all(listings))
}

/// The listing with the given identity, or JSON `null`.
#[instrument(skip(state))]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;

    let listing = state.store
        .typed_collection::<Listing>()
        .find_one(Filter::id(id))
        .await?;

    debug!(collection = Listing::collection_name(), %id, found = listing.is_some(), "Looked up listing");

    Ok(Json(
        listing
            .map(|listing| render_document(listing.into_document()))
            .unwrap_or(Value::Null)
    ))
}

#[instrument(skip(state))]
pub async fn listings_by_owner(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let listings = state.store
        .typed_collection::<Listing>()
        .find(Query::builder().filter(Filter::eq(EMAIL_FIELD, email)).build())
        .await?;

    Ok(render_all(listings))
}

/// Merges the body's fields into the listing; the body's `_id` is ignored.
#[instrument(skip(state, body))]
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<JsonObject>,
) -> Result<Json<UpdateResult>, ApiError> {
    let id = parse_id(&id)?;
    let patch = Listing::from_document(to_document(&body)?).map_err(ApiError::UpdateFailed)?;

    let result = state.store
        .typed_collection::<Listing>()
        .update_one(Filter::id(id), patch)
        .await
        .map_err(ApiError::UpdateFailed)?;

    debug!(
        collection = Listing::collection_name(),
        %id,
        matched = result.matched_count,
        modified = result.modified_count,
        "Updated listing"
    );

    Ok(Json(result))
}

#[instrument(skip(state))]
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    let id = parse_id(&id)?;

    let result = state.store
        .typed_collection::<Listing>()
        .delete_one(Filter::id(id))
        .await?;

    debug!(collection = Listing::collection_name(), %id, deleted = result.deleted_count, "Deleted listing");

    Ok(Json(result))
}
