use axum::{Json, extract::State};
use pawmart_store::{document::Document, outcome::InsertOneResult};
use tracing::{debug, instrument};

use crate::{
    error::ApiError,
    json::{JsonObject, to_document},
    models::Order,
    state::AppState,
};

#[instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<JsonObject>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let order = Order::from_document(to_document(&body)?)?;

    let ack = state.store
        .typed_collection::<Order>()
        .insert_one(order)
        .await?;

    debug!(collection = Order::collection_name(), id = %ack.inserted_id, "Inserted order");

    Ok(Json(ack))
}
