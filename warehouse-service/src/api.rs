use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use shared::*;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::error::Result;
use crate::extract::{IdPath, ValidJson};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/inventory", get(list_inventory).post(create_inventory))
        .route(
            "/inventory/:id",
            put(replace_inventory)
                .patch(patch_inventory)
                .delete(delete_inventory),
        )
        .route("/orders", post(create_order))
        .route(
            "/orders/:id",
            get(read_order)
                .put(replace_order)
                .patch(patch_order)
                .delete(delete_order),
        )
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

pub async fn list_inventory(State(state): State<AppState>) -> Json<Vec<InventoryRecord>> {
    Json(state.read().await.list_inventory())
}

pub async fn create_inventory(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<InventoryCreate>,
) -> (StatusCode, Json<InventoryRecord>) {
    let record = state.write().await.create_inventory(payload);
    info!("Created inventory item {}", record.id);
    (StatusCode::CREATED, Json(record))
}

pub async fn replace_inventory(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(payload): ValidJson<InventoryCreate>,
) -> Result<Json<InventoryRecord>> {
    let record = state.write().await.replace_inventory(id, payload)?;
    info!("Replaced inventory item {}", id);
    Ok(Json(record))
}

pub async fn patch_inventory(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(update): ValidJson<InventoryUpdate>,
) -> Result<Json<InventoryRecord>> {
    let record = state.write().await.patch_inventory(id, update)?;
    info!("Patched inventory item {}", id);
    Ok(Json(record))
}

pub async fn delete_inventory(State(state): State<AppState>, IdPath(id): IdPath) -> Result<StatusCode> {
    state.write().await.delete_inventory(id)?;
    info!("Deleted inventory item {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_order(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<OrderCreate>,
) -> Result<(StatusCode, Json<OrderRecord>)> {
    let record = state.write().await.create_order(payload)?;
    info!("Created order {} for {}", record.id, record.customer);
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn read_order(State(state): State<AppState>, IdPath(id): IdPath) -> Result<Json<OrderRecord>> {
    let record = state.read().await.read_order(id)?;
    Ok(Json(record))
}

pub async fn replace_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(payload): ValidJson<OrderCreate>,
) -> Result<Json<OrderRecord>> {
    let record = state.write().await.replace_order(id, payload)?;
    info!("Replaced order {}", id);
    Ok(Json(record))
}

pub async fn patch_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(update): ValidJson<OrderUpdate>,
) -> Result<Json<OrderRecord>> {
    let record = state.write().await.patch_order(id, update)?;
    info!("Patched order {}, status {}", id, record.status);
    Ok(Json(record))
}

pub async fn delete_order(State(state): State<AppState>, IdPath(id): IdPath) -> Result<StatusCode> {
    state.write().await.delete_order(id)?;
    info!("Deleted order {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health_check() -> &'static str {
    "OK"
}
