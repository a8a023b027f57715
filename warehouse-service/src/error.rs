use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use shared::{ItemId, ValidationErrors};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    InventoryItem,
    Order,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::InventoryItem => f.write_str("Inventory item"),
            Resource::Order => f.write_str("Order"),
        }
    }
}

/// Every way a warehouse request can fail. None of them leave state
/// partially modified.
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("{0} not found")]
    NotFound(Resource),

    /// An order referenced inventory ids that do not exist. Carries the
    /// offending ids exactly as they appeared in the request.
    #[error("Items not found in inventory: {0:?}")]
    MissingItems(Vec<ItemId>),

    /// Field constraints, undecodable bodies and unparsable path ids.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

pub type Result<T> = std::result::Result<T, WarehouseError>;

impl WarehouseError {
    pub fn status(&self) -> StatusCode {
        match self {
            WarehouseError::NotFound(_) => StatusCode::NOT_FOUND,
            WarehouseError::MissingItems(_) => StatusCode::BAD_REQUEST,
            WarehouseError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<JsonRejection> for WarehouseError {
    /// Syntax errors, a missing JSON content type and type mismatches are
    /// all reported as a field error on `body`, never with 400.
    fn from(rejection: JsonRejection) -> Self {
        WarehouseError::Validation(ValidationErrors::single("body", rejection.body_text()))
    }
}

impl IntoResponse for WarehouseError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Rejected request with {}: {}", status, self);

        let detail = self.to_string();
        let body = match self {
            WarehouseError::MissingItems(missing) => json!({
                "detail": detail,
                "missing_items": missing,
            }),
            WarehouseError::Validation(errors) => json!({ "detail": errors }),
            WarehouseError::NotFound(_) => json!({ "detail": detail }),
        };

        (status, Json(body)).into_response()
    }
}
