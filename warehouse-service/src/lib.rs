//! In-memory warehouse API: inventory items, orders that reference them,
//! and the HTTP surface over both.

pub mod api;
pub mod error;
pub mod extract;
pub mod state;
pub mod store;

pub use error::{Resource, WarehouseError};
pub use state::{AppState, Warehouse};
