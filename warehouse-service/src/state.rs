use std::sync::Arc;

use shared::*;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use crate::error::{Resource, Result, WarehouseError};
use crate::store::{InventoryStore, OrderStore};

/// Both stores and every cross-store rule.
///
/// Each operation checks everything it can fail on before it mutates, so a
/// returned error means nothing changed. Id-addressed operations report a
/// missing id before they look at item references.
#[derive(Debug, Default)]
pub struct Warehouse {
    inventory: InventoryStore,
    orders: OrderStore,
}

impl Warehouse {
    pub fn list_inventory(&self) -> Vec<InventoryRecord> {
        self.inventory.list()
    }

    pub fn create_inventory(&mut self, payload: InventoryCreate) -> InventoryRecord {
        self.inventory.insert(payload)
    }

    pub fn replace_inventory(
        &mut self,
        id: ItemId,
        payload: InventoryCreate,
    ) -> Result<InventoryRecord> {
        self.inventory
            .replace(id, payload)
            .ok_or(WarehouseError::NotFound(Resource::InventoryItem))
    }

    pub fn patch_inventory(&mut self, id: ItemId, update: InventoryUpdate) -> Result<InventoryRecord> {
        self.inventory
            .patch(id, update)
            .ok_or(WarehouseError::NotFound(Resource::InventoryItem))
    }

    /// Removes an inventory record and strips its id from every order.
    pub fn delete_inventory(&mut self, id: ItemId) -> Result<()> {
        if !self.inventory.contains(id) {
            return Err(WarehouseError::NotFound(Resource::InventoryItem));
        }

        let touched = self.orders.remove_inventory_reference(id);
        if touched > 0 {
            info!("Removed inventory item {} from {} order(s)", id, touched);
        }
        self.inventory.remove(id);
        Ok(())
    }

    /// Fails with the unresolved ids when any entry of `items` has no
    /// inventory record. Reads only.
    pub fn validate_items(&self, items: &[ItemId]) -> Result<()> {
        let missing = self.inventory.missing(items);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WarehouseError::MissingItems(missing))
        }
    }

    pub fn create_order(&mut self, payload: OrderCreate) -> Result<OrderRecord> {
        // Must run before insert so a rejected order does not burn an id.
        self.validate_items(&payload.items)?;
        Ok(self.orders.insert(payload))
    }

    pub fn read_order(&self, id: OrderId) -> Result<OrderRecord> {
        debug!("Reading order {}", id);
        self.orders
            .get(id)
            .cloned()
            .ok_or(WarehouseError::NotFound(Resource::Order))
    }

    pub fn replace_order(&mut self, id: OrderId, payload: OrderCreate) -> Result<OrderRecord> {
        self.ensure_order(id)?;
        self.validate_items(&payload.items)?;
        self.orders
            .replace(id, payload)
            .ok_or(WarehouseError::NotFound(Resource::Order))
    }

    pub fn patch_order(&mut self, id: OrderId, update: OrderUpdate) -> Result<OrderRecord> {
        self.ensure_order(id)?;
        if let Some(items) = update.items.as_value() {
            self.validate_items(items)?;
        }
        self.orders
            .patch(id, update)
            .ok_or(WarehouseError::NotFound(Resource::Order))
    }

    pub fn delete_order(&mut self, id: OrderId) -> Result<()> {
        self.orders
            .remove(id)
            .map(|_| ())
            .ok_or(WarehouseError::NotFound(Resource::Order))
    }

    /// Back to the startup state: no records, both counters at zero.
    pub fn reset(&mut self) {
        self.inventory.reset();
        self.orders.reset();
    }

    fn ensure_order(&self, id: OrderId) -> Result<()> {
        if self.orders.contains(id) {
            Ok(())
        } else {
            Err(WarehouseError::NotFound(Resource::Order))
        }
    }
}

/// Handle to the process-wide warehouse, cloned into every handler.
///
/// Reads share the lock; every mutation, including the cascade on inventory
/// delete, runs under a single write guard.
#[derive(Clone, Default)]
pub struct AppState {
    warehouse: Arc<RwLock<Warehouse>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Warehouse> {
        self.warehouse.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Warehouse> {
        self.warehouse.write().await
    }

    pub async fn reset(&self) {
        self.warehouse.write().await.reset();
        info!("Warehouse state reset");
    }
}
