use std::collections::BTreeMap;

use shared::*;

/// Inventory records keyed by id.
///
/// Ids come from a counter that only moves forward, so id order is also
/// insertion order and listing needs no separate index.
#[derive(Debug, Default)]
pub struct InventoryStore {
    records: BTreeMap<ItemId, InventoryRecord>,
    last_id: ItemId,
}

impl InventoryStore {
    pub fn list(&self) -> Vec<InventoryRecord> {
        self.records.values().cloned().collect()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn insert(&mut self, payload: InventoryCreate) -> InventoryRecord {
        self.last_id += 1;
        let record = InventoryRecord::new(self.last_id, payload);
        self.records.insert(record.id, record.clone());
        record
    }

    pub fn replace(&mut self, id: ItemId, payload: InventoryCreate) -> Option<InventoryRecord> {
        let slot = self.records.get_mut(&id)?;
        *slot = InventoryRecord::new(id, payload);
        Some(slot.clone())
    }

    pub fn patch(&mut self, id: ItemId, update: InventoryUpdate) -> Option<InventoryRecord> {
        let record = self.records.get_mut(&id)?;
        record.apply(update);
        Some(record.clone())
    }

    pub fn remove(&mut self, id: ItemId) -> Option<InventoryRecord> {
        self.records.remove(&id)
    }

    /// Ids from `items` with no inventory record, in the order given and
    /// with duplicates kept. Empty when every reference resolves.
    pub fn missing(&self, items: &[ItemId]) -> Vec<ItemId> {
        items
            .iter()
            .copied()
            .filter(|id| !self.contains(*id))
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub struct OrderStore {
    records: BTreeMap<OrderId, OrderRecord>,
    last_id: OrderId,
}

impl OrderStore {
    pub fn get(&self, id: OrderId) -> Option<&OrderRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn insert(&mut self, payload: OrderCreate) -> OrderRecord {
        self.last_id += 1;
        let record = OrderRecord::new(self.last_id, payload);
        self.records.insert(record.id, record.clone());
        record
    }

    pub fn replace(&mut self, id: OrderId, payload: OrderCreate) -> Option<OrderRecord> {
        let slot = self.records.get_mut(&id)?;
        *slot = OrderRecord::new(id, payload);
        Some(slot.clone())
    }

    pub fn patch(&mut self, id: OrderId, update: OrderUpdate) -> Option<OrderRecord> {
        let record = self.records.get_mut(&id)?;
        record.apply(update);
        Some(record.clone())
    }

    pub fn remove(&mut self, id: OrderId) -> Option<OrderRecord> {
        self.records.remove(&id)
    }

    /// Strips `item_id` from every order's item list. Other items keep their
    /// relative order and no other field changes. Returns how many orders
    /// were modified.
    pub fn remove_inventory_reference(&mut self, item_id: ItemId) -> usize {
        self.records
            .values_mut()
            .map(|order| order.remove_item(item_id))
            .filter(|removed| *removed)
            .count()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> InventoryCreate {
        InventoryCreate {
            name: name.to_string(),
            quantity: 1,
            price: 1.0,
        }
    }

    fn order(items: Vec<ItemId>) -> OrderCreate {
        OrderCreate {
            customer: "Ada".to_string(),
            items,
            status: DEFAULT_ORDER_STATUS.to_string(),
        }
    }

    #[test]
    fn ids_are_never_reused() {
        let mut store = InventoryStore::default();
        let first = store.insert(item("a"));
        let second = store.insert(item("b"));
        store.remove(second.id);
        let third = store.insert(item("c"));

        assert_eq!((first.id, second.id, third.id), (1, 2, 3));
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn list_keeps_insertion_order_across_replace() {
        let mut store = InventoryStore::default();
        store.insert(item("a"));
        store.insert(item("b"));
        store.replace(1, item("z")).unwrap();

        let names: Vec<_> = store.list().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["z", "b"]);
    }

    #[test]
    fn replace_and_patch_need_an_existing_record() {
        let mut store = InventoryStore::default();
        assert!(store.replace(1, item("a")).is_none());
        assert!(store.patch(1, InventoryUpdate::default()).is_none());
        assert!(store.remove(1).is_none());
        assert_eq!(store.last_id, 0);
    }

    #[test]
    fn missing_keeps_order_and_duplicates() {
        let mut store = InventoryStore::default();
        store.insert(item("a"));
        store.insert(item("b"));

        assert_eq!(store.missing(&[5, 1, -3, 5, 2]), vec![5, -3, 5]);
        assert!(store.missing(&[2, 1, 1]).is_empty());
        assert!(store.missing(&[]).is_empty());
    }

    #[test]
    fn remove_inventory_reference_touches_only_referencing_orders() {
        let mut orders = OrderStore::default();
        orders.insert(order(vec![1, 2, 1]));
        orders.insert(order(vec![2, 3]));
        orders.insert(order(vec![]));

        assert_eq!(orders.remove_inventory_reference(1), 1);
        assert_eq!(orders.get(1).unwrap().items, vec![2]);
        assert_eq!(orders.get(2).unwrap().items, vec![2, 3]);

        assert_eq!(orders.remove_inventory_reference(2), 2);
        assert_eq!(orders.get(2).unwrap().items, vec![3]);
        assert_eq!(orders.get(1).unwrap().customer, "Ada");
    }

    #[test]
    fn reset_clears_records_and_counter() {
        let mut orders = OrderStore::default();
        orders.insert(order(vec![]));
        orders.insert(order(vec![]));
        orders.reset();

        assert!(orders.records.is_empty());
        assert_eq!(orders.insert(order(vec![])).id, 1);
    }
}
