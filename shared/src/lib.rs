use serde::{Deserialize, Serialize};

mod number;
mod patch;
mod validation;

pub use patch::Patch;
pub use validation::{FieldError, Validate, ValidationErrors, MAX_TEXT_LEN};

use number::{whole_number, whole_number_patch};
use validation::{check_patch, check_price, check_quantity, check_text};

pub type ItemId = i64;
pub type OrderId = i64;

pub const DEFAULT_ORDER_STATUS: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryCreate {
    pub name: String,
    #[serde(deserialize_with = "whole_number")]
    pub quantity: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InventoryUpdate {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default, deserialize_with = "whole_number_patch")]
    pub quantity: Patch<i64>,
    #[serde(default)]
    pub price: Patch<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub customer: String,
    pub items: Vec<ItemId>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer: String,
    #[serde(default)]
    pub items: Vec<ItemId>,
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderUpdate {
    #[serde(default)]
    pub customer: Patch<String>,
    #[serde(default)]
    pub items: Patch<Vec<ItemId>>,
    #[serde(default)]
    pub status: Patch<String>,
}

fn default_status() -> String {
    DEFAULT_ORDER_STATUS.to_string()
}

impl InventoryRecord {
    pub fn new(id: ItemId, payload: InventoryCreate) -> Self {
        Self {
            id,
            name: payload.name,
            quantity: payload.quantity,
            price: payload.price,
        }
    }

    pub fn apply(&mut self, update: InventoryUpdate) {
        update.name.apply_to(&mut self.name);
        update.quantity.apply_to(&mut self.quantity);
        update.price.apply_to(&mut self.price);
    }
}

impl OrderRecord {
    pub fn new(id: OrderId, payload: OrderCreate) -> Self {
        Self {
            id,
            customer: payload.customer,
            items: payload.items,
            status: payload.status,
        }
    }

    pub fn apply(&mut self, update: OrderUpdate) {
        update.customer.apply_to(&mut self.customer);
        update.items.apply_to(&mut self.items);
        update.status.apply_to(&mut self.status);
    }

    /// Drops every occurrence of `item_id`, keeping the rest in order.
    /// Returns whether anything was removed.
    pub fn remove_item(&mut self, item_id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|id| *id != item_id);
        self.items.len() != before
    }
}

impl Validate for InventoryCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "name", &self.name);
        check_quantity(&mut errors, "quantity", self.quantity);
        check_price(&mut errors, "price", self.price);
        errors.into_result()
    }
}

impl Validate for InventoryUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_patch(&mut errors, "name", &self.name, |e, f, v| check_text(e, f, v));
        check_patch(&mut errors, "quantity", &self.quantity, |e, f, v| {
            check_quantity(e, f, *v)
        });
        check_patch(&mut errors, "price", &self.price, |e, f, v| {
            check_price(e, f, *v)
        });
        errors.into_result()
    }
}

impl Validate for OrderCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "customer", &self.customer);
        errors.into_result()
    }
}

impl Validate for OrderUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_patch(&mut errors, "customer", &self.customer, |e, f, v| {
            check_text(e, f, v)
        });
        check_patch(&mut errors, "items", &self.items, |_, _, _| {});
        check_patch(&mut errors, "status", &self.status, |_, _, _| {});
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_create_defaults() {
        let order: OrderCreate = serde_json::from_str(r#"{"customer": "Ada"}"#).unwrap();
        assert!(order.items.is_empty());
        assert_eq!(order.status, DEFAULT_ORDER_STATUS);
    }

    #[test]
    fn inventory_create_requires_every_field() {
        let result = serde_json::from_str::<InventoryCreate>(r#"{"name": "Widget", "price": 1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn inventory_create_reports_each_bad_field() {
        let payload = InventoryCreate {
            name: String::new(),
            quantity: -1,
            price: -2.5,
        };
        let errors = payload.validate().unwrap_err();
        let fields: Vec<_> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["name", "quantity", "price"]);
    }

    #[test]
    fn inventory_update_rejects_null_but_allows_omission() {
        let update: InventoryUpdate = serde_json::from_str(r#"{"price": 9.99}"#).unwrap();
        assert!(update.validate().is_ok());

        let update: InventoryUpdate = serde_json::from_str(r#"{"name": null}"#).unwrap();
        let errors = update.validate().unwrap_err();
        assert_eq!(errors.errors()[0].field, "name");
    }

    #[test]
    fn inventory_apply_merges_supplied_fields() {
        let mut record = InventoryRecord::new(
            1,
            InventoryCreate {
                name: "Widget".to_string(),
                quantity: 10,
                price: 12.5,
            },
        );
        let update: InventoryUpdate = serde_json::from_str(r#"{"price": 9.99}"#).unwrap();
        record.apply(update);

        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Widget");
        assert_eq!(record.quantity, 10);
        assert_eq!(record.price, 9.99);
    }

    #[test]
    fn order_update_rejects_null_items() {
        let update: OrderUpdate = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(update.validate().is_err());

        let update: OrderUpdate = serde_json::from_str(r#"{"status": "shipped"}"#).unwrap();
        assert!(update.validate().is_ok());
    }

    #[test]
    fn remove_item_drops_all_duplicates_in_order() {
        let mut order = OrderRecord::new(
            1,
            OrderCreate {
                customer: "Ada".to_string(),
                items: vec![1, 2, 1, 3],
                status: default_status(),
            },
        );
        assert!(order.remove_item(1));
        assert_eq!(order.items, vec![2, 3]);
        assert!(!order.remove_item(7));
    }
}
