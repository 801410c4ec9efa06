//! Client-side shopping cart.

use medistore_api_types::{CreateOrder, OrderItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub medicine_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// Ordered list of cart lines, one per medicine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line. Adding a medicine already in the cart merges the
    /// quantities and takes the newer name and price. Non-positive
    /// quantities are ignored.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity <= 0 {
            return;
        }
        match self
            .items
            .iter_mut()
            .find(|line| line.medicine_id == item.medicine_id)
        {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(item.quantity);
                line.price = item.price;
                line.name = item.name;
            }
            None => self.items.push(item),
        }
    }

    /// Set a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, medicine_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(medicine_id);
            return;
        }
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.medicine_id == medicine_id)
        {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, medicine_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.medicine_id != medicine_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |total, line| total.saturating_add(line.quantity))
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .map(|line| line.price * line.quantity as f64)
            .sum()
    }

    /// Order payload for the current cart contents.
    pub fn to_order(&self, shipping_address: impl Into<String>) -> CreateOrder {
        CreateOrder {
            items: self
                .items
                .iter()
                .map(|line| OrderItem {
                    medicine_id: line.medicine_id.clone(),
                    quantity: line.quantity,
                    price: line.price,
                })
                .collect(),
            shipping_address: shipping_address.into(),
            phone: None,
            notes: None,
        }
    }
}
