//! Product domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry owned by one shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: u32,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// Overwrite the editable fields from `input`.
    pub fn apply(&mut self, input: &ProductInput) {
        self.name = input.name.clone();
        self.description = input.description.clone();
        self.price = input.price;
        self.quantity = input.quantity;
        self.category = input.category.clone();
    }
}
