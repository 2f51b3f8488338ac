//! Sale domain models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::product::model::Product;

/// One line of a recorded sale. `price` is the unit price at sale time.
///
/// `P` is the product id as stored, or the product document itself once
/// the sale has been populated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem<P = String> {
    pub product: P,
    pub quantity: u32,
    pub price: f64,
}

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale<P = String> {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    pub items: Vec<SaleItem<P>>,
    pub total_amount: f64,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: DateTime<Utc>,
}

/// A sale whose lines carry the product document. Products deleted since
/// the sale show up as `null`.
pub type PopulatedSale = Sale<Option<Product>>;

impl Sale {
    /// A new sale dated now, totalled from its priced lines.
    pub fn new(owner: &str, items: Vec<SaleItem>, customer_name: &str, customer_phone: &str) -> Self {
        let total_amount = items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();
        Self {
            id: Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            items,
            total_amount,
            customer_name: customer_name.trim().to_string(),
            customer_phone: customer_phone.trim().to_string(),
            date: Utc::now(),
        }
    }

    /// Replace each line's product id with the matching catalog entry.
    pub fn populate(self, catalog: &HashMap<String, Product>) -> PopulatedSale {
        let items = self
            .items
            .into_iter()
            .map(|item| SaleItem {
                product: catalog.get(&item.product).cloned(),
                quantity: item.quantity,
                price: item.price,
            })
            .collect();
        Sale {
            id: self.id,
            owner: self.owner,
            items,
            total_amount: self.total_amount,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            date: self.date,
        }
    }
}

/// Requested line of a new sale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaleItemInput {
    pub product: String,
    pub quantity: u32,
}

/// Body of a sale creation request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub items: Vec<SaleItemInput>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
}

/// Revenue on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAmount {
    pub date: DateTime<Utc>,
    pub amount: f64,
}

/// Dashboard aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
    pub total_sales: f64,
    /// Last seven days, oldest first, today last.
    pub sales_data: Vec<DailyAmount>,
}

/// Today's sales and their combined total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodaySales {
    pub sales: Vec<PopulatedSale>,
    pub total: f64,
}
