//! Document persistence.
//!
//! [`InventoryStore`] is the narrow interface the domain logic needs from the
//! document database. Every operation is scoped by owner. [`MemoryStore`]
//! keeps everything in process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StockError, StockResult};
use crate::product::model::{Product, ProductInput};
use crate::profile::model::Profile;
use crate::sale::model::{NewSale, Sale, SaleItem};

#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn insert_product(&self, product: Product) -> StockResult<()>;

    /// Products owned by `owner`, oldest first.
    async fn list_products(&self, owner: &str) -> StockResult<Vec<Product>>;

    async fn get_product(&self, owner: &str, id: &str) -> StockResult<Option<Product>>;

    async fn update_product(
        &self,
        owner: &str,
        id: &str,
        input: &ProductInput,
    ) -> StockResult<Option<Product>>;

    async fn delete_product(&self, owner: &str, id: &str) -> StockResult<Option<Product>>;

    /// Price `order` from `owner`'s catalog, take the sold quantities out of
    /// stock and persist the sale.
    ///
    /// Pricing and deduction see the same catalog state. Either every item
    /// is deducted and the sale stored, or nothing changes.
    async fn commit_sale(&self, owner: &str, order: &NewSale) -> StockResult<Sale>;

    /// Sales recorded by `owner`, newest first.
    async fn list_sales(&self, owner: &str) -> StockResult<Vec<Sale>>;

    async fn get_profile(&self, owner: &str) -> StockResult<Option<Profile>>;

    /// Insert or replace `owner`'s profile.
    ///
    /// Fails with [`StockError::EmailInUse`] if another owner has the email.
    async fn save_profile(&self, profile: Profile) -> StockResult<Profile>;
}

#[derive(Default)]
struct Documents {
    products: HashMap<String, Product>,
    sales: Vec<Sale>,
    /// Keyed by owner.
    profiles: HashMap<String, Profile>,
}

/// In-process store.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn insert_product(&self, product: Product) -> StockResult<()> {
        let mut docs = self.docs.write().await;
        if docs.products.contains_key(&product.id) {
            return Err(StockError::Store(format!("duplicate product id {}", product.id)));
        }
        debug!(product_id = %product.id, owner = %product.owner, "Inserted product");
        docs.products.insert(product.id.clone(), product);
        Ok(())
    }

    async fn list_products(&self, owner: &str) -> StockResult<Vec<Product>> {
        let docs = self.docs.read().await;
        let mut products: Vec<Product> = docs
            .products
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(products)
    }

    async fn get_product(&self, owner: &str, id: &str) -> StockResult<Option<Product>> {
        let docs = self.docs.read().await;
        Ok(docs.products.get(id).filter(|p| p.owner == owner).cloned())
    }

    async fn update_product(
        &self,
        owner: &str,
        id: &str,
        input: &ProductInput,
    ) -> StockResult<Option<Product>> {
        let mut docs = self.docs.write().await;
        Ok(docs
            .products
            .get_mut(id)
            .filter(|p| p.owner == owner)
            .map(|product| {
                product.apply(input);
                product.clone()
            }))
    }

    async fn delete_product(&self, owner: &str, id: &str) -> StockResult<Option<Product>> {
        let mut docs = self.docs.write().await;
        match docs.products.get(id) {
            Some(product) if product.owner == owner => Ok(docs.products.remove(id)),
            _ => Ok(None),
        }
    }

    async fn commit_sale(&self, owner: &str, order: &NewSale) -> StockResult<Sale> {
        let mut docs = self.docs.write().await;

        let mut demand: HashMap<String, u32> = HashMap::new();
        let mut items = Vec::with_capacity(order.items.len());
        for line in &order.items {
            let product = docs
                .products
                .get(&line.product)
                .filter(|p| p.owner == owner)
                .ok_or_else(|| StockError::SaleItemNotFound(line.product.clone()))?;

            let wanted = demand.entry(product.id.clone()).or_default();
            *wanted = wanted.saturating_add(line.quantity);
            if product.quantity < *wanted {
                return Err(StockError::InsufficientStock(product.name.clone()));
            }

            items.push(SaleItem {
                product: product.id.clone(),
                quantity: line.quantity,
                price: product.price,
            });
        }

        for (id, wanted) in demand {
            if let Some(product) = docs.products.get_mut(&id) {
                product.quantity -= wanted;
            }
        }

        let sale = Sale::new(owner, items, &order.customer_name, &order.customer_phone);
        debug!(sale_id = %sale.id, owner = %owner, "Committed sale");
        docs.sales.push(sale.clone());
        Ok(sale)
    }

    async fn list_sales(&self, owner: &str) -> StockResult<Vec<Sale>> {
        let docs = self.docs.read().await;
        let mut sales: Vec<Sale> = docs
            .sales
            .iter()
            .filter(|s| s.owner == owner)
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sales)
    }

    async fn get_profile(&self, owner: &str) -> StockResult<Option<Profile>> {
        let docs = self.docs.read().await;
        Ok(docs.profiles.get(owner).cloned())
    }

    async fn save_profile(&self, profile: Profile) -> StockResult<Profile> {
        let mut docs = self.docs.write().await;
        if docs
            .profiles
            .values()
            .any(|p| p.owner != profile.owner && p.email == profile.email)
        {
            return Err(StockError::EmailInUse);
        }
        debug!(owner = %profile.owner, "Saved profile");
        docs.profiles.insert(profile.owner.clone(), profile.clone());
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sale::model::SaleItemInput;
    use chrono::Utc;

    fn product(owner: &str, name: &str, price: f64, quantity: u32) -> Product {
        Product {
            id: format!("{owner}-{name}"),
            owner: owner.to_string(),
            name: name.to_string(),
            description: None,
            price,
            quantity,
            category: None,
            created_at: Utc::now(),
        }
    }

    fn order(product: &str, quantity: u32) -> NewSale {
        NewSale {
            items: vec![SaleItemInput {
                product: product.to_string(),
                quantity,
            }],
            customer_name: " Ada ".to_string(),
            customer_phone: "555".to_string(),
        }
    }

    #[tokio::test]
    async fn test_commit_sale_prices_from_catalog_at_commit() {
        let store = MemoryStore::new();
        store.insert_product(product("shop", "chips", 1.0, 10)).await.unwrap();

        let repriced = ProductInput {
            name: "Chips".to_string(),
            description: None,
            price: 2.5,
            quantity: 10,
            category: None,
        };
        store.update_product("shop", "shop-chips", &repriced).await.unwrap();

        let sale = store.commit_sale("shop", &order("shop-chips", 2)).await.unwrap();
        assert_eq!(sale.items[0].price, 2.5);
        assert_eq!(sale.total_amount, 5.0);
        assert_eq!(sale.customer_name, "Ada");

        let stock = store.get_product("shop", "shop-chips").await.unwrap().unwrap();
        assert_eq!(stock.quantity, 8);
    }

    #[tokio::test]
    async fn test_commit_sale_rejects_foreign_product() {
        let store = MemoryStore::new();
        store.insert_product(product("other", "chips", 1.0, 10)).await.unwrap();

        let err = store.commit_sale("shop", &order("other-chips", 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Product other-chips not found");
        assert!(store.list_sales("shop").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_profile_enforces_unique_email() {
        let store = MemoryStore::new();
        store
            .save_profile(Profile::new("shop-1", "Ada", "ada@example.com", "Corner"))
            .await
            .unwrap();

        let clash = Profile::new("shop-2", "Bob", "ada@example.com", "Kiosk");
        assert!(matches!(store.save_profile(clash).await, Err(StockError::EmailInUse)));
        assert!(store.get_profile("shop-2").await.unwrap().is_none());
    }
}
