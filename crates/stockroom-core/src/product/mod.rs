//! Product catalog.

pub mod model;

use crate::error::{StockError, StockResult};
use crate::store::InventoryStore;
use chrono::Utc;
use model::{Product, ProductInput};
use uuid::Uuid;

/// Check `input` and return it with its name trimmed.
fn validate(input: &ProductInput) -> StockResult<ProductInput> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(StockError::validation("product name is required"));
    }
    if !input.price.is_finite() || input.price < 0.0 {
        return Err(StockError::validation("price must be a non-negative number"));
    }
    Ok(ProductInput {
        name: name.to_string(),
        ..input.clone()
    })
}

/// Create a new product for `owner`.
pub async fn create_product(
    store: &dyn InventoryStore,
    owner: &str,
    input: &ProductInput,
) -> StockResult<Product> {
    let input = validate(input)?;

    let product = Product {
        id: Uuid::new_v4().to_string(),
        owner: owner.to_string(),
        name: input.name,
        description: input.description,
        price: input.price,
        quantity: input.quantity,
        category: input.category,
        created_at: Utc::now(),
    };
    store.insert_product(product.clone()).await?;
    Ok(product)
}

/// List every product owned by `owner`.
pub async fn list_products(store: &dyn InventoryStore, owner: &str) -> StockResult<Vec<Product>> {
    store.list_products(owner).await
}

/// Replace the editable fields of one of `owner`'s products.
pub async fn update_product(
    store: &dyn InventoryStore,
    owner: &str,
    id: &str,
    input: &ProductInput,
) -> StockResult<Product> {
    let input = validate(input)?;
    store
        .update_product(owner, id, &input)
        .await?
        .ok_or(StockError::ProductNotFound)
}

/// Delete one of `owner`'s products.
pub async fn delete_product(store: &dyn InventoryStore, owner: &str, id: &str) -> StockResult<Product> {
    store
        .delete_product(owner, id)
        .await?
        .ok_or(StockError::ProductNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input(name: &str, price: f64, quantity: u32) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: None,
            price,
            quantity,
            category: Some("snacks".to_string()),
        }
    }

    #[tokio::test]
    async fn test_products_are_scoped_by_owner() {
        let store = MemoryStore::new();
        create_product(&store, "shop-a", &input("Chips", 1.5, 10)).await.unwrap();
        create_product(&store, "shop-b", &input("Soda", 2.0, 5)).await.unwrap();

        let products = list_products(&store, "shop-a").await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Chips");
    }

    #[tokio::test]
    async fn test_update_and_delete_respect_owner() {
        let store = MemoryStore::new();
        let product = create_product(&store, "shop-a", &input("Chips", 1.5, 10)).await.unwrap();

        let err = update_product(&store, "shop-b", &product.id, &input("Stolen", 0.0, 0)).await;
        assert!(matches!(err, Err(StockError::ProductNotFound)));

        let updated = update_product(&store, "shop-a", &product.id, &input("Crisps", 1.75, 8))
            .await
            .unwrap();
        assert_eq!(updated.name, "Crisps");
        assert_eq!(updated.quantity, 8);
        assert_eq!(updated.created_at, product.created_at);

        assert!(delete_product(&store, "shop-b", &product.id).await.is_err());
        delete_product(&store, "shop-a", &product.id).await.unwrap();
        assert!(list_products(&store, "shop-a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_names_are_trimmed_on_create_and_update() {
        let store = MemoryStore::new();
        let product = create_product(&store, "shop-a", &input("  Chips ", 1.5, 10)).await.unwrap();
        assert_eq!(product.name, "Chips");

        let updated = update_product(&store, "shop-a", &product.id, &input(" Crisps  ", 1.5, 10))
            .await
            .unwrap();
        assert_eq!(updated.name, "Crisps");
        assert_eq!(list_products(&store, "shop-a").await.unwrap()[0].name, "Crisps");
    }

    #[tokio::test]
    async fn test_missing_product_message() {
        let store = MemoryStore::new();
        let err = delete_product(&store, "shop-a", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Product not found");
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let store = MemoryStore::new();
        assert!(matches!(
            create_product(&store, "shop-a", &input("  ", 1.0, 1)).await,
            Err(StockError::ValidationError(_))
        ));
        assert!(matches!(
            create_product(&store, "shop-a", &input("Chips", -1.0, 1)).await,
            Err(StockError::ValidationError(_))
        ));
    }
}
