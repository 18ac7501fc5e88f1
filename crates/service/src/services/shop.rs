use models::cart::{self, CartEntry, Checkout};
use models::product::{Product, ProductInput};
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::storage::Collection;

/// Product catalog (`products.json`) and cart (`cart.json`).
pub struct ShopService {
    products: Collection<Product>,
    cart: Collection<CartEntry>,
}

impl ShopService {
    pub fn new(products: Collection<Product>, cart: Collection<CartEntry>) -> Self {
        Self { products, cart }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.read_all().await?.into_values().collect())
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let product = input.validate()?;
        let key = product.key();
        self.products
            .update_map(|map| {
                if map.contains_key(&key) {
                    return Err(ServiceError::conflict("product", &key));
                }
                map.insert(key.clone(), product.clone());
                Ok(())
            })
            .await?;
        info!(product_id = product.id, "product created");
        Ok(product)
    }

    /// Add `quantity` units of a catalog product, merging with an existing line.
    /// An unknown product is reported before a bad quantity.
    pub async fn add_to_cart(&self, product_id: i64, quantity: i64) -> Result<CartEntry, ServiceError> {
        let snapshot = self
            .products
            .read_all()
            .await?
            .remove(&product_id.to_string())
            .ok_or_else(|| {
                warn!(product_id, "unknown product");
                ServiceError::NotFound(format!("product {product_id} does not exist"))
            })?;
        let quantity = cart::quantity(quantity)?;
        let id = snapshot.id;
        let key = id.to_string();

        let entry = self
            .cart
            .update_map(|map| {
                match map.get_mut(&key) {
                    Some(line) => line.increase(quantity)?,
                    None => {
                        map.insert(key.clone(), CartEntry::new(snapshot, quantity));
                    }
                }
                Ok(map[&key].clone())
            })
            .await?;
        info!(product_id = id, quantity = entry.quantity, "cart updated");
        Ok(entry)
    }

    pub async fn cart_entries(&self) -> Result<Vec<CartEntry>, ServiceError> {
        Ok(self.cart.read_all().await?.into_values().collect())
    }

    pub async fn remove_from_cart(&self, product_id: u32) -> Result<CartEntry, ServiceError> {
        let key = product_id.to_string();
        let removed = self
            .cart
            .update_map(|map| map.remove(&key).ok_or_else(|| ServiceError::not_found("cart item", &key)))
            .await?;
        info!(product_id, "cart item removed");
        Ok(removed)
    }

    /// Price the cart without changing it.
    pub async fn checkout(&self) -> Result<Checkout, ServiceError> {
        let entries = self.cart.read_all().await?;
        Ok(cart::checkout(entries.values()))
    }
}
