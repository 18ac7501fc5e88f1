use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::normalize::required;

/// Catalog entry. Prices are kept as given; rounding only happens on totals.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductInput {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

impl ProductInput {
    pub fn validate(self) -> Result<Product, ModelError> {
        let id = product_id(self.id)?;
        let name = required("name", &self.name)?;
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ModelError::invalid("price", "must be positive"));
        }
        Ok(Product { id, name, price: self.price })
    }
}

impl Product {
    /// Collection key of this product.
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}

pub fn product_id(raw: i64) -> Result<u32, ModelError> {
    if raw <= 0 {
        return Err(ModelError::invalid("id", "product id must be positive"));
    }
    u32::try_from(raw).map_err(|_| ModelError::invalid("id", "product id out of range"))
}
