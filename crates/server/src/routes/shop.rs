use axum::{extract::{Path, Query, State}, Json};
use models::cart::{CartEntry, Checkout};
use models::product::{Product, ProductInput};
use serde::Deserialize;

use crate::errors::JsonApiError;
use crate::routes::AppState;

/// `?product_id=&qty=`; `quantity=` is accepted too.
#[derive(Debug, Deserialize)]
pub struct AddQuery {
    pub product_id: i64,
    #[serde(alias = "quantity")]
    pub qty: i64,
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    Ok(Json(state.shop.list_products().await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.shop.create_product(input).await?))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Query(q): Query<AddQuery>,
) -> Result<Json<CartEntry>, JsonApiError> {
    Ok(Json(state.shop.add_to_cart(q.product_id, q.qty).await?))
}

pub async fn list_cart(State(state): State<AppState>) -> Result<Json<Vec<CartEntry>>, JsonApiError> {
    Ok(Json(state.shop.cart_entries().await?))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(product_id): Path<u32>,
) -> Result<Json<CartEntry>, JsonApiError> {
    Ok(Json(state.shop.remove_from_cart(product_id).await?))
}

pub async fn checkout(State(state): State<AppState>) -> Result<Json<Checkout>, JsonApiError> {
    Ok(Json(state.shop.checkout().await?))
}
