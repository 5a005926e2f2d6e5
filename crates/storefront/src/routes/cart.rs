//! Cart route handlers.
//!
//! Every handler follows the same shape: load the session cart through the
//! explicit [`SessionCart`] store, mutate the in-memory state, persist the
//! full line sequence, then respond with the updated cart. Mutations are
//! serialized per session because each handler runs to completion before
//! the session's next request is processed.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cordwain_core::{CartLine, CartState, ProductId};

use crate::cart::SessionCart;
use crate::error::Result;
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineRequest {
    pub product_id: i64,
    pub quantity: Option<u32>,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Set-quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    pub product_id: i64,
    pub quantity: u32,
}

/// Update-options request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOptionsRequest {
    pub product_id: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Remove-line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveLineRequest {
    pub product_id: i64,
}

/// Cart count badge payload.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Current cart with totals.
#[instrument(skip(cart_store))]
pub async fn show(cart_store: SessionCart) -> Json<CartState> {
    Json(cart_store.load().await)
}

/// Add an item to the cart.
///
/// The product is fetched from the commerce API so the line carries the
/// server's name, price, and imagery; only quantity and variant options come
/// from the client. Stock availability is not checked here (the commerce API
/// validates it at order submission).
#[instrument(skip(state, cart_store))]
pub async fn add(
    State(state): State<AppState>,
    cart_store: SessionCart,
    Json(request): Json<AddLineRequest>,
) -> Result<Json<CartState>> {
    let product = state
        .commerce()
        .get_product(ProductId::new(request.product_id))
        .await?;

    let mut cart = cart_store.load().await;
    cart.add_line(CartLine {
        product_id: product.id,
        name: product.name,
        unit_price: product.price,
        original_price: product.original_price,
        image_ref: product.image_ref,
        category: product.category,
        quantity: request.quantity.unwrap_or(1),
        size: request.size,
        color: request.color,
        material: product.material,
    });
    cart_store.save(&cart).await?;

    Ok(Json(cart))
}

/// Set the quantity of a product's lines. Zero removes them.
#[instrument(skip(cart_store))]
pub async fn update(
    cart_store: SessionCart,
    Json(request): Json<SetQuantityRequest>,
) -> Result<Json<CartState>> {
    let mut cart = cart_store.load().await;
    cart.set_quantity(ProductId::new(request.product_id), request.quantity);
    cart_store.save(&cart).await?;

    Ok(Json(cart))
}

/// Update size/color on the first line of a product.
#[instrument(skip(cart_store))]
pub async fn options(
    cart_store: SessionCart,
    Json(request): Json<UpdateOptionsRequest>,
) -> Result<Json<CartState>> {
    let mut cart = cart_store.load().await;
    cart.update_options(
        ProductId::new(request.product_id),
        request.size,
        request.color,
    );
    cart_store.save(&cart).await?;

    Ok(Json(cart))
}

/// Remove all lines for a product id.
#[instrument(skip(cart_store))]
pub async fn remove(
    cart_store: SessionCart,
    Json(request): Json<RemoveLineRequest>,
) -> Result<Json<CartState>> {
    let mut cart = cart_store.load().await;
    cart.remove_line(ProductId::new(request.product_id));
    cart_store.save(&cart).await?;

    Ok(Json(cart))
}

/// Empty the cart.
#[instrument(skip(cart_store))]
pub async fn clear(cart_store: SessionCart) -> Result<Json<CartState>> {
    let mut cart = cart_store.load().await;
    cart.clear();
    cart_store.save(&cart).await?;

    Ok(Json(cart))
}

/// Item count badge.
#[instrument(skip(cart_store))]
pub async fn count(cart_store: SessionCart) -> Json<CartCount> {
    let cart = cart_store.load().await;
    Json(CartCount {
        count: cart.total_items(),
    })
}
