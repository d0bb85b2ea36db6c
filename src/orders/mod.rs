//! Order engine
//!
//! The authority for price and stock truth at checkout. The client cart is
//! ephemeral and untrusted: every line is re-read from the catalog here, the
//! total is recomputed from live prices, and name/price/image are snapshotted
//! into the order so later catalog edits never change past orders.
//!
//! Validation is all-or-nothing: if any line fails, no stock is touched
//! anywhere. The actual decrement happens afterwards inside a single database
//! transaction (see `db::repository::order`).

use rust_decimal::Decimal;
use thiserror::Error;

use crate::db::models::{OrderItem, Product};

/// One requested line of a client cart: a product reference and a quantity
#[derive(Debug, Clone)]
pub struct CartLine {
    /// Product id as sent by the client (`product:key` or bare key)
    pub product_id: String,
    pub quantity: u32,
}

/// Outcome of cart validation: snapshot items plus the authoritative total
#[derive(Debug, Clone)]
pub struct ValidatedCart {
    pub items: Vec<OrderItem>,
    pub total: Decimal,
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("quantity must be at least 1 for {0}")]
    ZeroQuantity(String),

    #[error("product {0} not found")]
    ProductNotFound(String),

    #[error("insufficient stock for {name}")]
    InsufficientStock { name: String },
}

/// Validate a cart against freshly fetched catalog state.
///
/// `lines` pairs each requested line with the catalog lookup result for its
/// product (`None` when the product does not exist). No stock may be mutated
/// before this returns `Ok`.
pub fn validate_cart(lines: &[(CartLine, Option<Product>)]) -> Result<ValidatedCart, CartError> {
    if lines.is_empty() {
        return Err(CartError::EmptyCart);
    }

    let mut items = Vec::with_capacity(lines.len());
    let mut total = Decimal::ZERO;

    for (line, product) in lines {
        let product = product
            .as_ref()
            .ok_or_else(|| CartError::ProductNotFound(line.product_id.clone()))?;

        if line.quantity == 0 {
            return Err(CartError::ZeroQuantity(product.name.clone()));
        }
        if i64::from(line.quantity) > product.stock {
            return Err(CartError::InsufficientStock {
                name: product.name.clone(),
            });
        }

        let id = product
            .id
            .clone()
            .ok_or_else(|| CartError::ProductNotFound(line.product_id.clone()))?;

        total += product.price * Decimal::from(line.quantity);
        items.push(OrderItem {
            product: id,
            name: product.name.clone(),
            price: product.price,
            quantity: line.quantity,
            image: product.images.first().cloned().unwrap_or_default(),
        });
    }

    Ok(ValidatedCart { items, total })
}
