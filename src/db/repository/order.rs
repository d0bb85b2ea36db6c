//! Order repository
//!
//! Order placement commits as one database transaction: every line's stock
//! decrement is conditional (`WHERE stock >= quantity`) and a failed line
//! THROWs, aborting the whole transaction. Two concurrent checkouts for the
//! same product cannot drive stock negative; the loser surfaces as
//! insufficient stock.

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Address, Order, OrderStatus, PaymentStatus};
use crate::orders::{CartError, CartLine, validate_cart};
use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "order";
const PRODUCT_TABLE: &str = "product";

const THROW_INSUFFICIENT: &str = "insufficient stock";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Place an order: validate every line against live catalog state, then
    /// decrement stock and create the order atomically.
    ///
    /// Client-supplied prices and names are never trusted; the snapshot is
    /// taken from the catalog re-read. A failed line mutates nothing.
    pub async fn place(
        &self,
        user: RecordId,
        lines: Vec<CartLine>,
        shipping_address: Address,
    ) -> RepoResult<Order> {
        // Phase 1: re-read and validate all lines before touching any stock
        let mut fetched = Vec::with_capacity(lines.len());
        for line in lines {
            let product: Option<crate::db::models::Product> = self
                .base
                .db()
                .select((PRODUCT_TABLE, record_key(PRODUCT_TABLE, &line.product_id)))
                .await?;
            fetched.push((line, product));
        }
        let cart = validate_cart(&fetched)?;

        let order = Order {
            id: None,
            user: user.clone(),
            items: cart.items,
            total_amount: cart.total,
            shipping_address,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            tracking_number: None,
            created_at: Utc::now(),
        };

        // Phase 2: conditional decrements + order creation, all-or-nothing.
        // The WHERE guard re-checks stock inside the transaction, so the
        // phase-1 validation cannot be raced by a concurrent checkout.
        let order_key = uuid::Uuid::new_v4().simple().to_string();
        let mut sql = String::from("BEGIN TRANSACTION;\n");
        for i in 0..order.items.len() {
            sql.push_str(&format!(
                "LET $hit{i} = (UPDATE $product{i} SET stock -= $qty{i} WHERE stock >= $qty{i});\n\
                 IF array::len($hit{i}) == 0 {{ THROW \"{THROW_INSUFFICIENT}\" }};\n"
            ));
        }
        sql.push_str(
            "LET $created = (CREATE ONLY type::thing('order', $order_key) CONTENT $order);\n\
             UPDATE $user SET orders += $created.id;\n\
             COMMIT TRANSACTION;",
        );

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("order_key", order_key.clone()))
            .bind(("order", order.clone()))
            .bind(("user", user));
        for (i, item) in order.items.iter().enumerate() {
            query = query
                .bind((format!("product{i}"), item.product.clone()))
                .bind((format!("qty{i}"), i64::from(item.quantity)));
        }

        let response = query.await?;
        if let Err(e) = response.check() {
            let msg = e.to_string();
            if msg.contains(THROW_INSUFFICIENT) {
                // raced by a concurrent checkout between phases
                return Err(RepoError::InsufficientStock(
                    order
                        .items
                        .first()
                        .map(|i| i.name.clone())
                        .unwrap_or_default(),
                ));
            }
            return Err(RepoError::Database(msg));
        }

        let created: Option<Order> = self.base.db().select((ORDER_TABLE, order_key)).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Orders owned by a user, newest first
    pub async fn find_by_user(&self, user: RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            // `order` is a reserved word in SurrealQL, hence the escape.
            // Record refs are stored in string form, so the bind is a string.
            .query("SELECT * FROM type::table('order') WHERE user = $user ORDER BY createdAt DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self
            .base
            .db()
            .select((ORDER_TABLE, record_key(ORDER_TABLE, id)))
            .await?;
        Ok(order)
    }

    /// All orders, newest first (admin)
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM type::table('order') ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Admin status override, validated against the order state machine
    pub async fn update_status(
        &self,
        id: &str,
        target: OrderStatus,
        tracking_number: Option<String>,
    ) -> RepoResult<Order> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        if !current.status.can_transition_to(target) {
            return Err(RepoError::Validation(format!(
                "Illegal status transition: {} -> {}",
                current.status, target
            )));
        }

        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct StatusPatch {
            status: OrderStatus,
            #[serde(skip_serializing_if = "Option::is_none")]
            tracking_number: Option<String>,
        }

        let updated: Option<Order> = self
            .base
            .db()
            .update((ORDER_TABLE, record_key(ORDER_TABLE, id)))
            .merge(StatusPatch {
                status: target,
                tracking_number,
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn count(&self) -> RepoResult<u64> {
        super::user::count_table(self.base.db(), ORDER_TABLE).await
    }
}

impl From<CartError> for RepoError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::EmptyCart => RepoError::Validation("Cart is empty".to_string()),
            CartError::ZeroQuantity(name) => {
                RepoError::Validation(format!("Quantity must be at least 1 for {name}"))
            }
            CartError::ProductNotFound(id) => RepoError::ProductNotFound(id),
            CartError::InsufficientStock { name } => RepoError::InsufficientStock(name),
        }
    }
}
