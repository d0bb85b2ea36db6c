//! Repository module
//!
//! Per-table CRUD over the embedded SurrealDB handle. Ownership scoping for
//! non-admin callers lives here: owned-entity lookups always combine the
//! record id with the owning user reference.

pub mod order;
pub mod pet;
pub mod product;
pub mod subscription;
pub mod user;

pub use order::OrderRepository;
pub use pet::PetRepository;
pub use product::ProductRepository;
pub use subscription::SubscriptionRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal, engine::local::Db};
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Insufficient stock for {0}")]
    InsufficientStock(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::ProductNotFound(id) => AppError::ProductNotFound(id),
            RepoError::InsufficientStock(name) => AppError::InsufficientStock(name),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Strip a `table:` prefix if the caller sent the full record string.
/// Keys that display with `⟨⟩` escaping lose the brackets as well.
pub(crate) fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    let key = id
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id);
    key.strip_prefix('⟨')
        .and_then(|k| k.strip_suffix('⟩'))
        .unwrap_or(key)
}

/// Build a `RecordId` from a client-supplied id in either form
pub(crate) fn record_id(table: &str, id: &str) -> RecordId {
    RecordId::from_table_key(table, record_key(table, id))
}

/// Base repository with the shared database handle
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_accepts_both_forms() {
        assert_eq!(record_key("product", "product:abc"), "abc");
        assert_eq!(record_key("product", "abc"), "abc");
        // a foreign prefix is treated as a bare key
        assert_eq!(record_key("product", "order:abc"), "order:abc");
        // escaped display form round-trips
        assert_eq!(record_key("order", "order:⟨3fa9⟩"), "3fa9");
    }
}
