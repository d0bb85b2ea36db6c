//! Database module
//!
//! Embedded SurrealDB: RocksDB on disk for the server, in-memory engine for
//! tests. Five tables: `user`, `product`, `order`, `subscription`,
//! `pet_profile`.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "pawcart";
const DATABASE: &str = "store";

/// Database bootstrap
pub struct DbService;

impl DbService {
    /// Open (or create) the on-disk database
    pub async fn open(path: &Path) -> Result<Surreal<Db>, AppError> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::prepare(&db).await?;
        tracing::info!(path = %path.display(), "database opened (RocksDB)");
        Ok(db)
    }

    /// Open a fresh in-memory database (tests)
    pub async fn memory() -> Result<Surreal<Db>, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::prepare(&db).await?;
        Ok(db)
    }

    async fn prepare(db: &Surreal<Db>) -> Result<(), AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        // Email uniqueness is enforced by the store, not application code
        db.query("DEFINE INDEX IF NOT EXISTS idx_user_email ON TABLE user FIELDS email UNIQUE")
            .await
            .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;

        Ok(())
    }
}
