//! User repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Address, Role, User};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new account with an already-hashed credential
    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        phone: Option<String>,
        address: Option<Address>,
        role: Role,
    ) -> RepoResult<User> {
        let user = User {
            id: None,
            name,
            email: email.to_lowercase(),
            password_hash,
            phone,
            address,
            role,
            loyalty_points: 0,
            pets: vec![],
            subscriptions: vec![],
            orders: vec![],
            created_at: Utc::now(),
        };

        let created: Option<User> = self
            .base
            .db()
            .create(USER_TABLE)
            .content(user)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                // unique index violation surfaces as a business conflict
                if msg.contains("idx_user_email") {
                    RepoError::Conflict("Email already registered".to_string())
                } else {
                    RepoError::Database(msg)
                }
            })?;

        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_lowercase()))
            .await?;
        let user: Option<User> = result.take(0)?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self
            .base
            .db()
            .select((USER_TABLE, record_key(USER_TABLE, id)))
            .await?;
        Ok(user)
    }

    /// All users, newest first (admin)
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn count(&self) -> RepoResult<u64> {
        count_table(self.base.db(), USER_TABLE).await
    }
}

/// `count()` over a whole table
pub(crate) async fn count_table(db: &Surreal<Db>, table: &str) -> RepoResult<u64> {
    #[derive(serde::Deserialize)]
    struct Count {
        count: u64,
    }

    let mut result = db
        .query("SELECT count() AS count FROM type::table($table) GROUP ALL")
        .bind(("table", table.to_string()))
        .await?;
    let row: Option<Count> = result.take(0)?;
    Ok(row.map(|r| r.count).unwrap_or(0))
}
