//! Subscription repository
//!
//! All single-record operations are owner-scoped: the lookup combines the
//! record id with the owning user, so "absent" and "not yours" both come
//! back as not-found.

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{
    Subscription, SubscriptionCreate, SubscriptionStatus, SubscriptionUpdate,
};
use crate::subscriptions::next_delivery_date;
use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const SUBSCRIPTION_TABLE: &str = "subscription";
const PET_TABLE: &str = "pet_profile";

#[derive(Clone)]
pub struct SubscriptionRepository {
    base: BaseRepository,
}

impl SubscriptionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create an active subscription; the next delivery date is derived from
    /// the frequency at creation time.
    pub async fn create(&self, user: RecordId, data: SubscriptionCreate) -> RepoResult<Subscription> {
        let now = Utc::now();
        let subscription = Subscription {
            id: None,
            user: user.clone(),
            pet_profile: data
                .pet_profile_id
                .as_deref()
                .map(|id| record_id(PET_TABLE, id)),
            plan_name: data.plan_name,
            products: data.products.unwrap_or_default(),
            frequency: data.frequency,
            price: data.price,
            status: SubscriptionStatus::Active,
            next_delivery_date: Some(next_delivery_date(data.frequency, now)),
            last_delivery_date: None,
            created_at: now,
        };

        let created: Option<Subscription> = self
            .base
            .db()
            .create(SUBSCRIPTION_TABLE)
            .content(subscription)
            .await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create subscription".to_string()))?;

        if let Some(id) = &created.id {
            self.base
                .db()
                .query("UPDATE $user SET subscriptions += $id")
                .bind(("user", user))
                .bind(("id", id.clone()))
                .await?;
        }

        Ok(created)
    }

    /// Subscriptions owned by a user
    pub async fn find_by_user(&self, user: RecordId) -> RepoResult<Vec<Subscription>> {
        let subscriptions: Vec<Subscription> = self
            .base
            .db()
            // record refs are stored in string form, so the bind is a string
            .query("SELECT * FROM subscription WHERE user = $user ORDER BY createdAt DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(subscriptions)
    }

    /// Combined id + owner lookup
    pub async fn find_owned(&self, id: &str, user: RecordId) -> RepoResult<Option<Subscription>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM subscription WHERE id = $id AND user = $user")
            .bind(("id", record_id(SUBSCRIPTION_TABLE, id)))
            .bind(("user", user.to_string()))
            .await?;
        let subscription: Option<Subscription> = result.take(0)?;
        Ok(subscription)
    }

    /// Owner-scoped partial update; status changes are validated against the
    /// subscription state machine.
    pub async fn update_owned(
        &self,
        id: &str,
        user: RecordId,
        data: SubscriptionUpdate,
    ) -> RepoResult<Subscription> {
        let current = self
            .find_owned(id, user.clone())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Subscription {} not found", id)))?;

        if let Some(target) = data.status {
            if !current.status.can_transition_to(target) {
                return Err(RepoError::Validation(format!(
                    "Illegal status transition: {} -> {}",
                    current.status, target
                )));
            }
        }

        let mut result = self
            .base
            .db()
            .query("UPDATE $id MERGE $data WHERE user = $user RETURN AFTER")
            .bind(("id", record_id(SUBSCRIPTION_TABLE, id)))
            .bind(("user", user.to_string()))
            .bind(("data", data))
            .await?;
        let updated: Option<Subscription> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Subscription {} not found", id)))
    }

    /// Owner-scoped delete; returns not-found for both absent and not-owned
    pub async fn delete_owned(&self, id: &str, user: RecordId) -> RepoResult<()> {
        let mut result = self
            .base
            .db()
            .query("DELETE $id WHERE user = $user RETURN BEFORE")
            .bind(("id", record_id(SUBSCRIPTION_TABLE, id)))
            .bind(("user", user.to_string()))
            .await?;
        let deleted: Option<Subscription> = result.take(0)?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Subscription {} not found", id)));
        }
        Ok(())
    }
}
