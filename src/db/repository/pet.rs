//! Pet profile repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{PetCreate, PetProfile, PetUpdate};
use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const PET_TABLE: &str = "pet_profile";

#[derive(Clone)]
pub struct PetRepository {
    base: BaseRepository,
}

impl PetRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, user: RecordId, data: PetCreate) -> RepoResult<PetProfile> {
        let pet = PetProfile {
            id: None,
            user: user.clone(),
            name: data.name,
            species: data.species,
            breed: data.breed,
            age: data.age,
            weight: data.weight,
            dietary_preferences: data.dietary_preferences.unwrap_or_default(),
            allergies: data.allergies.unwrap_or_default(),
            special_needs: data.special_needs,
            created_at: Utc::now(),
        };

        let created: Option<PetProfile> =
            self.base.db().create(PET_TABLE).content(pet).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create pet profile".to_string()))?;

        if let Some(id) = &created.id {
            self.base
                .db()
                .query("UPDATE $user SET pets += $id")
                .bind(("user", user))
                .bind(("id", id.clone()))
                .await?;
        }

        Ok(created)
    }

    pub async fn find_by_user(&self, user: RecordId) -> RepoResult<Vec<PetProfile>> {
        let pets: Vec<PetProfile> = self
            .base
            .db()
            // record refs are stored in string form, so the bind is a string
            .query("SELECT * FROM pet_profile WHERE user = $user ORDER BY createdAt DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(pets)
    }

    pub async fn find_owned(&self, id: &str, user: RecordId) -> RepoResult<Option<PetProfile>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM pet_profile WHERE id = $id AND user = $user")
            .bind(("id", record_id(PET_TABLE, id)))
            .bind(("user", user.to_string()))
            .await?;
        let pet: Option<PetProfile> = result.take(0)?;
        Ok(pet)
    }

    pub async fn update_owned(
        &self,
        id: &str,
        user: RecordId,
        data: PetUpdate,
    ) -> RepoResult<PetProfile> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $id MERGE $data WHERE user = $user RETURN AFTER")
            .bind(("id", record_id(PET_TABLE, id)))
            .bind(("user", user.to_string()))
            .bind(("data", data))
            .await?;
        let updated: Option<PetProfile> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Pet profile {} not found", id)))
    }

    pub async fn delete_owned(&self, id: &str, user: RecordId) -> RepoResult<()> {
        let mut result = self
            .base
            .db()
            .query("DELETE $id WHERE user = $user RETURN BEFORE")
            .bind(("id", record_id(PET_TABLE, id)))
            .bind(("user", user.to_string()))
            .await?;
        let deleted: Option<PetProfile> = result.take(0)?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Pet profile {} not found", id)));
        }
        Ok(())
    }
}
