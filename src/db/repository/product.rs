//! Product repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Category, PetType, Product, ProductCreate, ProductUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

/// Catalog browse filters; all optional, combined with AND
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub pet_type: Option<PetType>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Browse the catalog, newest first
    pub async fn find_filtered(&self, filter: ProductFilter) -> RepoResult<Vec<Product>> {
        let mut clauses: Vec<&str> = Vec::new();

        if filter.category.is_some() {
            clauses.push("category = $category");
        }
        // the 'all' wildcard on a product matches every pet-type filter,
        // and filtering by 'all' itself means no filter
        let pet_type = filter.pet_type.filter(|pt| *pt != PetType::All);
        if pet_type.is_some() {
            clauses.push("($petType IN petType OR 'all' IN petType)");
        }
        if filter.featured.is_some() {
            clauses.push("featured = $featured");
        }
        if filter.search.is_some() {
            clauses.push(
                "(string::contains(string::lowercase(name), $search) \
                 OR string::contains(string::lowercase(description), $search) \
                 OR (brand != NONE AND string::contains(string::lowercase(brand), $search)))",
            );
        }

        let mut sql = String::from("SELECT * FROM product");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY createdAt DESC");

        let mut query = self.base.db().query(sql);
        if let Some(category) = filter.category {
            query = query.bind(("category", category));
        }
        if let Some(pet_type) = pet_type {
            query = query.bind(("petType", pet_type));
        }
        if let Some(featured) = filter.featured {
            query = query.bind(("featured", featured));
        }
        if let Some(search) = filter.search {
            query = query.bind(("search", search.to_lowercase()));
        }

        let products: Vec<Product> = query.await?.take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self
            .base
            .db()
            .select((PRODUCT_TABLE, record_key(PRODUCT_TABLE, id)))
            .await?;
        Ok(product)
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(Product::from_create(data))
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Partial update; absent fields are left untouched
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let updated: Option<Product> = self
            .base
            .db()
            .update((PRODUCT_TABLE, record_key(PRODUCT_TABLE, id)))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let deleted: Option<Product> = self
            .base
            .db()
            .delete((PRODUCT_TABLE, record_key(PRODUCT_TABLE, id)))
            .await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }

    pub async fn count(&self) -> RepoResult<u64> {
        super::user::count_table(self.base.db(), PRODUCT_TABLE).await
    }
}
