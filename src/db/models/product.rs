//! Product model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::{Validate, ValidationError};

pub type ProductId = RecordId;

/// Catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Toys,
    Grooming,
    Health,
    Accessories,
    Treats,
}

/// Pet-type tag; `All` is the wildcard that matches every filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PetType {
    Dog,
    Cat,
    Bird,
    SmallAnimal,
    All,
}

/// Embedded customer review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<RecordId>,
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Product record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default = "default_pet_type")]
    pub pet_type: Vec<PetType>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub subscription_eligible: bool,
    pub created_at: DateTime<Utc>,
}

fn default_pet_type() -> Vec<PetType> {
    vec![PetType::All]
}

/// Create payload (admin)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[validate(custom(function = "validate_positive_price"))]
    pub price: Decimal,
    pub category: Category,
    pub subcategory: Option<String>,
    pub pet_type: Option<Vec<PetType>>,
    pub images: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub stock: Option<i64>,
    pub sku: Option<String>,
    pub brand: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f32>,
    pub featured: Option<bool>,
    pub subscription_eligible: Option<bool>,
}

/// Partial update payload (admin); absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(custom(function = "validate_positive_price_opt"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<Vec<PetType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[validate(range(min = 0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_eligible: Option<bool>,
}

fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        return Err(ValidationError::new("price_not_positive"));
    }
    Ok(())
}

fn validate_positive_price_opt(price: &Decimal) -> Result<(), ValidationError> {
    validate_positive_price(price)
}

impl Product {
    pub fn from_create(data: ProductCreate) -> Self {
        Self {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            subcategory: data.subcategory,
            pet_type: data.pet_type.unwrap_or_else(default_pet_type),
            images: data.images.unwrap_or_default(),
            stock: data.stock.unwrap_or(0),
            sku: data.sku,
            brand: data.brand,
            rating: data.rating.unwrap_or(0.0),
            reviews: vec![],
            featured: data.featured.unwrap_or(false),
            subscription_eligible: data.subscription_eligible.unwrap_or(false),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_payload(price: Decimal) -> ProductCreate {
        ProductCreate {
            name: "Salmon Bites".into(),
            description: "Crunchy treats".into(),
            price,
            category: Category::Treats,
            subcategory: None,
            pet_type: None,
            images: None,
            stock: Some(3),
            sku: None,
            brand: None,
            rating: None,
            featured: None,
            subscription_eligible: None,
        }
    }

    #[test]
    fn price_must_be_positive() {
        assert!(create_payload(dec!(9.99)).validate().is_ok());
        assert!(create_payload(dec!(0)).validate().is_err());
        assert!(create_payload(dec!(-1.50)).validate().is_err());
    }

    #[test]
    fn wildcard_pet_type_is_the_default() {
        let product = Product::from_create(create_payload(dec!(9.99)));
        assert_eq!(product.pet_type, vec![PetType::All]);
        assert_eq!(product.stock, 3);
    }

    #[test]
    fn enum_wire_names() {
        assert_eq!(
            serde_json::to_value(PetType::SmallAnimal).unwrap(),
            "small-animal"
        );
        assert_eq!(serde_json::to_value(Category::Food).unwrap(), "food");
    }
}
