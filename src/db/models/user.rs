//! User model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type UserId = RecordId;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

/// Embedded shipping/billing address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// User record
///
/// `password_hash` is part of the stored record; use [`User::public`] for
/// anything that leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub role: Role,
    #[serde(default)]
    pub loyalty_points: i64,
    /// Denormalized convenience back-references, appended on create
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub pets: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub subscriptions: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub orders: Vec<RecordId>,
    pub created_at: DateTime<Utc>,
}

/// User as it appears in API responses: everything except the credential hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub role: Role,
    pub loyalty_points: i64,
    pub pets: Vec<String>,
    pub subscriptions: Vec<String>,
    pub orders: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Strip the credential hash for output
    pub fn public(self) -> UserPublic {
        UserPublic {
            id: self.id.as_ref().map(|id| id.to_string()),
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            role: self.role,
            loyalty_points: self.loyalty_points,
            pets: self.pets.iter().map(|p| p.to_string()).collect(),
            subscriptions: self.subscriptions.iter().map(|s| s.to_string()).collect(),
            orders: self.orders.iter().map(|o| o.to_string()).collect(),
            created_at: self.created_at,
        }
    }

    /// Verify a candidate password against the stored argon2 hash
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password with argon2 and a fresh salt
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_roundtrip() {
        let hash = User::hash_password("hunter22!").expect("hashing failed");
        let user = User {
            id: None,
            name: "Jo".into(),
            email: "jo@example.com".into(),
            password_hash: hash,
            phone: None,
            address: None,
            role: Role::Customer,
            loyalty_points: 0,
            pets: vec![],
            subscriptions: vec![],
            orders: vec![],
            created_at: Utc::now(),
        };
        assert!(user.verify_password("hunter22!").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn public_view_has_no_hash() {
        let user = User {
            id: None,
            name: "Jo".into(),
            email: "jo@example.com".into(),
            password_hash: "$argon2id$fake".into(),
            phone: None,
            address: None,
            role: Role::Admin,
            loyalty_points: 5,
            pets: vec![],
            subscriptions: vec![],
            orders: vec![],
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(user.public()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "admin");
    }
}
