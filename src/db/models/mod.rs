//! Database models
//!
//! Serde models shared between the SurrealDB store and the API surface.
//! Record links serialize as `"table:key"` strings in both directions.

pub mod order;
pub mod pet;
pub mod product;
pub mod serde_helpers;
pub mod subscription;
pub mod user;

pub use order::{Order, OrderId, OrderItem, OrderStatus, PaymentStatus};
pub use pet::{PetCreate, PetProfile, PetProfileId, PetUpdate, Species};
pub use product::{Category, PetType, Product, ProductCreate, ProductId, ProductUpdate, Review};
pub use subscription::{
    Frequency, Subscription, SubscriptionCreate, SubscriptionId, SubscriptionProduct,
    SubscriptionStatus, SubscriptionUpdate,
};
pub use user::{Address, Role, User, UserId, UserPublic};
