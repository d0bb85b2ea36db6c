//! Pawcart - pet-care storefront backend
//!
//! HTTP/JSON API for a pet-care e-commerce storefront: product catalog,
//! order placement with stock reservation, recurring subscription boxes,
//! pet profiles, user accounts and an admin back office.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/           # config, state, server
//! ├── auth/           # JWT service, extractor, admin gate
//! ├── api/            # HTTP routes and handlers
//! ├── db/             # embedded SurrealDB, models, repositories
//! ├── orders/         # cart validation and order math
//! ├── subscriptions/  # delivery-date arithmetic
//! └── utils/          # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod subscriptions;
pub mod utils;

// Re-export the public surface
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};
