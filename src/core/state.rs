use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtConfig, JwtService};
use crate::core::Config;
use crate::db::DbService;

/// Shared server state
///
/// Cloned into every handler; all fields are cheap to clone (the database
/// handle and JWT service are reference-counted internally).
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize state for the real server: ensure the data directory
    /// exists and open the on-disk database.
    ///
    /// # Panics
    ///
    /// Panics when the data directory cannot be created or the database
    /// fails to open; the server cannot run without either.
    pub async fn initialize(config: &Config) -> Self {
        let data_dir = PathBuf::from(&config.data_dir);
        std::fs::create_dir_all(&data_dir).expect("Failed to create data directory");

        let db_path = data_dir.join("pawcart.db");
        let db = DbService::open(&db_path)
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), db, jwt_service)
    }

    /// In-memory state for tests
    pub async fn for_tests(jwt: JwtConfig) -> Self {
        let db = DbService::memory()
            .await
            .expect("Failed to open in-memory database");
        let config = Config {
            data_dir: String::new(),
            http_port: 0,
            jwt: jwt.clone(),
            environment: "test".to_string(),
        };
        Self::new(config, db, Arc::new(JwtService::with_config(jwt)))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
