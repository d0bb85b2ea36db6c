use crate::auth::JwtConfig;

/// Server configuration
///
/// Every knob can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATA_DIR | ./data | database and log storage |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET | (dev key) | signing secret, 32+ chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the database files and rolling logs
    pub data_dir: String,
    pub http_port: u16,
    pub jwt: JwtConfig,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
