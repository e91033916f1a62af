/// Configuration management for the ninja service
///
/// Configuration is loaded once from environment variables at startup and
/// passed by reference to the components that need it.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// MongoDB configuration
    pub database: DatabaseConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// MongoDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string
    pub uri: String,
    /// Database name
    pub database: String,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|e| format!("Failed to parse PORT='{}': {}", value, e))?,
            Err(_) => 4000,
        };

        Ok(Config {
            app: AppConfig {
                host: std::env::var("NINJA_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            database: DatabaseConfig {
                uri: std::env::var("MONGO_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                database: std::env::var("MONGO_DATABASE").unwrap_or_else(|_| "ninjas".to_string()),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the PORT mutations cannot race each other.
    #[test]
    fn from_env_defaults_and_port_parsing() {
        std::env::remove_var("PORT");
        std::env::remove_var("NINJA_SERVICE_HOST");
        std::env::remove_var("MONGO_URI");
        std::env::remove_var("MONGO_DATABASE");

        let config = Config::from_env().expect("defaults load");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 4000);
        assert_eq!(config.database.uri, "mongodb://localhost:27017");
        assert_eq!(config.database.database, "ninjas");

        std::env::set_var("PORT", "9099");
        let config = Config::from_env().expect("explicit port loads");
        assert_eq!(config.app.port, 9099);

        std::env::set_var("PORT", "not-a-port");
        assert!(Config::from_env().is_err());

        std::env::remove_var("PORT");
    }
}
