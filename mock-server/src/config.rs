//! Server settings loaded from environment variables with sensible defaults.

use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind, built from `PORT`
    pub bind_addr: String,
    /// Default filter when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        Self {
            bind_addr: format!("127.0.0.1:{port}"),
            log_level: env::var("PET_STORE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_and_port_from_env() {
        env::remove_var("PORT");
        env::remove_var("PET_STORE_LOG_LEVEL");
        let config = ServerConfig::from_env();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");

        env::set_var("PORT", "9090");
        env::set_var("PET_STORE_LOG_LEVEL", "mock_server=debug");
        let config = ServerConfig::from_env();
        env::remove_var("PORT");
        env::remove_var("PET_STORE_LOG_LEVEL");

        assert_eq!(config.bind_addr, "127.0.0.1:9090");
        assert_eq!(config.log_level, "mock_server=debug");
    }
}
