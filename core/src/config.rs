//! Store location loaded from environment variables with sensible defaults.

use std::env;

use crate::client::PetClient;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_RESOURCE: &str = "pets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Server root, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Collection path under the root, e.g. `pets`
    pub resource: String,
}

impl StoreConfig {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            base_url: env::var("PET_STORE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            resource: env::var("PET_STORE_RESOURCE")
                .unwrap_or_else(|_| DEFAULT_RESOURCE.to_string()),
        }
    }

    pub fn client(&self) -> PetClient {
        PetClient::new(&self.base_url, &self.resource)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
        }
    }
}
