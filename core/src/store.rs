//! One call per remote operation: build, execute, parse.

use crate::client::PetClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::Pet;

/// `PetClient` paired with a `Transport`.
///
/// Every method performs exactly one round trip and blocks until it
/// completes or fails.
#[derive(Debug, Clone)]
pub struct StoreClient<T> {
    client: PetClient,
    transport: T,
}

impl<T: Transport> StoreClient<T> {
    pub fn new(client: PetClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PetClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list(&self) -> Result<Vec<Pet>, ApiError> {
        let req = self.client.build_list_pets();
        tracing::debug!(path = %req.path, "listing pets");
        self.client.parse_list_pets(self.transport.execute(req)?)
    }

    pub fn get(&self, id: i64) -> Result<Pet, ApiError> {
        let req = self.client.build_get_pet(id);
        self.client.parse_get_pet(self.transport.execute(req)?)
    }

    pub fn create(&self, draft: &Pet) -> Result<Pet, ApiError> {
        let req = self.client.build_create_pet(draft)?;
        tracing::debug!(path = %req.path, name = %draft.name, "creating pet");
        self.client.parse_create_pet(self.transport.execute(req)?)
    }

    pub fn bulk_create(&self, drafts: &[Pet]) -> Result<Vec<Pet>, ApiError> {
        let req = self.client.build_bulk_create_pets(drafts)?;
        tracing::debug!(path = %req.path, count = drafts.len(), "bulk creating pets");
        self.client.parse_bulk_create_pets(self.transport.execute(req)?)
    }

    pub fn update(&self, pet: &Pet) -> Result<Pet, ApiError> {
        let req = self.client.build_update_pet(pet)?;
        tracing::debug!(path = %req.path, "updating pet");
        self.client.parse_update_pet(self.transport.execute(req)?)
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        let req = self.client.build_delete_pet(id);
        tracing::debug!(path = %req.path, "deleting pet");
        self.client.parse_delete_pet(self.transport.execute(req)?)
    }

    pub fn search(&self, keyword: &str) -> Result<Vec<Pet>, ApiError> {
        let req = self.client.build_search_pets(keyword);
        self.client.parse_search_pets(self.transport.execute(req)?)
    }

    pub fn search_by_price(&self, max_price: f64) -> Result<Vec<Pet>, ApiError> {
        let req = self.client.build_search_by_price(max_price);
        self.client.parse_search_pets(self.transport.execute(req)?)
    }
}
