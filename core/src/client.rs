//! Stateless HTTP request builder and response parser for the pet API.
//!
//! # Design
//! `PetClient` holds only the resource endpoint and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Every `parse_*` runs the response through `check_status`
//! before touching the body, so a non-2xx reply never decodes as a record.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Pet;

/// Synchronous, stateless client for the pet API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct PetClient {
    endpoint: String,
}

impl PetClient {
    /// `base_url` is the server root, `resource` the collection path under it.
    pub fn new(base_url: &str, resource: &str) -> Self {
        Self {
            endpoint: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                resource.trim_matches('/')
            ),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_list_pets(&self) -> HttpRequest {
        get(self.endpoint.clone())
    }

    pub fn build_get_pet(&self, id: i64) -> HttpRequest {
        get(format!("{}/{id}", self.endpoint))
    }

    /// Any id on `draft` is stripped; the store assigns ids.
    pub fn build_create_pet(&self, draft: &Pet) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.endpoint.clone(), &draft.without_id())
    }

    pub fn build_bulk_create_pets(&self, drafts: &[Pet]) -> Result<HttpRequest, ApiError> {
        let drafts: Vec<Pet> = drafts.iter().map(Pet::without_id).collect();
        json_request(HttpMethod::Post, format!("{}/bulk", self.endpoint), &drafts)
    }

    pub fn build_update_pet(&self, pet: &Pet) -> Result<HttpRequest, ApiError> {
        let id = pet.id.ok_or(ApiError::MissingId)?;
        json_request(HttpMethod::Put, format!("{}/{id}", self.endpoint), pet)
    }

    pub fn build_delete_pet(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.endpoint),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_search_pets(&self, keyword: &str) -> HttpRequest {
        get(format!(
            "{}/search/{}",
            self.endpoint,
            urlencoding::encode(keyword)
        ))
    }

    pub fn build_search_by_price(&self, max_price: f64) -> HttpRequest {
        get(format!("{}/search/price/{max_price}", self.endpoint))
    }

    pub fn parse_list_pets(&self, response: HttpResponse) -> Result<Vec<Pet>, ApiError> {
        decode(response)
    }

    pub fn parse_get_pet(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        decode(response)
    }

    pub fn parse_create_pet(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        decode(response)
    }

    pub fn parse_bulk_create_pets(&self, response: HttpResponse) -> Result<Vec<Pet>, ApiError> {
        decode(response)
    }

    pub fn parse_update_pet(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        decode(response)
    }

    /// The body of a successful delete is informational and ignored.
    pub fn parse_delete_pet(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_search_pets(&self, response: HttpResponse) -> Result<Vec<Pet>, ApiError> {
        decode(response)
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<T: Serialize + ?Sized>(
    method: HttpMethod,
    path: String,
    payload: &T,
) -> Result<HttpRequest, ApiError> {
    let body =
        serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
