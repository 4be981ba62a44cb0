pub mod config;

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: String,
    pub image: String,
    pub description: String,
    pub price: f64,
}

/// Body of create, bulk create and update. A client-supplied `id` is ignored.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct PetInput {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: String,
    pub image: String,
    pub description: String,
    pub price: f64,
}

impl PetInput {
    fn into_pet(self, id: i64) -> Pet {
        Pet {
            id,
            name: self.name,
            species: self.species,
            breed: self.breed,
            gender: self.gender,
            image: self.image,
            description: self.description,
            price: self.price,
        }
    }
}

#[derive(Default)]
pub struct Store {
    pets: BTreeMap<i64, Pet>,
    last_id: i64,
}

impl Store {
    fn insert(&mut self, input: PetInput) -> Pet {
        self.last_id += 1;
        let pet = input.into_pet(self.last_id);
        self.pets.insert(pet.id, pet.clone());
        pet
    }
}

pub type Db = Arc<RwLock<Store>>;

type NotFound = (StatusCode, Json<Value>);

fn not_found() -> NotFound {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Pet not found" })))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/bulk", post(bulk_create_pets))
        .route("/pets/{id}", get(get_pet).put(update_pet).delete(delete_pet))
        .route("/pets/search/{key}", get(search_pets))
        .route("/pets/search/price/{price}", get(search_by_price))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_pets(State(db): State<Db>) -> Json<Vec<Pet>> {
    let store = db.read().await;
    Json(store.pets.values().cloned().collect())
}

async fn create_pet(State(db): State<Db>, Json(input): Json<PetInput>) -> (StatusCode, Json<Pet>) {
    let pet = db.write().await.insert(input);
    tracing::info!(id = pet.id, name = %pet.name, "pet created");
    (StatusCode::CREATED, Json(pet))
}

async fn bulk_create_pets(
    State(db): State<Db>,
    Json(inputs): Json<Vec<PetInput>>,
) -> (StatusCode, Json<Vec<Pet>>) {
    let mut store = db.write().await;
    let pets: Vec<Pet> = inputs.into_iter().map(|input| store.insert(input)).collect();
    tracing::info!(count = pets.len(), "pets created in bulk");
    (StatusCode::CREATED, Json(pets))
}

async fn get_pet(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Pet>, NotFound> {
    let store = db.read().await;
    store.pets.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_pet(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<PetInput>,
) -> Result<Json<Pet>, NotFound> {
    let mut store = db.write().await;
    let slot = store.pets.get_mut(&id).ok_or_else(not_found)?;
    *slot = input.into_pet(id);
    tracing::info!(id, "pet updated");
    Ok(Json(slot.clone()))
}

async fn delete_pet(State(db): State<Db>, Path(id): Path<i64>) -> Result<String, NotFound> {
    let mut store = db.write().await;
    store.pets.remove(&id).ok_or_else(not_found)?;
    tracing::info!(id, "pet deleted");
    Ok(format!("Pet with id {{{id}}} deleted."))
}

/// Case-insensitive match on name, species, breed, gender or description.
async fn search_pets(State(db): State<Db>, Path(key): Path<String>) -> Json<Vec<Pet>> {
    let needle = key.to_lowercase();
    let store = db.read().await;
    Json(
        store
            .pets
            .values()
            .filter(|pet| {
                [
                    &pet.name,
                    &pet.species,
                    &pet.breed,
                    &pet.gender,
                    &pet.description,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect(),
    )
}

async fn search_by_price(State(db): State<Db>, Path(price): Path<f64>) -> Json<Vec<Pet>> {
    let store = db.read().await;
    Json(
        store
            .pets
            .values()
            .filter(|pet| pet.price <= price)
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_serializes_to_json() {
        let pet = PetInput {
            name: "Rex".to_string(),
            gender: "male".to_string(),
            price: 10.5,
            ..PetInput::default()
        }
        .into_pet(1);
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Rex");
        assert_eq!(json["gender"], "male");
        assert_eq!(json["price"], 10.5);
    }

    #[test]
    fn input_ignores_client_id() {
        let input: PetInput = serde_json::from_str(r#"{"id":99,"name":"Bo"}"#).unwrap();
        let pet = input.into_pet(3);
        assert_eq!(pet.id, 3);
        assert_eq!(pet.name, "Bo");
    }

    #[test]
    fn input_fields_all_default() {
        let input: PetInput = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_empty());
        assert_eq!(input.price, 0.0);
    }

    #[test]
    fn store_assigns_sequential_ids() {
        let mut store = Store::default();
        let a = store.insert(PetInput::default());
        let b = store.insert(PetInput::default());
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = Store::default();
        let a = store.insert(PetInput::default());
        store.pets.remove(&a.id);
        let b = store.insert(PetInput::default());
        assert_eq!(b.id, 2);
    }
}
