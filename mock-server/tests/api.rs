use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Pet};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_pets_empty() {
    let resp = app().oneshot(empty_request("GET", "/pets")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pets: Vec<Pet> = body_json(resp).await;
    assert!(pets.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_pet_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/pets",
            r#"{"name":"Rex","species":"Dog","gender":"male","price":120}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let pet: Pet = body_json(resp).await;
    assert_eq!(pet.id, 1);
    assert_eq!(pet.name, "Rex");
    assert_eq!(pet.price, 120.0);
}

#[tokio::test]
async fn create_pet_malformed_json_returns_4xx() {
    let resp = app()
        .oneshot(json_request("POST", "/pets", r#"{"name":"#))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn bulk_create_returns_all_with_ids() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/pets/bulk",
            r#"[{"name":"Rex"},{"name":"Mia"},{"name":"Bo"}]"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let pets: Vec<Pet> = body_json(resp).await;
    let ids: Vec<i64> = pets.iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 2, 3]);
}

// --- get ---

#[tokio::test]
async fn get_pet_not_found() {
    let resp = app().oneshot(empty_request("GET", "/pets/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "Pet not found");
}

#[tokio::test]
async fn get_pet_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/pets/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_pet_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/pets/7", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_pet_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/pets/7"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_and_search_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    macro_rules! call {
        ($req:expr) => {
            ServiceExt::ready(&mut app).await.unwrap().call($req).await.unwrap()
        };
    }

    // bulk seed
    let resp = call!(json_request(
        "POST",
        "/pets/bulk",
        r#"[
            {"name":"Rex","species":"Dog","breed":"Beagle","gender":"male","price":120},
            {"name":"Mia","species":"Cat","breed":"Siamese","gender":"female","price":80,"description":"quiet"}
        ]"#,
    ));
    assert_eq!(resp.status(), StatusCode::CREATED);

    // create
    let resp = call!(json_request(
        "POST",
        "/pets",
        r#"{"name":"Bo","species":"Dog","gender":"male","price":100}"#,
    ));
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bo: Pet = body_json(resp).await;
    assert_eq!(bo.id, 3);

    // list in id order
    let resp = call!(empty_request("GET", "/pets"));
    let pets: Vec<Pet> = body_json(resp).await;
    let names: Vec<&str> = pets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Rex", "Mia", "Bo"]);

    // keyword search covers description
    let resp = call!(empty_request("GET", "/pets/search/QUIET"));
    assert_eq!(resp.status(), StatusCode::OK);
    let found: Vec<Pet> = body_json(resp).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Mia");

    // price search is inclusive
    let resp = call!(empty_request("GET", "/pets/search/price/100"));
    let cheap: Vec<Pet> = body_json(resp).await;
    let ids: Vec<i64> = cheap.iter().map(|p| p.id).collect();
    assert_eq!(ids, [2, 3]);

    // update replaces every field
    let resp = call!(json_request(
        "PUT",
        "/pets/3",
        r#"{"id":3,"name":"Bo","species":"Dog","breed":"Mutt","gender":"male","price":90}"#,
    ));
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Pet = body_json(resp).await;
    assert_eq!(updated.breed, "Mutt");
    assert_eq!(updated.price, 90.0);

    // delete
    let resp = call!(empty_request("DELETE", "/pets/3"));
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"Pet with id {3} deleted.");

    // get after delete
    let resp = call!(empty_request("GET", "/pets/3"));
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete
    let resp = call!(empty_request("GET", "/pets"));
    let pets: Vec<Pet> = body_json(resp).await;
    assert_eq!(pets.len(), 2);
}
