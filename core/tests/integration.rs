//! Full lifecycle tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the store client and
//! the synchronizer over real HTTP through `UreqTransport`. Validates that the
//! core's request building and response parsing work end-to-end with the
//! actual server.

use pet_core::{
    ApiError, FormMode, Gender, HttpMethod, HttpRequest, Pet, PetClient, StoreClient, StoreConfig,
    SyncError, Synchronizer, Transport, UreqTransport,
};

/// Start the mock server on a random port and return its base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn draft(name: &str, species: &str, gender: Gender, price: f64) -> Pet {
    Pet {
        name: name.to_string(),
        species: species.to_string(),
        gender,
        price,
        ..Pet::draft()
    }
}

#[test]
fn store_client_crud_lifecycle() {
    let base = spawn_server();
    let store = StoreClient::new(PetClient::new(&base, "pets"), UreqTransport::new());

    // Step 1: list, should be empty.
    assert!(store.list().unwrap().is_empty(), "expected empty list");

    // Step 2: create, id assigned by the server.
    let created = store.create(&draft("Rex", "Dog", Gender::Male, 120.0)).unwrap();
    let id = created.id.expect("server assigns an id");
    assert_eq!(created.name, "Rex");
    assert_eq!(created.gender, Gender::Male);

    // Step 3: get.
    assert_eq!(store.get(id).unwrap(), created);

    // Step 4: update.
    let updated = store
        .update(&Pet {
            breed: "Beagle".to_string(),
            ..created.clone()
        })
        .unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.breed, "Beagle");

    // Step 5: bulk create.
    let bulk = store
        .bulk_create(&[
            draft("Mia", "Cat", Gender::Female, 80.0),
            draft("Bo", "Dog", Gender::Male, 100.0),
        ])
        .unwrap();
    assert_eq!(bulk.len(), 2);
    assert!(bulk.iter().all(|p| p.id.is_some() && p.id != Some(id)));

    // Step 6: server-side searches.
    let cats = store.search("cat").unwrap();
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].name, "Mia");
    let cheap = store.search_by_price(100.0).unwrap();
    assert_eq!(cheap.len(), 2);

    // Step 7: delete, then delete again.
    store.delete(id).unwrap();
    assert!(matches!(store.get(id).unwrap_err(), ApiError::NotFound));
    assert!(matches!(store.delete(id).unwrap_err(), ApiError::NotFound));

    // Step 8: update of a deleted record is not an upsert.
    let err = store.update(&updated).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    assert_eq!(store.list().unwrap().len(), 2);
}

#[test]
fn synchronizer_lifecycle() {
    let base = spawn_server();
    let config = StoreConfig {
        base_url: base,
        ..StoreConfig::default()
    };
    let mut sync = Synchronizer::connect(&config);

    // Seed through the synchronizer itself.
    sync.bulk_import(&[
        draft("Rex", "Dog", Gender::Male, 120.0),
        draft("Mia", "Cat", Gender::Female, 80.0),
    ])
    .unwrap();
    assert_eq!(sync.load().unwrap(), 2);

    // Create.
    sync.begin_create();
    assert_eq!(sync.form().mode(), FormMode::Create);
    let bo = sync.submit_form(draft("Bo", "Dog", Gender::Male, 100.0)).unwrap();
    assert_eq!(sync.list().len(), 3);
    assert!(!sync.form().is_open());

    // Search.
    sync.search("cat");
    assert_eq!(sync.list().filtered().len(), 1);
    sync.search("DOG");
    assert_eq!(sync.list().filtered().len(), 2);

    // Edit.
    sync.begin_edit(&bo).unwrap();
    let renamed = sync
        .submit_form(Pet {
            name: "Bobo".to_string(),
            ..bo.clone()
        })
        .unwrap();
    assert_eq!(renamed.id, bo.id);
    assert_eq!(sync.list().len(), 3);
    assert!(sync.list().filtered().iter().any(|p| p.name == "Bobo"));

    // Delete twice: first succeeds, second is diagnosed.
    let id = bo.id.unwrap();
    assert!(sync.delete_record(id));
    assert!(!sync.delete_record(id));
    assert_eq!(sync.list().len(), 2);
    assert_eq!(sync.diagnostics().len(), 1);

    // Remote state agrees with the local list.
    assert_eq!(sync.store().list().unwrap(), sync.list().canonical());
}

#[test]
fn free_text_gender_does_not_block_load() {
    let base = spawn_server();
    let transport = UreqTransport::new();
    for body in [r#"{"name":"Rex","gender":"male"}"#, r#"{"name":"Mia","gender":"Female"}"#] {
        let response = transport
            .execute(HttpRequest {
                method: HttpMethod::Post,
                path: format!("{base}/pets"),
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: Some(body.to_string()),
            })
            .unwrap();
        assert_eq!(response.status, 201);
    }

    let config = StoreConfig {
        base_url: base,
        ..StoreConfig::default()
    };
    let mut sync = Synchronizer::connect(&config);
    assert_eq!(sync.load().unwrap(), 2);
    assert_eq!(sync.list().canonical()[0].gender, Gender::Male);
    assert_eq!(sync.list().canonical()[1].gender, Gender::Female);
}

#[test]
fn unreachable_store_surfaces_transport_errors() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = StoreConfig {
        base_url: format!("http://{addr}"),
        ..StoreConfig::default()
    };
    let mut sync = Synchronizer::connect(&config);

    let err = sync.load().unwrap_err();
    assert!(matches!(err, SyncError::Api(ApiError::Transport(_))));

    sync.begin_create();
    assert!(sync.submit_form(Pet::draft()).is_err());
    assert!(sync.form().is_open());

    assert!(!sync.delete_record(1));
    assert_eq!(sync.diagnostics().len(), 1);
}
