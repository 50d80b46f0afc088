//! Full lifecycle against the live mock server over real HTTP.
//!
//! # Design
//! Starts the mock server on a random port in its own thread and runtime,
//! then drives a `TodoStore` through `UreqTransport`, so request building,
//! the blocking-pool transport, response parsing and resync all run end to
//! end.

use todo_core::{ApiError, RemoteCollection, TodoCollection, TodoStore, UreqTransport};

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

#[tokio::test]
async fn crud_lifecycle() {
    let base_url = spawn_server();

    // Step 1: initial load of an empty backend.
    let store = TodoStore::mount(RemoteCollection::new(&base_url, UreqTransport::new())).await;
    assert!(store.items().is_empty(), "expected empty list");
    assert_eq!(store.last_error(), None);

    // Step 2: add two todos.
    store.add_todo("Integration test").await;
    store.add_todo("Second").await;
    let items = store.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].description, "Integration test");
    assert!(!items[0].completed);
    let id = items[0].id.clone();

    // Step 3: complete the first one.
    store.toggle_todo_completed(&id, true).await;
    assert!(store.item(&id).unwrap().completed);
    assert!(!store.item(&store.items()[1].id).unwrap().completed);

    // Step 4: delete it.
    store.remove_todo(&id).await;
    assert_eq!(store.items().len(), 1);
    assert!(store.item(&id).is_none());

    // Step 5: deleting again surfaces the 404.
    store.remove_todo(&id).await;
    assert_eq!(store.last_error().as_deref(), Some("HTTP error: 404 "));
    assert_eq!(store.items().len(), 1);

    // Step 6: refresh clears the error.
    store.refresh().await;
    assert_eq!(store.last_error(), None);
    assert_eq!(store.items()[0].description, "Second");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port nothing is listening on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let collection = RemoteCollection::new(&format!("http://{addr}"), UreqTransport::new());

    let err = collection.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(ref msg) if !msg.is_empty()));

    let store = TodoStore::mount(collection).await;
    assert!(store.items().is_empty());
    assert!(store.last_error().is_some());
    assert!(!store.is_loading());
}
