//! Tests for the HTTP-backed secret store and inventory client against a
//! local stand-in service.

use axum::{http::StatusCode, routing::get, Json, Router};
use warden_models::AddressListRecord;
use warden_resources::{
    resolve_connection, AddressListInventory, HttpInventory, HttpSecretStore, LookupError,
};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_http_secret_store_resolves_descriptor() {
    let app = Router::new().route(
        "/v1/secrets/warden/db-admin",
        get(|| async {
            r#"{"host": "db.internal", "port": 5433, "username": "admin", "password": "pw"}"#
        }),
    );
    let base = serve(app).await;

    let store = HttpSecretStore::new(base);
    let descriptor = resolve_connection(&store, "warden/db-admin").await.unwrap();
    assert_eq!(descriptor.host, "db.internal");
    assert_eq!(descriptor.port, 5433);
    assert_eq!(descriptor.username, "admin");
}

#[tokio::test]
async fn test_http_secret_store_surfaces_missing_secret() {
    let app = Router::new().route(
        "/v1/secrets/warden/db-admin",
        get(|| async { StatusCode::NOT_FOUND }),
    );
    let base = serve(app).await;

    let store = HttpSecretStore::new(base);
    let err = resolve_connection(&store, "warden/db-admin").await.unwrap_err();
    assert_eq!(err.reference, "warden/db-admin");
    assert!(err.message.contains("404"));
}

#[tokio::test]
async fn test_http_inventory_lists_address_lists() {
    let app = Router::new().route(
        "/v1/address-lists",
        get(|| async {
            Json(vec![AddressListRecord {
                id: "al-0abc".to_string(),
                name: "edge-allow-list".to_string(),
                cidrs: vec!["10.0.0.0/8".to_string()],
            }])
        }),
    );
    let base = serve(app).await;

    let inventory = HttpInventory::new(base);
    let lists = inventory.list().await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name, "edge-allow-list");
}

#[tokio::test]
async fn test_http_inventory_surfaces_server_errors() {
    let app = Router::new().route(
        "/v1/address-lists",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = serve(app).await;

    let inventory = HttpInventory::new(base);
    let err = inventory.list().await.unwrap_err();
    assert!(matches!(err, LookupError::Api(message) if message.contains("500")));
}
