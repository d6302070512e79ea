//! Catalog client against a local fixture server.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde_json::json;
use url::Url;
use vitrina_core::{Price, ProductId};
use vitrina_storefront::catalog::{CatalogClient, CatalogSource, NetworkError};

fn fixture_products() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://img.example/1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style.",
            "category": "men's clothing",
            "image": "https://img.example/2.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        },
        {
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "category": "men's clothing",
            "image": "https://img.example/3.jpg"
        }
    ])
}

/// Serves the fixture list, truncated to `limit` when given.
async fn products(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let mut products = fixture_products();
    if let Some(limit) = params.get("limit").and_then(|limit| limit.parse::<usize>().ok())
        && let Some(list) = products.as_array_mut()
    {
        list.truncate(limit);
    }
    axum::Json(products)
}

async fn spawn_fixture() -> SocketAddr {
    let app = Router::new()
        .route("/products", get(products))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route("/garbage", get(|| async { "<html>maintenance</html>" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

fn client(addr: SocketAddr, path: &str) -> CatalogClient {
    CatalogClient::new(Url::parse(&format!("http://{addr}{path}")).expect("valid url"))
}

#[tokio::test]
async fn test_fetch_catalog_success() {
    let addr = spawn_fixture().await;
    let products = client(addr, "/products")
        .fetch_catalog(8)
        .await
        .expect("catalog fetched");

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].id, ProductId::from(1));
    assert_eq!(products[0].price, Price::from_cents(10_995).expect("valid price"));
    assert_eq!(products[1].price.to_string(), "22.30");
    // Description is optional
    assert!(products[2].description.is_empty());
}

#[tokio::test]
async fn test_fetch_catalog_forwards_limit() {
    let addr = spawn_fixture().await;
    let products = client(addr, "/products")
        .fetch_catalog(2)
        .await
        .expect("catalog fetched");

    let ids: Vec<_> = products.iter().map(|product| product.id.clone()).collect();
    assert_eq!(ids, vec![ProductId::from(1), ProductId::from(2)]);
}

#[tokio::test]
async fn test_fetch_catalog_server_error() {
    let addr = spawn_fixture().await;
    let err = client(addr, "/broken")
        .fetch_catalog(8)
        .await
        .expect_err("500 should fail");

    match err {
        NetworkError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_catalog_bad_json() {
    let addr = spawn_fixture().await;
    let err = client(addr, "/garbage")
        .fetch_catalog(8)
        .await
        .expect_err("HTML body should fail");

    assert!(matches!(err, NetworkError::Parse(_)));
}

#[tokio::test]
async fn test_fetch_catalog_unreachable() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = client(addr, "/products")
        .fetch_catalog(8)
        .await
        .expect_err("nothing listening");
    assert!(matches!(err, NetworkError::Http(_)));
}
