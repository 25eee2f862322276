//! Handler tests for the Products domain
//!
//! These drive `handlers::router` over the in-memory repository and check:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error bodies

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app_with(products: Vec<Product>) -> (Router, InMemoryProductRepository) {
    let repository = InMemoryProductRepository::with_products(products);
    let app = handlers::router(ProductService::new(repository.clone()));
    (app, repository)
}

fn pen() -> Product {
    Product::new("Pen", 1.5, 10).with_id(1)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_get_update_delete_scenario() {
    let (app, _) = app_with(vec![pen()]);

    let response = app.clone().oneshot(empty_request("GET", "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "id": 1, "name": "Pen", "price": 1.5, "stock": 10 }));

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/update/1",
            json!({ "name": "Pen", "price": 2.0, "stock": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated, Product::new("Pen", 2.0, 5).with_id(1));

    let response = app.clone().oneshot(empty_request("DELETE", "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "message": "Producto eliminado: 1" }));

    let response = app.oneshot(empty_request("GET", "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains('1'));
}

#[tokio::test]
async fn test_list_empty_store_returns_404_no_records() {
    let (app, _) = app_with(vec![]);

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "error": "No hay registros" }));
}

#[tokio::test]
async fn test_list_returns_all_products() {
    let builder = TestDataBuilder::from_test_name("handler_list");
    let products: Vec<Product> = (0..3)
        .map(|i| {
            Product::new(
                builder.name("product", &i.to_string()),
                builder.price(i),
                builder.stock(i),
            )
        })
        .collect();
    let (app, _) = app_with(products.clone());

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(listed.len(), 3);
    for (listed, original) in listed.iter().zip(&products) {
        assert_eq!(listed.name, original.name);
        assert_eq!(listed.price, original.price);
        assert_eq!(listed.stock, original.stock);
    }
}

#[tokio::test]
async fn test_get_missing_product_returns_404_with_id() {
    let (app, _) = app_with(vec![pen()]);

    let response = app.oneshot(empty_request("GET", "/42")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({ "error": "El id 42 del producto no fue encontrado" })
    );
}

#[tokio::test]
async fn test_non_integer_id_returns_400() {
    let (app, _) = app_with(vec![pen()]);

    let response = app.oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "error": "Invalid id: abc" }));
}

#[tokio::test]
async fn test_search_by_name_substring() {
    let (app, _) = app_with(vec![
        pen(),
        Product::new("Pencil", 0.5, 40),
        Product::new("Notebook", 3.0, 7),
    ]);

    let response = app
        .oneshot(empty_request("GET", "/name?name=Pen"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let found: Vec<Product> = json_body(response.into_body()).await;
    let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Pen", "Pencil"]);
}

#[tokio::test]
async fn test_search_without_match_returns_404_with_term() {
    let (app, _) = app_with(vec![pen()]);

    let response = app
        .oneshot(empty_request("GET", "/name?name=Lapiz"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "error": "Lapiz no fue encontrado. " }));
}

#[tokio::test]
async fn test_search_wildcard_term_is_literal() {
    let (app, _) = app_with(vec![pen(), Product::new("Pencil", 0.5, 40)]);

    let response = app
        .oneshot(empty_request("GET", "/name?name=%25"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "error": "% no fue encontrado. " }));
}

#[tokio::test]
async fn test_create_returns_201_with_new_id() {
    let (app, repository) = app_with(vec![pen()]);

    let response = app
        .oneshot(json_request(
            "POST",
            "/crear",
            json!({ "name": "Eraser", "price": 0.8, "stock": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Product = json_body(response.into_body()).await;
    assert_eq!(created, Product::new("Eraser", 0.8, 3).with_id(2));
    assert_eq!(repository.find_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let (app, repository) = app_with(vec![pen()]);

    let response = app
        .oneshot(json_request(
            "POST",
            "/crear",
            json!({ "id": 1, "name": "Eraser", "price": 0.8, "stock": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Product = json_body(response.into_body()).await;
    assert_ne!(created.id, Some(1));
    // The existing product was not overwritten
    assert_eq!(repository.find_by_id(1).await.unwrap(), Some(pen()));
}

#[tokio::test]
async fn test_bulk_update_overwrites_without_existence_check() {
    let (app, repository) = app_with(vec![pen()]);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/update",
            json!({ "id": 1, "name": "Gel pen", "price": 2.5, "stock": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let saved: Product = json_body(response.into_body()).await;
    assert_eq!(saved, Product::new("Gel pen", 2.5, 1).with_id(1));

    // Unknown id: saved as a new product instead of failing
    let response = app
        .oneshot(json_request(
            "PUT",
            "/update",
            json!({ "id": 50, "name": "Ruler", "price": 1.0, "stock": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let saved: Product = json_body(response.into_body()).await;
    assert_eq!(saved.name, "Ruler");
    assert_eq!(repository.find_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_by_id_missing_returns_404_and_writes_nothing() {
    let (app, repository) = app_with(vec![pen()]);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/update/9",
            json!({ "name": "Ghost", "price": 1.0, "stock": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "error": "El id 9 del producto no fue encontrado" }));
    assert_eq!(repository.find_all().await.unwrap(), vec![pen()]);
}

#[tokio::test]
async fn test_delete_missing_product_still_confirms() {
    let (app, _) = app_with(vec![]);

    let response = app.oneshot(empty_request("DELETE", "/31")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: MessageResponse = json_body(response.into_body()).await;
    assert_eq!(body, MessageResponse::new("Producto eliminado: 31"));
}
