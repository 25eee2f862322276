//! HTTP handlers for the Products API
//!
//! Routes are relative; the application mounts them under `/products`.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{ErrorResponse, IdPath};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{MessageResponse, NameQuery, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        search_by_name,
        create_product,
        save_product,
        update_product,
        delete_product,
    ),
    components(schemas(Product, UpdateProduct, MessageResponse, ErrorResponse)),
    tags(
        (name = "Products", description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products))
        .route("/name", get(search_by_name))
        .route("/crear", post(create_product))
        .route("/update", put(save_product))
        .route("/update/{id}", put(update_product))
        .route("/{id}", get(get_product).delete(delete_product))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 404, description = "The store is empty", body = ErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "No product with this id", body = ErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Search products whose name contains a term
#[utoipa::path(
    get,
    path = "/name",
    tag = "Products",
    params(NameQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 404, description = "No product name contains the term", body = ErrorResponse)
    )
)]
async fn search_by_name<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<NameQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.search_by_name(&query.name).await?;
    Ok(Json(products))
}

/// Create a product; the store assigns the id
#[utoipa::path(
    post,
    path = "/crear",
    tag = "Products",
    request_body = Product,
    responses(
        (status = 201, description = "Product created", body = Product)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Json(product): Json<Product>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Save a product as sent, overwriting the row with the same id
#[utoipa::path(
    put,
    path = "/update",
    tag = "Products",
    request_body = Product,
    responses(
        (status = 200, description = "Product saved", body = Product)
    )
)]
async fn save_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Json(product): Json<Product>,
) -> ProductResult<Json<Product>> {
    let product = service.save_product(product).await?;
    Ok(Json(product))
}

/// Replace name, price and stock of an existing product
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "No product with this id", body = ErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    Json(update): Json<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, update).await?;
    Ok(Json(product))
}

/// Delete a product by id
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deletion confirmed, whether or not the product existed", body = MessageResponse),
        (status = 400, description = "Id is not an integer", body = ErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Producto eliminado: {}",
        id
    ))))
}
