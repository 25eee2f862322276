//! Product Service - Business logic layer

use observability::ProductMetrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The one rule enforced here: a read that finds nothing is a
/// [`ProductError::NotFound`], even though the repository treats it as a
/// normal empty result.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every product; an empty store is not found
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        let started = Instant::now();
        let result = self.repository.find_all().await.and_then(|products| {
            if products.is_empty() {
                Err(ProductError::no_records())
            } else {
                Ok(products)
            }
        });
        record("list", started, &result);
        result
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        let started = Instant::now();
        let result = self
            .repository
            .find_by_id(id)
            .await
            .and_then(|product| product.ok_or_else(|| ProductError::id_not_found(id)));
        record("get", started, &result);
        result
    }

    /// Products whose name contains `name`
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let started = Instant::now();
        let result = self
            .repository
            .find_by_name_containing(name)
            .await
            .and_then(|products| {
                if products.is_empty() {
                    Err(ProductError::term_not_found(name))
                } else {
                    Ok(products)
                }
            });
        record("search", started, &result);
        result
    }

    /// Create a product; any client-supplied id is discarded
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    pub async fn create_product(&self, mut product: Product) -> ProductResult<Product> {
        let started = Instant::now();
        product.id = None;
        let result = self.repository.save(product).await;
        record("create", started, &result);
        result
    }

    /// Save `product` as given, without checking that its id exists
    #[instrument(skip(self, product), fields(product_id = ?product.id))]
    pub async fn save_product(&self, product: Product) -> ProductResult<Product> {
        let started = Instant::now();
        let result = self.repository.save(product).await;
        record("save", started, &result);
        result
    }

    /// Replace name, price and stock of an existing product.
    ///
    /// Read and write are separate repository calls; concurrent updates of
    /// the same id are last-write-wins.
    #[instrument(skip(self, update))]
    pub async fn update_product(&self, id: i64, update: UpdateProduct) -> ProductResult<Product> {
        let started = Instant::now();
        let result = async {
            let mut product = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| ProductError::id_not_found(id))?;

            product.apply_update(update);
            self.repository.save(product).await
        }
        .await;
        record("update", started, &result);
        result
    }

    /// Delete by id; succeeds whether or not the product existed
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let started = Instant::now();
        let result = self.repository.delete_by_id(id).await;
        record("delete", started, &result);
        result
    }
}

fn record<T>(operation: &'static str, started: Instant, result: &ProductResult<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) if e.is_not_found() => "not_found",
        Err(e) => {
            tracing::warn!(operation, error = %e, "Product operation failed");
            "error"
        }
    };
    ProductMetrics::record_operation(operation, outcome, started.elapsed());
}
