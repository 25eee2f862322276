use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for Product persistence
///
/// Empty results are not errors at this layer; deciding what "nothing found"
/// means is left to the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ordered by id
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Products whose name equals `name` exactly
    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    /// Products whose price equals `price` exactly
    async fn find_by_price(&self, price: f64) -> ProductResult<Vec<Product>>;

    /// Products whose name contains `fragment` (case-sensitive)
    async fn find_by_name_containing(&self, fragment: &str) -> ProductResult<Vec<Product>>;

    /// Insert or overwrite a product.
    ///
    /// Without an id, or with an id that has no row, a new row is inserted
    /// with a store-assigned id. With an existing id, every field is replaced.
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Remove a product; a missing id is not an error
    async fn delete_by_id(&self, id: i64) -> ProductResult<()>;
}

struct InMemoryState {
    products: BTreeMap<i64, Product>,
    next_id: i64,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            products: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryState {
    fn insert_new(&mut self, mut product: Product) -> Product {
        let id = self.next_id;
        self.next_id += 1;
        product.id = Some(id);
        self.products.insert(id, product.clone());
        product
    }
}

/// In-memory repository used by tests and local runs without PostgreSQL
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `products`.
    ///
    /// Products that carry an id keep it; the others get fresh ids after the
    /// highest one seen.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut state = InMemoryState::default();
        let mut unsaved = Vec::new();

        for product in products {
            match product.id {
                Some(id) => {
                    state.next_id = state.next_id.max(id + 1);
                    state.products.insert(id, product);
                }
                None => unsaved.push(product),
            }
        }
        for product in unsaved {
            state.insert_new(product);
        }

        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    async fn filter<F>(&self, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let state = self.state.read().await;
        state
            .products
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.filter(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        Ok(self.filter(|p| p.name == name).await)
    }

    async fn find_by_price(&self, price: f64) -> ProductResult<Vec<Product>> {
        Ok(self.filter(|p| p.price == price).await)
    }

    async fn find_by_name_containing(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        Ok(self.filter(|p| p.name.contains(fragment)).await)
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let mut state = self.state.write().await;

        if let Some(id) = product.id {
            if let Some(existing) = state.products.get_mut(&id) {
                *existing = product.clone();
                return Ok(product);
            }
        }

        Ok(state.insert_new(product))
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        self.state.write().await.products.remove(&id);
        Ok(())
    }
}
