use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::ProductResult,
    models::Product,
    repository::ProductRepository,
};

/// PostgreSQL implementation of [`ProductRepository`] on top of SeaORM
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert(&self, mut active_model: entity::ActiveModel) -> ProductResult<Product> {
        active_model.id = NotSet;
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }
}

/// `LIKE` pattern matching names that contain `fragment` literally.
///
/// `%`, `_` and the escape character itself are escaped, so a search for `%`
/// only matches names with a `%` in them.
fn contains_pattern(fragment: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}

fn into_products(models: Vec<entity::Model>) -> Vec<Product> {
    models.into_iter().map(Product::from).collect()
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(into_products(models))
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(into_products(models))
    }

    async fn find_by_price(&self, price: f64) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Price.eq(price))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(into_products(models))
    }

    async fn find_by_name_containing(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        // Case-sensitive in PostgreSQL
        let models = entity::Entity::find()
            .filter(entity::Column::Name.like(contains_pattern(fragment)))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(into_products(models))
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let active_model = entity::ActiveModel::from(product);

        let Some(id) = id else {
            return self.insert(active_model).await;
        };

        match active_model.clone().update(&self.db).await {
            Ok(model) => {
                tracing::info!(product_id = model.id, "Updated product");
                Ok(model.into())
            }
            Err(DbErr::RecordNotUpdated) => {
                tracing::debug!(product_id = id, "No row to overwrite, inserting");
                self.insert(active_model).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        tracing::info!(product_id = id, rows_affected = result.rows_affected, "Deleted product");
        Ok(())
    }
}
