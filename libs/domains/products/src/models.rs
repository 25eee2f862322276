use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier; `null` until the product is saved
    #[serde(default)]
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[schema(example = "Pen")]
    pub name: String,
    #[schema(example = 1.5)]
    pub price: f64,
    #[schema(example = 10)]
    pub stock: i32,
}

impl Product {
    /// A product that has not been saved yet
    pub fn new(name: impl Into<String>, price: f64, stock: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            stock,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Overwrite every editable field, keeping the id
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.price = update.price;
        self.stock = update.stock;
    }
}

/// Body of `PUT /products/update/{id}`; an `id` in the body is ignored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateProduct {
    #[schema(example = "Pen")]
    pub name: String,
    #[schema(example = 2.0)]
    pub price: f64,
    #[schema(example = 5)]
    pub stock: i32,
}

/// Query string of the name search
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Substring to look for in product names
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unsaved_product_serializes_null_id() {
        let product = Product::new("Pen", 1.5, 10);
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({ "id": null, "name": "Pen", "price": 1.5, "stock": 10 })
        );
    }

    #[test]
    fn test_product_without_id_field_deserializes() {
        let product: Product =
            serde_json::from_value(json!({ "name": "Pen", "price": 1.5, "stock": 10 })).unwrap();
        assert_eq!(product, Product::new("Pen", 1.5, 10));
    }

    #[test]
    fn test_update_body_ignores_id() {
        let update: UpdateProduct =
            serde_json::from_value(json!({ "id": 99, "name": "Pen", "price": 2.0, "stock": 5 }))
                .unwrap();

        let mut product = Product::new("Pen", 1.5, 10).with_id(1);
        product.apply_update(update);

        assert_eq!(product, Product::new("Pen", 2.0, 5).with_id(1));
    }
}
