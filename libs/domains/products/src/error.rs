use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Nothing matched; the message is shown to the client as-is
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl ProductError {
    /// A listing came back empty
    pub fn no_records() -> Self {
        ProductError::NotFound("No hay registros".to_string())
    }

    pub fn id_not_found(id: i64) -> Self {
        ProductError::NotFound(format!("El id {} del producto no fue encontrado", id))
    }

    /// A search for `term` matched nothing; the trailing space is part of the message
    pub fn term_not_found(term: &str) -> Self {
        ProductError::NotFound(format!("{} no fue encontrado. ", term))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProductError::NotFound(_))
    }
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(msg) => AppError::NotFound(msg),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}
