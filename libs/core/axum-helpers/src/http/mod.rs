//! HTTP middleware: CORS and security headers.
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, security_headers};
//!
//! let app = Router::new().layer(axum::middleware::from_fn(security_headers));
//! let app = match create_cors_layer(&config.cors_allowed_origins)? {
//!     Some(cors) => app.layer(cors),
//!     None => app,
//! };
//! ```

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::security_headers;
