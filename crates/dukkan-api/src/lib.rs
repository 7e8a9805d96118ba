//! REST client for the Dukkan marketplace API.
//!
//! Implements the seam traits from `dukkan-core` against the Laravel-style
//! JSON backend: paginated catalog reads, vendor mutations, multipart image
//! upload, and the persisted auth token.

pub mod catalog;
pub mod config;
pub mod http;
pub mod token;
pub mod vendor;

pub use catalog::ApiCatalog;
pub use config::{API_URL_ENV, ApiConfig, DEFAULT_API_URL};
pub use http::HttpClient;
pub use token::{FileTokenStore, MemoryTokenStore};
pub use vendor::ApiVendor;
