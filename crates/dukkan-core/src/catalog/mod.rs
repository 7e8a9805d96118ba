//! Catalog domain: products, shops, categories, and search suggestions.

pub mod model;
pub mod source;

pub use model::{
    Category, NewProduct, Product, ProductImage, Shop, Subcategory, Suggestion, SuggestionKind,
};
pub use source::{CatalogSource, TokenStore, VendorCatalog};
