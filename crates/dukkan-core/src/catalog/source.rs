//! Seam traits between the catalog domain and the network layer.
//!
//! Controllers depend only on these traits, so tests (and offline demo
//! fixtures) can stand in for the REST backend.

use async_trait::async_trait;

use crate::catalog::model::{
    Category, NewProduct, Product, ProductImage, Shop, Subcategory, Suggestion,
};
use crate::error::Result;
use crate::filter::FilterSet;
use crate::pagination::Page;

/// Read-side access to the marketplace catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches one page of products matching the filter set.
    ///
    /// The `page` argument overrides any page carried inside `filters`.
    async fn list_products(&self, filters: &FilterSet, page: u32) -> Result<Page<Product>>;

    /// Fetches one page of shops matching the filter set.
    async fn list_shops(&self, filters: &FilterSet, page: u32) -> Result<Page<Shop>>;

    /// Fetches all top-level categories.
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Fetches the subcategories valid under the given category.
    async fn subcategories(&self, category_slug: &str) -> Result<Vec<Subcategory>>;

    /// Fetches search suggestions for a partial query.
    async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>>;

    /// Resolves a shop slug to the full shop entity.
    async fn shop_by_slug(&self, slug: &str) -> Result<Shop>;
}

/// Write-side access to a vendor's own listings.
#[async_trait]
pub trait VendorCatalog: Send + Sync {
    /// Creates a product listing under the vendor's shop.
    async fn create_product(&self, shop_slug: &str, product: &NewProduct) -> Result<Product>;

    /// Sets a product's active flag.
    async fn set_product_active(
        &self,
        shop_slug: &str,
        product_slug: &str,
        active: bool,
    ) -> Result<()>;

    /// Deletes a product listing.
    async fn delete_product(&self, shop_slug: &str, product_slug: &str) -> Result<()>;

    /// Uploads a product image as-is (multipart pass-through, no processing).
    async fn upload_image(
        &self,
        shop_slug: &str,
        product_slug: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<ProductImage>;

    /// Deletes a product image.
    async fn delete_image(&self, shop_slug: &str, product_slug: &str, image_id: u64) -> Result<()>;
}

/// Storage for the single opaque auth token.
///
/// Presence of a token gates the vendor surface; it is cleared as a side
/// effect of an auth failure.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    fn get(&self) -> Option<String>;

    /// Replaces the stored token.
    fn set(&self, token: &str) -> Result<()>;

    /// Removes the stored token.
    fn clear(&self) -> Result<()>;
}
