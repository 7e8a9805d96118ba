//! REST implementation of the catalog read side.

use async_trait::async_trait;

use dukkan_core::catalog::{Category, Product, Shop, Subcategory, Suggestion};
use dukkan_core::catalog::CatalogSource;
use dukkan_core::error::Result;
use dukkan_core::filter::{self, FilterSet};
use dukkan_core::pagination::{Envelope, Page};

use crate::http::{HttpClient, ItemEnvelope};

/// [`CatalogSource`] backed by the Dukkan REST API.
#[derive(Clone)]
pub struct ApiCatalog {
    http: HttpClient,
}

impl ApiCatalog {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        filters: &FilterSet,
        page: u32,
    ) -> Result<Page<T>> {
        // The page argument wins over whatever the filter set carries.
        let query = filter::encode(&filters.clone().with_page(page));
        let envelope: Envelope<T> = self.http.get_json(path, Some(&query)).await?;
        Ok(envelope.into_page())
    }
}

#[async_trait]
impl CatalogSource for ApiCatalog {
    async fn list_products(&self, filters: &FilterSet, page: u32) -> Result<Page<Product>> {
        self.list("/products", filters, page).await
    }

    async fn list_shops(&self, filters: &FilterSet, page: u32) -> Result<Page<Shop>> {
        self.list("/shops", filters, page).await
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let envelope: Envelope<Category> = self.http.get_json("/categories", None).await?;
        Ok(envelope.data)
    }

    async fn subcategories(&self, category_slug: &str) -> Result<Vec<Subcategory>> {
        let path = format!("/categories/{category_slug}/subcategories");
        let envelope: Envelope<Subcategory> = self.http.get_json(&path, None).await?;
        Ok(envelope.data)
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>> {
        let qs = filter::encode(&FilterSet::new().with_search(query));
        let envelope: Envelope<Suggestion> = self
            .http
            .get_json("/search/suggestions", Some(&qs))
            .await?;
        Ok(envelope.data)
    }

    async fn shop_by_slug(&self, slug: &str) -> Result<Shop> {
        let path = format!("/shops/{slug}");
        let envelope: ItemEnvelope<Shop> = self.http.get_json(&path, None).await?;
        Ok(envelope.data)
    }
}
