//! Fixture-backed implementations of the fetch contracts.
//!
//! Controllers are agnostic to whether data comes from the REST client or
//! these in-memory fixtures; the tests inject them through the same traits
//! the production client implements.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use dukkan_controller::ListFetcher;
use dukkan_core::catalog::{
    CatalogSource, Category, NewProduct, Product, ProductImage, Shop, Subcategory, Suggestion,
    TokenStore, VendorCatalog,
};
use dukkan_core::error::{DukkanError, Result};
use dukkan_core::filter::FilterSet;
use dukkan_core::pagination::{Page, PaginationMeta};

pub fn product(id: u64, slug: &str, active: bool) -> Product {
    Product {
        id,
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        description: None,
        price: 10.0,
        currency: "TRY".to_string(),
        image_urls: Vec::new(),
        is_active: active,
        stock: Some(5),
        shop_id: 1,
        category_slug: None,
        subcategory_slug: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn shop(id: u64, slug: &str) -> Shop {
    Shop {
        id,
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        description: None,
        logo_url: None,
        city: None,
        latitude: None,
        longitude: None,
        is_active: true,
        product_count: None,
        created_at: None,
    }
}

pub fn subcategory(slug: &str, category: &str) -> Subcategory {
    Subcategory {
        slug: slug.to_string(),
        name: slug.to_string(),
        category_slug: category.to_string(),
    }
}

pub fn page_of(items: Vec<Product>, current_page: u32, last_page: u32, total: u64) -> Page<Product> {
    let count = items.len() as u64;
    let from = if count == 0 { 0 } else { u64::from(current_page - 1) * count + 1 };
    Page {
        items,
        meta: PaginationMeta {
            current_page,
            last_page,
            per_page: 2,
            total,
            from,
            to: if count == 0 { 0 } else { from + count - 1 },
        },
    }
}

/// Fetcher that pops scripted responses in order, each after an
/// artificial delay.
pub struct ScriptedFetcher {
    responses: Mutex<VecDeque<(Duration, Result<Page<Product>>)>>,
}

impl ScriptedFetcher {
    pub fn new(responses: Vec<(Duration, Result<Page<Product>>)>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }
}

#[async_trait]
impl ListFetcher<Product> for ScriptedFetcher {
    async fn fetch(&self, _filters: &FilterSet, _page: u32) -> Result<Page<Product>> {
        let (delay, result) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("fetch issued with no scripted response left");
        tokio::time::sleep(delay).await;
        result
    }
}

/// Fetcher over a fixed product list, paginated two per page, recording
/// every call it receives.
pub struct RecordingFetcher {
    items: Vec<Product>,
    pub calls: Mutex<Vec<(FilterSet, u32)>>,
}

pub const FIXTURE_PER_PAGE: usize = 2;

impl RecordingFetcher {
    pub fn new(items: Vec<Product>) -> Arc<Self> {
        Arc::new(Self {
            items,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ListFetcher<Product> for RecordingFetcher {
    async fn fetch(&self, filters: &FilterSet, page: u32) -> Result<Page<Product>> {
        self.calls.lock().unwrap().push((filters.clone(), page));
        let total = self.items.len();
        let last_page = total.div_ceil(FIXTURE_PER_PAGE).max(1) as u32;
        let start = (page as usize - 1) * FIXTURE_PER_PAGE;
        let items: Vec<Product> = self
            .items
            .iter()
            .skip(start)
            .take(FIXTURE_PER_PAGE)
            .cloned()
            .collect();
        Ok(page_of(items, page, last_page, total as u64))
    }
}

/// Vendor endpoint double with scripted outcomes and a per-call delay.
pub struct FixtureVendor {
    pub toggle_results: Mutex<VecDeque<Result<()>>>,
    pub delete_results: Mutex<VecDeque<Result<()>>>,
    pub toggle_calls: Mutex<Vec<(String, bool)>>,
    pub delete_calls: Mutex<Vec<String>>,
    pub delay: Duration,
}

impl FixtureVendor {
    pub fn new() -> Arc<Self> {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            toggle_results: Mutex::new(VecDeque::new()),
            delete_results: Mutex::new(VecDeque::new()),
            toggle_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            delay,
        })
    }

    pub fn script_toggle(&self, result: Result<()>) {
        self.toggle_results.lock().unwrap().push_back(result);
    }

    pub fn script_delete(&self, result: Result<()>) {
        self.delete_results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl VendorCatalog for FixtureVendor {
    async fn create_product(&self, _shop_slug: &str, _product: &NewProduct) -> Result<Product> {
        Err(DukkanError::config("create_product not scripted"))
    }

    async fn set_product_active(
        &self,
        _shop_slug: &str,
        product_slug: &str,
        active: bool,
    ) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.toggle_calls
            .lock()
            .unwrap()
            .push((product_slug.to_string(), active));
        self.toggle_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn delete_product(&self, _shop_slug: &str, product_slug: &str) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.delete_calls
            .lock()
            .unwrap()
            .push(product_slug.to_string());
        self.delete_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn upload_image(
        &self,
        _shop_slug: &str,
        _product_slug: &str,
        filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<ProductImage> {
        Ok(ProductImage {
            id: 1,
            url: format!("https://cdn.test/{filename}"),
        })
    }

    async fn delete_image(
        &self,
        _shop_slug: &str,
        _product_slug: &str,
        _image_id: u64,
    ) -> Result<()> {
        Ok(())
    }
}

/// In-memory catalog fixture for resolver and slug-resolution tests.
pub struct FixtureCatalog {
    pub subcategories: HashMap<String, Vec<Subcategory>>,
    /// Per-category artificial resolution delay.
    pub delays: HashMap<String, Duration>,
    pub shops: Vec<Shop>,
    pub subcategory_calls: Mutex<u32>,
}

impl FixtureCatalog {
    pub fn new() -> Self {
        let mut subcategories = HashMap::new();
        subcategories.insert(
            "clothes".to_string(),
            vec![
                subcategory("shirts", "clothes"),
                subcategory("jeans", "clothes"),
            ],
        );
        subcategories.insert(
            "shoes".to_string(),
            vec![
                subcategory("sneakers", "shoes"),
                subcategory("boots", "shoes"),
            ],
        );
        Self {
            subcategories,
            delays: HashMap::new(),
            shops: vec![shop(7, "corner-bakery")],
            subcategory_calls: Mutex::new(0),
        }
    }

    pub fn with_delay(mut self, category: &str, delay: Duration) -> Self {
        self.delays.insert(category.to_string(), delay);
        self
    }
}

#[async_trait]
impl CatalogSource for FixtureCatalog {
    async fn list_products(&self, _filters: &FilterSet, page: u32) -> Result<Page<Product>> {
        Ok(page_of(Vec::new(), page, 1, 0))
    }

    async fn list_shops(&self, _filters: &FilterSet, page: u32) -> Result<Page<Shop>> {
        let _ = page;
        Err(DukkanError::config("not used by these tests"))
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self
            .subcategories
            .keys()
            .map(|slug| Category {
                slug: slug.clone(),
                name: slug.clone(),
            })
            .collect())
    }

    async fn subcategories(&self, category_slug: &str) -> Result<Vec<Subcategory>> {
        if let Some(delay) = self.delays.get(category_slug) {
            tokio::time::sleep(*delay).await;
        }
        *self.subcategory_calls.lock().unwrap() += 1;
        self.subcategories
            .get(category_slug)
            .cloned()
            .ok_or_else(|| DukkanError::from_status(404, format!("no category {category_slug}")))
    }

    async fn suggestions(&self, _query: &str) -> Result<Vec<Suggestion>> {
        Ok(Vec::new())
    }

    async fn shop_by_slug(&self, slug: &str) -> Result<Shop> {
        self.shops
            .iter()
            .find(|s| s.slug == slug)
            .cloned()
            .ok_or_else(|| DukkanError::from_status(404, format!("no shop {slug}")))
    }
}

/// In-memory token store for auth side-effect tests.
#[derive(Default)]
pub struct MemTokens {
    token: Mutex<Option<String>>,
}

impl MemTokens {
    pub fn with_token(token: &str) -> Arc<Self> {
        Arc::new(Self {
            token: Mutex::new(Some(token.to_string())),
        })
    }
}

impl TokenStore for MemTokens {
    fn get(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}
