//! Paginated fetch orchestration for listing screens.
//!
//! One [`ListController`] owns one screen's filter set, page number, and
//! in-memory item sequence. Every request is minted a token; a response is
//! applied only while its token is still the latest, so overlapping
//! requests settle to the result of the last one issued regardless of
//! completion order.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use dukkan_core::catalog::{CatalogSource, Product, Shop, TokenStore};
use dukkan_core::error::{DukkanError, ErrorKind, Result};
use dukkan_core::filter::FilterSet;
use dukkan_core::pagination::{Page, PaginationMeta};

use crate::events::ControllerEvent;

/// How long the auth error stays visible before the redirect event fires.
pub const AUTH_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// The mutually exclusive phases of a listing screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    /// A request is in flight and no result has been applied yet.
    Loading,
    /// The latest request failed; `kind` selects the recovery affordance.
    Error { kind: ErrorKind, message: String },
    /// The latest request succeeded.
    Ready { items: Vec<T>, meta: PaginationMeta },
}

/// Fetches one page of items for a filter set.
#[async_trait]
pub trait ListFetcher<T>: Send + Sync {
    async fn fetch(&self, filters: &FilterSet, page: u32) -> Result<Page<T>>;
}

/// Product listing backed by any [`CatalogSource`].
pub struct ProductFetcher(pub Arc<dyn CatalogSource>);

#[async_trait]
impl ListFetcher<Product> for ProductFetcher {
    async fn fetch(&self, filters: &FilterSet, page: u32) -> Result<Page<Product>> {
        self.0.list_products(filters, page).await
    }
}

/// Shop listing backed by any [`CatalogSource`].
pub struct ShopFetcher(pub Arc<dyn CatalogSource>);

#[async_trait]
impl ListFetcher<Shop> for ShopFetcher {
    async fn fetch(&self, filters: &FilterSet, page: u32) -> Result<Page<Shop>> {
        self.0.list_shops(filters, page).await
    }
}

/// Resolves a shop slug to its id before the list request may go out.
#[async_trait]
pub trait SlugResolver: Send + Sync {
    async fn shop_id(&self, slug: &str) -> Result<u64>;
}

#[async_trait]
impl<S: CatalogSource + ?Sized> SlugResolver for S {
    async fn shop_id(&self, slug: &str) -> Result<u64> {
        Ok(self.shop_by_slug(slug).await?.id)
    }
}

struct ListState<T> {
    filters: FilterSet,
    page: u32,
    /// Shop slug awaiting resolution; while set, no list request goes out.
    pending_shop_slug: Option<String>,
    phase: Phase<T>,
    /// Token of the most recently issued request.
    latest_token: u64,
}

/// Controller for one paginated listing screen.
///
/// Cheap to clone; clones share the same state.
pub struct ListController<T> {
    fetcher: Arc<dyn ListFetcher<T>>,
    slug_resolver: Option<Arc<dyn SlugResolver>>,
    token_store: Option<Arc<dyn TokenStore>>,
    events: UnboundedSender<ControllerEvent>,
    state: Arc<Mutex<ListState<T>>>,
}

impl<T> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            slug_resolver: self.slug_resolver.clone(),
            token_store: self.token_store.clone(),
            events: self.events.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> ListController<T> {
    /// Creates a controller in the initial `Loading` phase with no
    /// constraints and page 1.
    pub fn new(fetcher: Arc<dyn ListFetcher<T>>, events: UnboundedSender<ControllerEvent>) -> Self {
        Self {
            fetcher,
            slug_resolver: None,
            token_store: None,
            events,
            state: Arc::new(Mutex::new(ListState {
                filters: FilterSet::new(),
                page: 1,
                pending_shop_slug: None,
                phase: Phase::Loading,
                latest_token: 0,
            })),
        }
    }

    /// Enables shop-slug dependency resolution.
    pub fn with_slug_resolver(mut self, resolver: Arc<dyn SlugResolver>) -> Self {
        self.slug_resolver = Some(resolver);
        self
    }

    /// Enables the credential-clearing side effect on auth failures.
    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// A clone of the current phase.
    pub fn snapshot(&self) -> Phase<T> {
        self.lock().phase.clone()
    }

    /// The current filter set (page number excluded).
    pub fn filters(&self) -> FilterSet {
        self.lock().filters.clone()
    }

    /// The current page number.
    pub fn page(&self) -> u32 {
        self.lock().page
    }

    /// Sets filters, shop slug, and page in one step and issues a single
    /// request. Meant for screen entry, where all three arrive together
    /// from the URL.
    pub async fn load(&self, filters: FilterSet, shop_slug: Option<String>, page: u32) {
        {
            let mut state = self.lock();
            let mut filters = filters;
            filters.page = None;
            state.filters = filters;
            state.pending_shop_slug = shop_slug;
            state.page = page.max(1);
        }
        self.issue().await;
    }

    /// Replaces the filter set and re-issues the request.
    ///
    /// Changing any constraint forces the page back to 1; a filter set
    /// equal to the current one keeps the page where it is.
    pub async fn set_filters(&self, filters: FilterSet) {
        {
            let mut state = self.lock();
            // Page is tracked by the controller, never inside the set.
            let mut filters = filters;
            filters.page = None;
            if !filters.same_constraints(&state.filters) {
                state.page = 1;
            }
            state.filters = filters;
        }
        self.issue().await;
    }

    /// Changes only the page number and re-issues the request. All other
    /// filters are left untouched.
    pub async fn set_page(&self, page: u32) {
        {
            let mut state = self.lock();
            state.page = page.max(1);
        }
        self.issue().await;
    }

    /// Constrains the listing to a shop by slug. The slug is resolved to a
    /// shop id before any list request is issued.
    pub async fn set_shop_slug(&self, slug: Option<String>) {
        {
            let mut state = self.lock();
            state.pending_shop_slug = slug;
            state.filters.shop_id = None;
            state.page = 1;
        }
        self.issue().await;
    }

    /// Clears every constraint (the `validation` recovery affordance) and
    /// re-issues the request.
    pub async fn clear_filters(&self) {
        {
            let mut state = self.lock();
            state.filters = FilterSet::new();
            state.pending_shop_slug = None;
            state.page = 1;
        }
        self.issue().await;
    }

    /// Re-issues the request for the current filters and page.
    pub async fn refresh(&self) {
        self.issue().await;
    }

    /// Runs `apply` against the in-memory items and metadata, if the
    /// controller is in the `Ready` phase. Used by optimistic mutations.
    pub(crate) fn mutate_items<R>(
        &self,
        apply: impl FnOnce(&mut Vec<T>, &mut PaginationMeta) -> R,
    ) -> Option<R> {
        let mut state = self.lock();
        match &mut state.phase {
            Phase::Ready { items, meta } => Some(apply(items, meta)),
            _ => None,
        }
    }

    /// Issues one request: mint a token, resolve the shop-slug dependency
    /// if one is pending, fetch, and apply the result only if the token is
    /// still the latest.
    async fn issue(&self) {
        let (token, pending_slug) = {
            let mut state = self.lock();
            state.latest_token += 1;
            state.phase = Phase::Loading;
            (state.latest_token, state.pending_shop_slug.clone())
        };

        // Dependency first: the list request must not go out while the
        // shop slug is unresolved.
        if let Some(slug) = pending_slug {
            let resolution = match &self.slug_resolver {
                Some(resolver) => resolver.shop_id(&slug).await,
                None => Err(DukkanError::config("no slug resolver configured")),
            };
            let mut state = self.lock();
            if state.latest_token != token {
                tracing::debug!(token, "stale slug resolution dropped");
                return;
            }
            match resolution {
                Ok(shop_id) => {
                    state.filters.shop_id = Some(shop_id);
                    state.pending_shop_slug = None;
                }
                Err(e) => {
                    drop(state);
                    self.apply_error(token, e);
                    return;
                }
            }
        }

        let (filters, page) = {
            let state = self.lock();
            (state.filters.clone(), state.page)
        };

        match self.fetcher.fetch(&filters, page).await {
            Ok(result) => {
                let mut state = self.lock();
                if state.latest_token != token {
                    tracing::debug!(token, "stale list response dropped");
                    return;
                }
                state.phase = Phase::Ready {
                    items: result.items,
                    meta: result.meta,
                };
            }
            Err(e) => self.apply_error(token, e),
        }
    }

    /// Applies a classified error phase, with the auth side effects.
    fn apply_error(&self, token: u64, error: DukkanError) {
        {
            let mut state = self.lock();
            if state.latest_token != token {
                tracing::debug!(token, "stale error dropped");
                return;
            }
            state.phase = Phase::Error {
                kind: error.kind(),
                message: error.to_string(),
            };
        }

        if error.is_auth() {
            tracing::warn!("auth failure: clearing credentials");
            if let Some(store) = &self.token_store {
                if let Err(e) = store.clear() {
                    tracing::warn!(error = %e, "failed to clear stored token");
                }
            }
            // The error stays visible for a moment before the redirect.
            let events = self.events.clone();
            tokio::spawn(async move {
                tokio::time::sleep(AUTH_REDIRECT_DELAY).await;
                let _ = events.send(ControllerEvent::RedirectToLogin);
            });
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState<T>> {
        self.state.lock().expect("list state lock poisoned")
    }
}
