//! Dependent filter resolution: category to subcategory.
//!
//! Whenever the parent category changes, the set of valid subcategories is
//! re-fetched and any selected subcategory that is no longer valid is
//! cleared in the same step, so no consumer ever observes a
//! selected-but-invalid child.

use std::sync::{Arc, Mutex};

use dukkan_core::catalog::{CatalogSource, Subcategory};
use dukkan_core::filter::FilterSet;

#[derive(Default)]
struct ResolverState {
    generation: u64,
    options: Vec<Subcategory>,
    selected: Option<String>,
}

/// Resolves the subcategory options valid under the current category.
#[derive(Clone)]
pub struct SubcategoryResolver {
    source: Arc<dyn CatalogSource>,
    state: Arc<Mutex<ResolverState>>,
}

impl SubcategoryResolver {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(ResolverState::default())),
        }
    }

    /// The currently valid subcategory options.
    pub fn options(&self) -> Vec<Subcategory> {
        self.lock().options.clone()
    }

    /// The currently selected subcategory, if any.
    pub fn selected(&self) -> Option<String> {
        self.lock().selected.clone()
    }

    /// Selects a subcategory. Returns false (and leaves the selection
    /// unchanged) when the slug is not among the current options.
    pub fn select(&self, slug: &str) -> bool {
        let mut state = self.lock();
        if state.options.iter().any(|o| o.slug == slug) {
            state.selected = Some(slug.to_string());
            true
        } else {
            false
        }
    }

    /// Clears the subcategory selection.
    pub fn clear_selection(&self) {
        self.lock().selected = None;
    }

    /// Re-resolves the options for a new parent category.
    ///
    /// `None` clears options and selection immediately, without a network
    /// call. A fetch failure logs and yields empty options rather than
    /// propagating. Overlapping resolutions follow latest-request-wins: a
    /// stale resolution that completes after a newer one started is
    /// discarded.
    pub async fn resolve(&self, parent: Option<&str>) {
        let Some(parent) = parent else {
            let mut state = self.lock();
            state.generation += 1;
            state.options.clear();
            state.selected = None;
            return;
        };

        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.generation
        };

        let options = match self.source.subcategories(parent).await {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!(category = parent, error = %e, "subcategory resolution failed");
                Vec::new()
            }
        };

        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(category = parent, "stale subcategory resolution dropped");
            return;
        }
        // Invalid child selection is cleared in the same critical section
        // as the options swap.
        if let Some(selected) = &state.selected {
            if !options.iter().any(|o| &o.slug == selected) {
                state.selected = None;
            }
        }
        state.options = options;
    }

    /// Applies the current category/subcategory pair to a filter set.
    pub fn apply_to(&self, filters: FilterSet) -> FilterSet {
        match self.selected() {
            Some(slug) => filters.with_subcategory(slug),
            None => filters.without_subcategory(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ResolverState> {
        self.state.lock().expect("resolver state lock poisoned")
    }
}
