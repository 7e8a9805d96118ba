//! Process-wide UI state shared across screens.
//!
//! Holds the current navigational view and the global search text. Writes
//! are last-writer-wins; the store only exposes an enumerated set of
//! setters, never ambient field mutation.
//!
//! This is the seam for the hosting UI shell: a shell creates one store at
//! startup, routes on `view`, and feeds `nav_search` edits through a
//! debounced input channel. The headless crates (and the one-shot CLI)
//! define the store but do not drive it.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// The screen the user is currently on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "view", content = "slug")]
pub enum View {
    #[default]
    Storefront,
    ShopDetail(String),
    VendorDashboard,
    Login,
}

/// Snapshot of the shared UI state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiState {
    pub view: View,
    pub nav_search: String,
}

/// Cheap-to-clone handle to the process-wide UI state.
///
/// Session-scoped: created once at startup, `reset` restores defaults on
/// demand (e.g. logout).
#[derive(Debug, Clone, Default)]
pub struct UiStore {
    inner: Arc<Mutex<UiState>>,
}

impl UiStore {
    /// Creates a store with default state (storefront view, empty search).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the current state.
    pub fn snapshot(&self) -> UiState {
        self.inner.lock().expect("ui state lock poisoned").clone()
    }

    /// Switches the current view.
    pub fn set_view(&self, view: View) {
        self.inner.lock().expect("ui state lock poisoned").view = view;
    }

    /// Replaces the global navigation search text.
    pub fn set_nav_search(&self, text: impl Into<String>) {
        self.inner
            .lock()
            .expect("ui state lock poisoned")
            .nav_search = text.into();
    }

    /// Restores the default state.
    pub fn reset(&self) {
        *self.inner.lock().expect("ui state lock poisoned") = UiState::default();
    }
}
