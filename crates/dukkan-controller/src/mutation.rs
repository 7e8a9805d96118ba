//! Optimistic mutations on the vendor's product list.
//!
//! Mutations are applied to the in-memory list immediately and reconciled
//! with the server afterwards: commit on success, rollback plus a user
//! notice on failure. Items are matched by id, never by list index, so a
//! rollback still lands (or safely no-ops) after the list was re-fetched
//! or re-ordered in the meantime.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc::UnboundedSender;

use dukkan_core::catalog::{Product, VendorCatalog};
use dukkan_core::filter::FilterSet;

use crate::events::{ControllerEvent, NoticeKind};
use crate::list::{ListController, Phase};

#[derive(Default)]
struct InFlight {
    toggles: HashSet<u64>,
    deletes: HashSet<u64>,
}

/// Applies optimistic mutations against one product list controller.
#[derive(Clone)]
pub struct MutationApplier {
    controller: ListController<Product>,
    vendor: Arc<dyn VendorCatalog>,
    shop_slug: String,
    events: UnboundedSender<ControllerEvent>,
    in_flight: Arc<Mutex<InFlight>>,
}

/// A pending delete awaiting the caller's modal confirmation.
///
/// Deletes are destructive, so nothing happens until [`confirm`] is
/// called; dropping the request aborts it. Toggles deliberately have no
/// such step (they are cheap to reverse).
///
/// [`confirm`]: DeleteRequest::confirm
#[must_use = "a delete does nothing until confirmed"]
pub struct DeleteRequest<'a> {
    applier: &'a MutationApplier,
    product_id: u64,
}

impl DeleteRequest<'_> {
    /// The id of the product this request would delete.
    pub fn product_id(&self) -> u64 {
        self.product_id
    }

    /// Confirms and dispatches the delete.
    pub async fn confirm(self) {
        self.applier.delete_confirmed(self.product_id).await;
    }
}

impl MutationApplier {
    pub fn new(
        controller: ListController<Product>,
        vendor: Arc<dyn VendorCatalog>,
        shop_slug: impl Into<String>,
        events: UnboundedSender<ControllerEvent>,
    ) -> Self {
        Self {
            controller,
            vendor,
            shop_slug: shop_slug.into(),
            events,
            in_flight: Arc::new(Mutex::new(InFlight::default())),
        }
    }

    /// Flips a product's active flag immediately, then reconciles with the
    /// server; reverts the flip and raises a notice on failure.
    ///
    /// A second toggle on the same product while one is in flight is
    /// ignored. Toggles on different products are independent.
    pub async fn toggle_active(&self, product_id: u64) {
        if !self.lock_in_flight().toggles.insert(product_id) {
            tracing::debug!(product_id, "toggle already in flight");
            return;
        }

        let flipped = self.controller.mutate_items(|items, _| {
            items.iter_mut().find(|p| p.id == product_id).map(|p| {
                let prior = p.is_active;
                p.is_active = !prior;
                (p.slug.clone(), prior)
            })
        });

        if let Some(Some((slug, prior))) = flipped {
            let result = self
                .vendor
                .set_product_active(&self.shop_slug, &slug, !prior)
                .await;
            if let Err(e) = result {
                tracing::warn!(product_id, error = %e, "toggle failed, reverting");
                // Match by id again: the list may have been re-fetched and
                // the item may be gone entirely, in which case this no-ops.
                self.controller.mutate_items(|items, _| {
                    if let Some(p) = items.iter_mut().find(|p| p.id == product_id) {
                        p.is_active = prior;
                    }
                });
                self.notify(NoticeKind::ToggleFailed, e.to_string());
            }
        }

        self.lock_in_flight().toggles.remove(&product_id);
    }

    /// Starts a delete. The returned request must be confirmed before
    /// anything is removed or dispatched.
    pub fn delete(&self, product_id: u64) -> DeleteRequest<'_> {
        DeleteRequest {
            applier: self,
            product_id,
        }
    }

    async fn delete_confirmed(&self, product_id: u64) {
        if !self.lock_in_flight().deletes.insert(product_id) {
            tracing::debug!(product_id, "delete already in flight");
            return;
        }

        // Remove immediately and remember where the item sat, so a failed
        // confirm can put it back without losing the user's place.
        let removed = self.controller.mutate_items(|items, meta| {
            items.iter().position(|p| p.id == product_id).map(|index| {
                let item = items.remove(index);
                meta.total = meta.total.saturating_sub(1);
                (index, item)
            })
        });

        if let Some(Some((index, item))) = removed {
            match self.vendor.delete_product(&self.shop_slug, &item.slug).await {
                Ok(()) => {
                    // Deleting the only item of a non-first page moves the
                    // user back one page.
                    let page = self.controller.page();
                    let emptied = matches!(
                        self.controller.snapshot(),
                        Phase::Ready { ref items, .. } if items.is_empty()
                    );
                    if emptied && page > 1 {
                        self.lock_in_flight().deletes.remove(&product_id);
                        self.controller.set_page(page - 1).await;
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!(product_id, error = %e, "delete failed, restoring");
                    self.controller.mutate_items(move |items, meta| {
                        let index = index.min(items.len());
                        items.insert(index, item);
                        meta.total += 1;
                    });
                    self.notify(NoticeKind::DeleteFailed, e.to_string());
                }
            }
        }

        self.lock_in_flight().deletes.remove(&product_id);
    }

    /// Uploads a product image; failures raise a distinct notice.
    pub async fn upload_image(&self, product_id: u64, filename: &str, bytes: Vec<u8>) {
        let slug = self.controller.mutate_items(|items, _| {
            items
                .iter()
                .find(|p| p.id == product_id)
                .map(|p| p.slug.clone())
        });
        let Some(Some(slug)) = slug else {
            return;
        };
        match self
            .vendor
            .upload_image(&self.shop_slug, &slug, filename, bytes)
            .await
        {
            Ok(image) => {
                self.controller.mutate_items(|items, _| {
                    if let Some(p) = items.iter_mut().find(|p| p.id == product_id) {
                        p.image_urls.push(image.url);
                    }
                });
            }
            Err(e) => {
                tracing::warn!(product_id, error = %e, "image upload failed");
                self.notify(NoticeKind::UploadFailed, e.to_string());
            }
        }
    }

    /// The filter set of the underlying controller (for UI display).
    pub fn filters(&self) -> FilterSet {
        self.controller.filters()
    }

    fn notify(&self, kind: NoticeKind, message: String) {
        let _ = self.events.send(ControllerEvent::Notice { kind, message });
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, InFlight> {
        self.in_flight.lock().expect("in-flight lock poisoned")
    }
}
