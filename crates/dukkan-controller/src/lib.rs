//! Filtered-list controllers for the Dukkan client.
//!
//! The pieces every listing screen (products, shops, a vendor's own
//! products) is built from: a debounced search-input channel, dependent
//! filter resolution (category to subcategory, shop slug to shop id), a
//! paginated fetch orchestrator with stale-response suppression, and
//! optimistic mutations with rollback.

pub mod debounce;
pub mod dependent;
pub mod events;
pub mod list;
pub mod mutation;

pub use debounce::{DebouncedInput, LIST_SEARCH_DEBOUNCE, NAV_SEARCH_DEBOUNCE};
pub use dependent::SubcategoryResolver;
pub use events::{ControllerEvent, NoticeKind, channel};
pub use list::{
    AUTH_REDIRECT_DELAY, ListController, ListFetcher, Phase, ProductFetcher, ShopFetcher,
    SlugResolver,
};
pub use mutation::{DeleteRequest, MutationApplier};
