//! Filter state for listing screens and its query-string codec.

pub mod codec;
pub mod model;

pub use codec::{decode, encode};
pub use model::{FilterSet, Proximity, SortOrder};
