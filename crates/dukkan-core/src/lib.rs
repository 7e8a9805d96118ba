pub mod catalog;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod ui_state;

// Re-export common error type
pub use error::{DukkanError, ErrorKind, RecoveryAction, Result};
