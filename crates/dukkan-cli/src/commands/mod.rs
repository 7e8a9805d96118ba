pub mod auth;
pub mod browse;
pub mod vendor;

use std::sync::Arc;

use anyhow::Result;

use dukkan_api::{ApiCatalog, ApiConfig, ApiVendor, FileTokenStore, HttpClient};
use dukkan_controller::Phase;
use dukkan_core::error::ErrorKind;
use dukkan_core::pagination::PaginationMeta;

/// The API clients every command starts from.
pub(crate) struct Api {
    pub catalog: Arc<ApiCatalog>,
    pub vendor: Arc<ApiVendor>,
    pub tokens: Arc<FileTokenStore>,
}

pub(crate) fn connect() -> Result<Api> {
    let tokens = Arc::new(FileTokenStore::new()?);
    let http = HttpClient::new(ApiConfig::from_env(), tokens.clone());
    Ok(Api {
        catalog: Arc::new(ApiCatalog::new(http.clone())),
        vendor: Arc::new(ApiVendor::new(http)),
        tokens,
    })
}

/// Unwraps a settled listing phase, turning the error phase into a
/// message the shell user can act on.
pub(crate) fn settled<T>(phase: Phase<T>) -> Result<(Vec<T>, PaginationMeta)> {
    match phase {
        Phase::Ready { items, meta } => Ok((items, meta)),
        Phase::Error { kind, message } => {
            let hint = match kind {
                ErrorKind::Auth => "run `dukkan login <token>` and retry",
                ErrorKind::Validation => "adjust or drop the offending filter",
                ErrorKind::Network => "check the connection and retry",
                ErrorKind::Server | ErrorKind::Unknown => "retry in a moment",
            };
            anyhow::bail!("{message} ({hint})")
        }
        Phase::Loading => anyhow::bail!("request did not settle"),
    }
}

pub(crate) fn print_page_line(meta: &PaginationMeta) {
    println!(
        "page {}/{} ({} total)",
        meta.current_page, meta.last_page, meta.total
    );
}
