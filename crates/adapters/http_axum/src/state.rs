//! Shared application state for axum handlers.

use std::sync::Arc;

use rfid_api_app::ports::RecordRepository;
use rfid_api_app::services::record_service::RecordService;
use rfid_api_domain::auth::ApiKey;

/// Application state shared across all axum handlers.
///
/// Generic over the record repository to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<RR> {
    /// Ingest and paging use-cases.
    pub record_service: Arc<RecordService<RR>>,
    /// Credential every `/rfid` request must present.
    pub api_key: Arc<ApiKey>,
}

impl<RR> Clone for AppState<RR> {
    fn clone(&self) -> Self {
        Self {
            record_service: Arc::clone(&self.record_service),
            api_key: Arc::clone(&self.api_key),
        }
    }
}

impl<RR> AppState<RR>
where
    RR: RecordRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service and the configured key.
    pub fn new(record_service: RecordService<RR>, api_key: ApiKey) -> Self {
        Self {
            record_service: Arc::new(record_service),
            api_key: Arc::new(api_key),
        }
    }
}
