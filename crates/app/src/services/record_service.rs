//! Record service — use-cases for ingesting and browsing scan records.

use rfid_api_domain::error::RfidError;
use rfid_api_domain::page::{Page, PageRequest};
use rfid_api_domain::record::{NewRecord, Payload, Record};
use rfid_api_domain::time::now;

use crate::ports::RecordRepository;

/// Application service for the append-only record log.
pub struct RecordService<R> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stamp `payload` with the current UTC time and append it.
    ///
    /// The timestamp is always assigned here, never taken from the client.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn ingest(&self, payload: Payload) -> Result<Record, RfidError> {
        let record = self.repo.append(NewRecord::new(payload, now())).await?;
        tracing::info!(id = %record.id, "stored record");
        Ok(record)
    }

    /// Return one page of records, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_records(&self, request: PageRequest) -> Result<Page<Record>, RfidError> {
        let page = self.repo.find_page(request).await?;
        tracing::debug!(
            page = request.page(),
            per_page = request.per_page(),
            returned = page.items.len(),
            total = page.pagination.total,
            "listed records"
        );
        Ok(page)
    }
}
