//! Storage port — append-only persistence for scan records.

use std::future::Future;

use rfid_api_domain::error::RfidError;
use rfid_api_domain::page::{Page, PageRequest};
use rfid_api_domain::record::{NewRecord, Record};

/// Repository for persisting and paging [`Record`]s.
///
/// Implementations never update or delete rows. Ids are assigned by the
/// store and strictly increase.
pub trait RecordRepository {
    /// Persist a new record and return it with its assigned id.
    fn append(&self, record: NewRecord)
    -> impl Future<Output = Result<Record, RfidError>> + Send;

    /// Read one page of records ordered by timestamp descending (ties by id
    /// descending), together with the total number of stored records.
    fn find_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<Record>, RfidError>> + Send;
}
