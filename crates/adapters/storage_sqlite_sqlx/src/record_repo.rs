//! `SQLite` implementation of [`RecordRepository`].

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, FromRow, Row};

use rfid_api_app::ports::RecordRepository;
use rfid_api_domain::error::RfidError;
use rfid_api_domain::id::RecordId;
use rfid_api_domain::page::{Page, PageRequest};
use rfid_api_domain::record::{NewRecord, Payload, Record};
use rfid_api_domain::time;

use crate::database::{Database, release};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Record);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let data_json: String = row.try_get("data")?;
        let timestamp_str: String = row.try_get("timestamp")?;

        let data: serde_json::Value =
            serde_json::from_str(&data_json).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let timestamp =
            time::parse(&timestamp_str).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Record {
            id: RecordId::from_i64(id),
            data: Payload::from(data),
            timestamp,
        }))
    }
}

const INSERT: &str = "INSERT INTO rfid_data (data, timestamp) VALUES (?, ?)";

const COUNT: &str = "SELECT COUNT(*) FROM rfid_data";

const SELECT_PAGE: &str = r"
    SELECT id, data, timestamp FROM rfid_data
    ORDER BY timestamp DESC, id DESC
    LIMIT ? OFFSET ?
";

/// `SQLite`-backed record repository.
///
/// Holds no connection. Each call opens one, uses it, and closes it.
pub struct SqliteRecordRepository {
    database: Database,
}

impl SqliteRecordRepository {
    /// Create a new repository over the given database.
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    async fn insert(conn: &mut SqliteConnection, record: &NewRecord) -> Result<i64, StorageError> {
        let mut tx = conn.begin().await?;
        let result = sqlx::query(INSERT)
            .bind(record.data.to_json_string())
            .bind(time::format(&record.timestamp))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.last_insert_rowid())
    }

    async fn select_page(
        conn: &mut SqliteConnection,
        request: PageRequest,
    ) -> Result<Page<Record>, StorageError> {
        let total: i64 = sqlx::query_scalar(COUNT).fetch_one(&mut *conn).await?;
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
            .bind(request.per_page())
            .bind(request.offset())
            .fetch_all(&mut *conn)
            .await?;

        let total = u64::try_from(total).unwrap_or_default();
        let items = rows.into_iter().map(|w| w.0).collect();
        Ok(Page::new(items, total, request))
    }
}

impl RecordRepository for SqliteRecordRepository {
    async fn append(&self, record: NewRecord) -> Result<Record, RfidError> {
        let mut conn = self.database.connect().await?;
        // Dropping an uncommitted transaction on error rolls it back.
        let inserted = Self::insert(&mut conn, &record).await;
        release(conn).await;

        let id = inserted?;
        Ok(record.into_record(RecordId::from_i64(id)))
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Record>, RfidError> {
        let mut conn = self.database.connect().await?;
        let page = Self::select_page(&mut conn, request).await;
        release(conn).await;

        Ok(page?)
    }
}
