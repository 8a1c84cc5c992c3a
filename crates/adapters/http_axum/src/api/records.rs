//! JSON REST handlers for scan records.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use rfid_api_app::ports::RecordRepository;
use rfid_api_domain::page::{Page, PageRequest, Pagination};
use rfid_api_domain::record::{Payload, Record};

use crate::error::ApiError;
use crate::state::AppState;

const SUCCESS: &str = "success";

/// Query parameters for the list endpoint. Both default when absent.
#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Body returned once a record is stored.
#[derive(Serialize)]
pub struct StoredBody {
    status: &'static str,
    message: &'static str,
}

/// Body returned by the list endpoint.
#[derive(Serialize)]
pub struct ListBody {
    status: &'static str,
    data: Vec<Record>,
    pagination: Pagination,
}

impl From<Page<Record>> for ListBody {
    fn from(page: Page<Record>) -> Self {
        Self {
            status: SUCCESS,
            data: page.items,
            pagination: page.pagination,
        }
    }
}

/// Possible responses from the ingest endpoint.
pub enum IngestResponse {
    Stored,
}

impl IntoResponse for IngestResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Stored => Json(StoredBody {
                status: SUCCESS,
                message: "Data stored successfully",
            })
            .into_response(),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<ListBody>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /rfid`
///
/// The body is parsed as JSON whatever the `Content-Type` says.
pub async fn ingest<RR>(
    State(state): State<AppState<RR>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<IngestResponse, ApiError>
where
    RR: RecordRepository + Send + Sync + 'static,
{
    let payload = Payload::from_slice(&body?)?;
    state.record_service.ingest(payload).await?;
    Ok(IngestResponse::Stored)
}

/// `GET /rfid?page=&per_page=`
pub async fn list<RR>(
    State(state): State<AppState<RR>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ListResponse, ApiError>
where
    RR: RecordRepository + Send + Sync + 'static,
{
    let Query(params) = query?;
    let request = PageRequest::from_parts(params.page, params.per_page)?;
    let page = state.record_service.list_records(request).await?;
    Ok(ListResponse::Ok(Json(page.into())))
}
