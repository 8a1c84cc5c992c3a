//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod records;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;

use rfid_api_app::ports::RecordRepository;
use rfid_api_domain::auth::ApiKey;

use crate::auth::require_api_key;
use crate::state::AppState;

/// Build the authenticated `/rfid` routes.
///
/// The key check is a route layer, so it only runs for matched routes and
/// always before the handler touches the body or query string.
pub fn routes<RR>(api_key: Arc<ApiKey>) -> Router<AppState<RR>>
where
    RR: RecordRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/rfid",
            get(records::list::<RR>).post(records::ingest::<RR>),
        )
        .route_layer(middleware::from_fn_with_state(api_key, require_api_key))
}
