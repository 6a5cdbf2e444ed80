use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use transitplan_maintenance::{ConnectionInput, SyncOutcome};

use crate::app::dto;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_connection))
        .route("/:connection_id", get(get_connection))
        .route("/:connection_id/syncs", post(record_sync))
}

pub async fn create_connection(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<ConnectionInput>,
) -> axum::response::Response {
    match services
        .run(move |planning| planning.connect_system(body))
        .await
    {
        Ok(conn) => (StatusCode::CREATED, Json(conn)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn get_connection(
    Extension(services): Extension<Arc<AppServices>>,
    Path(connection_id): Path<String>,
) -> axum::response::Response {
    let connection_id = match dto::parse_connection_id(&connection_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .run(move |planning| planning.connection(&connection_id))
        .await
    {
        Ok(conn) => Json(conn).into_response(),
        Err(resp) => resp,
    }
}

pub async fn record_sync(
    Extension(services): Extension<Arc<AppServices>>,
    Path(connection_id): Path<String>,
    ApiJson(body): ApiJson<SyncOutcome>,
) -> axum::response::Response {
    let connection_id = match dto::parse_connection_id(&connection_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .run(move |planning| planning.record_connection_sync(&connection_id, body))
        .await
    {
        Ok(conn) => Json(conn).into_response(),
        Err(resp) => resp,
    }
}
