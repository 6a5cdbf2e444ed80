use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use transitplan_infra::planning::VoteCommand;
use transitplan_maintenance::ReportInput;

use crate::app::dto;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(submit_report).get(list_reports))
        .route("/:report_id", get(get_report))
        .route("/:report_id/votes", post(vote_on_report))
}

pub async fn submit_report(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<ReportInput>,
) -> axum::response::Response {
    match services.run(move |planning| planning.submit_report(body)).await {
        Ok(report) => (StatusCode::CREATED, Json(report)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn list_reports(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::AssetQuery>,
) -> axum::response::Response {
    let asset_id = match query.asset_id() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .run(move |planning| planning.list_reports(asset_id.as_ref()))
        .await
    {
        Ok(items) => Json(dto::ListResponse::from(items)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn get_report(
    Extension(services): Extension<Arc<AppServices>>,
    Path(report_id): Path<String>,
) -> axum::response::Response {
    let report_id = match dto::parse_report_id(&report_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.run(move |planning| planning.report(&report_id)).await {
        Ok(report) => Json(report).into_response(),
        Err(resp) => resp,
    }
}

pub async fn vote_on_report(
    Extension(services): Extension<Arc<AppServices>>,
    Path(report_id): Path<String>,
    ApiJson(body): ApiJson<VoteCommand>,
) -> axum::response::Response {
    let report_id = match dto::parse_report_id(&report_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .run(move |planning| planning.vote_on_report(&report_id, body))
        .await
    {
        Ok(report) => Json(report).into_response(),
        Err(resp) => resp,
    }
}
