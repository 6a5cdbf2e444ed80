use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use transitplan_infra::planning::ScheduleCommand;

use crate::app::dto;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_schedule).get(list_schedules))
        .route("/:schedule_id", get(get_schedule))
}

pub async fn create_schedule(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<ScheduleCommand>,
) -> axum::response::Response {
    match services
        .run(move |planning| planning.generate_schedule(body))
        .await
    {
        Ok(schedule) => (StatusCode::CREATED, Json(schedule)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn list_schedules(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::AssetQuery>,
) -> axum::response::Response {
    let asset_id = match query.asset_id() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .run(move |planning| planning.list_schedules(asset_id.as_ref()))
        .await
    {
        Ok(items) => Json(dto::ListResponse::from(items)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn get_schedule(
    Extension(services): Extension<Arc<AppServices>>,
    Path(schedule_id): Path<String>,
) -> axum::response::Response {
    let schedule_id = match dto::parse_schedule_id(&schedule_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .run(move |planning| planning.schedule(&schedule_id))
        .await
    {
        Ok(schedule) => Json(schedule).into_response(),
        Err(resp) => resp,
    }
}
