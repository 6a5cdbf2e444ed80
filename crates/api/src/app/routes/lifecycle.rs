use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use transitplan_infra::planning::LifecycleCostCommand;
use transitplan_maintenance::Rounded;

use crate::app::dto;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_analysis).get(list_analyses))
        .route("/:asset_id", get(get_analysis))
}

pub async fn create_analysis(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<LifecycleCostCommand>,
) -> axum::response::Response {
    match services
        .run(move |planning| planning.analyze_lifecycle(body))
        .await
    {
        Ok(analysis) => (StatusCode::CREATED, Json(analysis.rounded())).into_response(),
        Err(resp) => resp,
    }
}

pub async fn list_analyses(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::CategoryQuery>,
) -> axum::response::Response {
    match services
        .run(move |planning| planning.list_lifecycle_analyses(query.category.as_deref()))
        .await
    {
        Ok(items) => Json(dto::ListResponse::from(items.rounded())).into_response(),
        Err(resp) => resp,
    }
}

pub async fn get_analysis(
    Extension(services): Extension<Arc<AppServices>>,
    Path(asset_id): Path<String>,
) -> axum::response::Response {
    let asset_id = match dto::parse_asset_id(&asset_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .run(move |planning| planning.lifecycle_analysis(&asset_id))
        .await
    {
        Ok(analysis) => Json(analysis.rounded()).into_response(),
        Err(resp) => resp,
    }
}
