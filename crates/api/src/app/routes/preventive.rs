use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use transitplan_infra::planning::PreventiveCommand;
use transitplan_maintenance::Rounded;

use crate::app::dto;
use crate::app::extract::ApiJson;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_plan))
        .route("/:asset_id", get(get_plan))
}

pub async fn create_plan(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<PreventiveCommand>,
) -> axum::response::Response {
    match services
        .run(move |planning| planning.optimize_preventive(body))
        .await
    {
        Ok(plan) => (StatusCode::CREATED, Json(plan.rounded())).into_response(),
        Err(resp) => resp,
    }
}

pub async fn get_plan(
    Extension(services): Extension<Arc<AppServices>>,
    Path(asset_id): Path<String>,
) -> axum::response::Response {
    let asset_id = match dto::parse_asset_id(&asset_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .run(move |planning| planning.preventive_plan(&asset_id))
        .await
    {
        Ok(plan) => Json(plan.rounded()).into_response(),
        Err(resp) => resp,
    }
}
