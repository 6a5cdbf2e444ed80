use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use transitplan_core::DomainError;
use transitplan_infra::PlanningError;

pub fn planning_error_to_response(err: PlanningError) -> axum::response::Response {
    match err {
        PlanningError::Domain(e) => domain_error_to_response(e),
        PlanningError::Storage(e) => {
            tracing::error!("storage failure: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::InvalidParameter { field, .. } => json_field_error(
            StatusCode::BAD_REQUEST,
            "invalid_parameter",
            message,
            field,
        ),
        DomainError::ArithmeticDegenerate(_) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "arithmetic_degenerate", message)
        }
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", message),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn json_field_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    field: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
            "field": field.into(),
        })),
    )
        .into_response()
}
