//! JSON body extraction with API-shaped rejections.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use serde::de::DeserializeOwned;

use crate::app::errors;

/// `Json<T>` whose rejections carry the `invalid_parameter` error body.
///
/// A value of the wrong type or a missing field answers 400 with `field` set to
/// its path (`"lifespan_years"`, `"tasks[0].priority"`). A body that is not
/// JSON at all names the field `"body"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Err(errors::json_error(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported_media_type",
                "expected `Content-Type: application/json`",
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| errors::json_error(e.status(), "invalid_body", e.body_text()))?;

        decode(&bytes).map(ApiJson)
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| {
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Response> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(rejection)?;
    deserializer.end().map_err(|e| malformed_body(&e))?;
    Ok(value)
}

fn rejection(err: serde_path_to_error::Error<serde_json::Error>) -> Response {
    let path = err.path().to_string();
    let inner = err.into_inner();
    if inner.is_syntax() || inner.is_eof() {
        return malformed_body(&inner);
    }

    let field = field_path(&path, &inner.to_string());
    errors::json_field_error(
        StatusCode::BAD_REQUEST,
        "invalid_parameter",
        format!("invalid parameter `{field}`: {inner}"),
        field,
    )
}

fn malformed_body(err: &serde_json::Error) -> Response {
    errors::json_field_error(
        StatusCode::BAD_REQUEST,
        "invalid_parameter",
        format!("malformed JSON body: {err}"),
        "body",
    )
}

/// serde reports a missing field at the path of the object that lacks it.
fn field_path(path: &str, message: &str) -> String {
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());
    match (path, missing) {
        (".", Some(name)) => name.to_string(),
        (_, Some(name)) => format!("{path}.{name}"),
        (".", None) => "body".to_string(),
        (_, None) => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde::Deserialize;

    #[allow(dead_code)]
    #[derive(Debug, Deserialize)]
    struct Task {
        task_id: String,
        base_frequency_days: i64,
    }

    #[allow(dead_code)]
    #[derive(Debug, Deserialize)]
    struct Command {
        lifespan_years: u32,
        #[serde(default)]
        tasks: Vec<Task>,
    }

    async fn field_of(response: Response) -> serde_json::Value {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "invalid_parameter");
        json["field"].clone()
    }

    #[tokio::test]
    async fn wrong_type_names_the_field_path() {
        let err = decode::<Command>(br#"{"lifespan_years": -5}"#).unwrap_err();
        assert_eq!(field_of(err).await, "lifespan_years");

        let err = decode::<Command>(
            br#"{"lifespan_years": 5, "tasks": [{"task_id": "a", "base_frequency_days": "x"}]}"#,
        )
        .unwrap_err();
        assert_eq!(field_of(err).await, "tasks[0].base_frequency_days");
    }

    #[tokio::test]
    async fn missing_field_is_named() {
        let err = decode::<Command>(br#"{}"#).unwrap_err();
        assert_eq!(field_of(err).await, "lifespan_years");

        let err = decode::<Command>(br#"{"lifespan_years": 1, "tasks": [{"task_id": "a"}]}"#)
            .unwrap_err();
        assert_eq!(field_of(err).await, "tasks[0].base_frequency_days");
    }

    #[tokio::test]
    async fn syntax_errors_point_at_the_body() {
        let err = decode::<Command>(b"{ not json").unwrap_err();
        assert_eq!(field_of(err).await, "body");

        let err = decode::<Command>(br#"{"lifespan_years": 1} trailing"#).unwrap_err();
        assert_eq!(field_of(err).await, "body");
    }

    #[test]
    fn json_content_types_are_recognised() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json(&headers));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json(&headers));
    }
}
