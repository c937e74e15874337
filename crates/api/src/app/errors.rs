use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use campusnav_core::DomainError;

/// Error body shared by every failing endpoint: `{ success: false, message }`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, msg),
    }
}

/// Parse a path identifier, answering 400 with `message` on failure.
pub fn parse_id<T>(raw: &str, message: &'static str) -> Result<T, axum::response::Response>
where
    T: core::str::FromStr<Err = DomainError>,
{
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, message))
}

/// Success body: `{ success: true, data }`.
pub fn json_ok(status: StatusCode, data: impl serde::Serialize) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": true,
            "data": data,
        })),
    )
        .into_response()
}

/// Unwrap a JSON body, answering 400 when it is malformed.
pub fn json_body<T>(
    body: Result<axum::Json<T>, axum::extract::rejection::JsonRejection>,
) -> Result<T, axum::response::Response> {
    body.map(|axum::Json(value)| value)
        .map_err(|rejection| json_error(StatusCode::BAD_REQUEST, rejection.body_text()))
}

/// Unwrap a query string, answering 400 when it is malformed.
pub fn query_params<T>(
    query: Result<axum::extract::Query<T>, axum::extract::rejection::QueryRejection>,
) -> Result<T, axum::response::Response> {
    query
        .map(|axum::extract::Query(value)| value)
        .map_err(|rejection| json_error(StatusCode::BAD_REQUEST, rejection.body_text()))
}
