//! Mapping dispatch results onto HTTP responses.
//!
//! # Responsibilities
//! - Choose the status code for a dispatch result
//! - Redirect to canonical paths, keeping the query string
//! - Serialize the result as the JSON body
//!
//! # Design Decisions
//! - A canonical path wins over every status: `/foo` answered by `foo/`
//!   redirects even though the directory is unindexed
//! - `Location` is percent-encoded; wildcard captures may hold any text

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::dispatch::{DispatchResult, DispatchStatus};

/// Characters escaped in a `Location` path. `/` is kept.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Status code for a result.
pub fn status_for(result: &DispatchResult) -> StatusCode {
    if result.canonical.is_some() {
        return StatusCode::MOVED_PERMANENTLY;
    }
    match result.status {
        DispatchStatus::Okay => StatusCode::OK,
        DispatchStatus::Unindexed => StatusCode::FORBIDDEN,
        DispatchStatus::Missing => StatusCode::NOT_FOUND,
    }
}

/// `Location` value for `canonical`, with `query` appended when present.
pub fn location(canonical: &str, query: Option<&str>) -> String {
    let path = utf8_percent_encode(canonical, PATH).to_string();
    match query {
        Some(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path,
    }
}

/// Build the response for `result`.
pub fn dispatch_response(result: DispatchResult, query: Option<&str>) -> Response {
    let status = status_for(&result);
    let redirect = result
        .canonical
        .as_deref()
        .map(|canonical| location(canonical, query));

    let mut response = (status, Json(result)).into_response();
    if let Some(target) = redirect {
        match HeaderValue::from_str(&target) {
            Ok(value) => {
                response.headers_mut().insert(header::LOCATION, value);
            }
            Err(error) => {
                tracing::error!(location = %target, %error, "Unusable redirect target");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    }
    response
}

/// Response for a path that cannot be decoded.
pub fn bad_path(error: impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": error.to_string() })),
    )
        .into_response()
}
