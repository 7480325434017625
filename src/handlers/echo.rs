use crate::routes;
use axum::{
    body::Bytes,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};

/// POST /echo handler - Return the request body unchanged
///
/// The request's `Content-Type`, when present, is mirrored on the response.
#[utoipa::path(
    post,
    path = routes::ECHO,
    request_body(content = String, description = "Any payload"),
    responses(
        (status = 200, description = "The request body, byte for byte", body = String)
    ),
    tag = "mock"
)]
pub async fn echo_handler(headers: HeaderMap, body: Bytes) -> Response {
    tracing::debug!("Echoing {} bytes", body.len());

    let mut response = body.into_response();
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type.clone());
    }
    response
}
