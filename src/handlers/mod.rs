pub mod post_handlers;
pub mod upload_auth_handlers;

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::<()> {
        status: "error".to_string(),
        message: message.into(),
        data: None,
    })
}

/// Malformed or incomplete JSON bodies -> 400 in the usual envelope.
pub(crate) fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("rejected body for {}: {}", req.path(), err);
    let status = match &err {
        JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let resp = error_response(status, format!("Invalid request body: {err}"));
    InternalError::from_response(err, resp).into()
}

/// Unparseable path segments (e.g. a bad post id) are unknown resources.
pub(crate) fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    debug!("unmatched path parameters for {}: {}", req.path(), err);
    let resp = error_response(StatusCode::NOT_FOUND, "Post not found");
    InternalError::from_response(err, resp).into()
}

pub(crate) fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let resp = error_response(StatusCode::BAD_REQUEST, format!("Invalid query: {err}"));
    InternalError::from_response(err, resp).into()
}

pub async fn not_found() -> HttpResponse {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}
