// src/handlers/upload_auth_handlers.rs
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpResponse};
use log::error;

use crate::AppState;
use crate::handlers::error_response;

/// GET /api/auth/imagekit
/// Issues a one-off `{signature, expire, token}` triple for a direct upload.
#[get("/auth/imagekit")]
pub async fn imagekit_auth(app_state: web::Data<AppState>) -> HttpResponse {
    match app_state.upload_auth.authentication_parameters() {
        Ok(auth) => HttpResponse::Ok().json(auth),
        Err(e) => {
            error!("failed to sign upload credentials: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Image upload authentication is not available",
            )
        }
    }
}
