pub mod client;
pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;

use actix_web::web;

use crate::handlers::{json_error_handler, not_found, path_error_handler, query_error_handler};
use crate::handlers::post_handlers::{create_post, delete_post, get_post, list_posts};
use crate::handlers::upload_auth_handlers::imagekit_auth;
use crate::repositories::post_repository::PostRepository;
use crate::services::upload_auth_service::UploadAuthService;

pub struct AppState {
    pub posts: PostRepository,
    pub upload_auth: UploadAuthService,
}

impl AppState {
    pub fn new(imagekit_private_key: Option<String>) -> Self {
        Self {
            posts: PostRepository::new(),
            upload_auth: UploadAuthService::new(imagekit_private_key),
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(list_posts)      // GET /posts
        .service(get_post)        // GET /posts/{id}
        .service(create_post)     // POST /posts
        .service(delete_post)     // DELETE /posts/{id}
        .service(
            web::scope("/api")
                .service(imagekit_auth) // GET /api/auth/imagekit
        )
        .default_service(web::to(not_found));
}
