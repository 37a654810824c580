// src/handlers/post_handlers.rs
//
// Successful responses are bare `Post` JSON (not wrapped in ApiResponse),
// which is the shape the feed client decodes.

use actix_web::http::StatusCode;
use actix_web::{delete, get, post, web, HttpResponse};
use log::{error, info, warn};
use uuid::Uuid;

use crate::AppState;
use crate::dtos::post_dtos::{CreatePostDTO, ListPostsQuery, MessageOut};
use crate::handlers::error_response;
use crate::repositories::post_repository::RepoError;

fn repo_error_response(e: RepoError) -> HttpResponse {
    match e {
        RepoError::NotFound => error_response(StatusCode::NOT_FOUND, "Post not found"),
        RepoError::Validation(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        RepoError::Poisoned => {
            error!("post storage lock poisoned");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Post storage unavailable")
        }
    }
}

/// GET /posts - oldest first
#[get("/posts")]
pub async fn list_posts(
    app_state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> HttpResponse {
    match app_state.posts.list_posts(query.limit) {
        Ok(posts) => {
            info!("listing {} posts", posts.len());
            HttpResponse::Ok().json(posts)
        }
        Err(e) => repo_error_response(e),
    }
}

/// GET /posts/{id}
#[get("/posts/{id}")]
pub async fn get_post(app_state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match app_state.posts.get_post(path.into_inner()) {
        Ok(post) => HttpResponse::Ok().json(post),
        Err(e) => repo_error_response(e),
    }
}

/// POST /posts
#[post("/posts")]
pub async fn create_post(
    app_state: web::Data<AppState>,
    body: web::Json<CreatePostDTO>,
) -> HttpResponse {
    match app_state.posts.create_post(body.into_inner()) {
        Ok(post) => {
            info!("created post {} (image: {})", post.id, post.has_image());
            HttpResponse::Ok().json(post)
        }
        Err(e) => {
            warn!("failed to create post: {}", e);
            repo_error_response(e)
        }
    }
}

/// DELETE /posts/{id}
#[delete("/posts/{id}")]
pub async fn delete_post(app_state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();
    match app_state.posts.delete_post(id) {
        Ok(()) => {
            info!("deleted post {}", id);
            HttpResponse::Ok().json(MessageOut {
                message: "Post deleted successfully".to_string(),
            })
        }
        Err(e) => {
            warn!("failed to delete post {}: {}", id, e);
            repo_error_response(e)
        }
    }
}
