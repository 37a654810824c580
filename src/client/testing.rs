// In-memory fakes for exercising the feed store and composer.
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

use super::api::{ApiError, Authenticator, PostsApi};
use super::prompt::Prompter;
use crate::dtos::post_dtos::CreatePostDTO;
use crate::dtos::upload::UploadAuthOut;
use crate::models::Post;

pub fn post(title: &str) -> Post {
    Post {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: "body".to_string(),
        image_url: None,
    }
}

fn backend_error(status: StatusCode) -> ApiError {
    ApiError::Backend {
        status,
        body: String::new(),
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub posts: Mutex<Vec<Post>>,
    pub created: Mutex<Vec<CreatePostDTO>>,
    pub delete_calls: AtomicUsize,
    pub fail_list: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_auth: AtomicBool,
    pub auth_calls: AtomicUsize,
}

impl FakeApi {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            ..Self::default()
        }
    }
}

#[async_trait]
impl PostsApi for FakeApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(backend_error(StatusCode::BAD_GATEWAY));
        }
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn create_post(&self, dto: &CreatePostDTO) -> Result<Post, ApiError> {
        self.created.lock().unwrap().push(dto.clone());
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(backend_error(StatusCode::INTERNAL_SERVER_ERROR));
        }
        let post = Post {
            id: Uuid::new_v4(),
            title: dto.title.clone(),
            content: dto.content.clone(),
            image_url: dto.image_url.clone(),
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut posts = self.posts.lock().unwrap();
        match posts.iter().position(|p| p.id == id) {
            Some(idx) => {
                posts.remove(idx);
                Ok(())
            }
            None => Err(backend_error(StatusCode::NOT_FOUND)),
        }
    }
}

#[async_trait]
impl Authenticator for FakeApi {
    async fn upload_credentials(&self) -> Result<UploadAuthOut, ApiError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_auth.load(Ordering::SeqCst) {
            return Err(backend_error(StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(UploadAuthOut {
            signature: "sig".to_string(),
            expire: 1_700_000_000,
            token: "tok".to_string(),
        })
    }
}

/// Answers every confirmation with `answer` and records alerts.
pub struct ScriptedPrompter {
    pub answer: bool,
    pub confirms: AtomicUsize,
    pub alerts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            confirms: AtomicUsize::new(0),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, _message: &str) -> bool {
        self.confirms.fetch_add(1, Ordering::SeqCst);
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
