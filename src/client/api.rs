// src/client/api.rs - typed access to the posts backend
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::dtos::post_dtos::CreatePostDTO;
use crate::dtos::upload::UploadAuthOut;
use crate::models::Post;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("backend error: {status} -> {body}")]
    Backend { status: StatusCode, body: String },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            ApiError::Http(e) => e.status(),
            ApiError::Serde(_) => None,
        }
    }
}

#[async_trait]
pub trait PostsApi: Send + Sync {
    /// All posts in backend order (oldest first).
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;
    async fn create_post(&self, post: &CreatePostDTO) -> Result<Post, ApiError>;
    async fn delete_post(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Source of one-off upload credentials.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn upload_credentials(&self) -> Result<UploadAuthOut, ApiError>;
}

#[derive(Clone)]
pub struct HttpPostsApi {
    client: Client,
    base_url: String,
}

impl HttpPostsApi {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    async fn read_body(resp: reqwest::Response) -> Result<String, ApiError> {
        let status = resp.status();
        let body = resp.text().await?;
        debug!("backend responded {}", status);
        if !status.is_success() {
            return Err(ApiError::Backend { status, body });
        }
        Ok(body)
    }

    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let body = Self::read_body(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let resp = self.client.get(self.posts_url()).send().await?;
        Self::read_json(resp).await
    }

    async fn create_post(&self, post: &CreatePostDTO) -> Result<Post, ApiError> {
        let resp = self
            .client
            .post(self.posts_url())
            .json(post)
            .send()
            .await?;
        Self::read_json(resp).await
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.posts_url(), id);
        let resp = self.client.delete(&url).send().await?;
        Self::read_body(resp).await.map(|_| ())
    }
}

#[async_trait]
impl Authenticator for HttpPostsApi {
    async fn upload_credentials(&self) -> Result<UploadAuthOut, ApiError> {
        let url = format!("{}/api/auth/imagekit", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Self::read_json(resp).await
    }
}
