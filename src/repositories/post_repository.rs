// src/repositories/post_repository.rs - in-memory posts table

use std::sync::{PoisonError, RwLock};

use thiserror::Error;
use uuid::Uuid;

use crate::dtos::post_dtos::CreatePostDTO;
use crate::models::Post;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error("post not found")]
    NotFound,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("storage lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for RepoError {
    fn from(_: PoisonError<T>) -> Self {
        RepoError::Poisoned
    }
}

/// Posts kept in insertion order, so listings come back oldest-first.
#[derive(Default)]
pub struct PostRepository {
    posts: RwLock<Vec<Post>>,
}

impl PostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_post(&self, post_data: CreatePostDTO) -> Result<Post, RepoError> {
        post_data.validate().map_err(RepoError::Validation)?;

        let post = Post {
            id: Uuid::new_v4(),
            title: post_data.title,
            content: post_data.content,
            image_url: crate::dtos::post::normalize_image_url(post_data.image_url),
        };

        self.posts.write()?.push(post.clone());
        log::debug!("stored post {}", post.id);
        Ok(post)
    }

    /// List posts oldest-first, optionally capped at `limit` entries.
    pub fn list_posts(&self, limit: Option<usize>) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read()?;
        let take = limit.filter(|l| *l > 0).unwrap_or(posts.len());
        Ok(posts.iter().take(take).cloned().collect())
    }

    pub fn get_post(&self, id: Uuid) -> Result<Post, RepoError> {
        self.posts
            .read()?
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    pub fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write()?;
        let idx = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        posts.remove(idx);
        Ok(())
    }
}
