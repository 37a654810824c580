// src/client/composer.rs - post form state and the image upload lifecycle
use log::{info, warn};
use thiserror::Error;

use super::api::{ApiError, PostsApi};
use super::feed::FeedStore;
use super::prompt::Prompter;
use super::uploader::{ImageFile, ImageUploader};
use crate::models::Post;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading {
        file_name: String,
    },
    Attached {
        url: String,
        name: String,
    },
    /// Last upload failed; behaves like `Idle` for submission.
    Failed {
        error: String,
    },
}

#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("an image upload is still in progress")]
    Uploading,
    #[error("title is required")]
    MissingTitle,
    #[error("content is required")]
    MissingContent,
    #[error("failed to create post: {0}")]
    Create(#[from] ApiError),
}

#[derive(Debug, Default)]
pub struct Composer {
    pub title: String,
    pub content: String,
    upload: UploadState,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_state(&self) -> &UploadState {
        &self.upload
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.upload, UploadState::Uploading { .. })
    }

    pub fn image_url(&self) -> Option<&str> {
        match &self.upload {
            UploadState::Attached { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Name shown next to the picker: the picked file while uploading, the
    /// provider's name once attached.
    pub fn image_name(&self) -> Option<&str> {
        match &self.upload {
            UploadState::Uploading { file_name } => Some(file_name),
            UploadState::Attached { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_uploading()
    }

    pub fn start_upload(&mut self, file_name: &str) {
        self.upload = UploadState::Uploading {
            file_name: file_name.to_string(),
        };
    }

    pub fn upload_succeeded(&mut self, url: String, name: Option<String>) {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| match &self.upload {
                UploadState::Uploading { file_name } => Some(file_name.clone()),
                _ => None,
            })
            .unwrap_or_else(|| url.rsplit('/').next().unwrap_or_default().to_string());
        info!("image attached: {} ({})", name, url);
        self.upload = UploadState::Attached { url, name };
    }

    pub fn upload_failed(&mut self, error: &str, prompter: &impl Prompter) {
        warn!("image upload failed: {}", error);
        self.upload = UploadState::Failed {
            error: error.to_string(),
        };
        prompter.alert(&format!("Image upload failed: {error}"));
    }

    pub fn remove_image(&mut self) {
        self.upload = UploadState::Idle;
    }

    /// Drive one upload through the state machine. Returns whether an image
    /// ended up attached.
    pub async fn upload<U, P>(&mut self, file: &ImageFile, uploader: &U, prompter: &P) -> bool
    where
        U: ImageUploader + ?Sized,
        P: Prompter,
    {
        self.start_upload(&file.file_name);
        match uploader.upload(file).await {
            Ok(uploaded) => {
                self.upload_succeeded(uploaded.url, uploaded.name);
                true
            }
            Err(e) => {
                self.upload_failed(&e.to_string(), prompter);
                false
            }
        }
    }

    /// Publish through the feed store; the form is cleared only on success.
    pub async fn submit<A, P>(&mut self, store: &FeedStore<A, P>) -> Result<Post, ComposerError>
    where
        A: PostsApi,
        P: Prompter,
    {
        if self.is_uploading() {
            return Err(ComposerError::Uploading);
        }
        if self.title.trim().is_empty() {
            return Err(ComposerError::MissingTitle);
        }
        if self.content.trim().is_empty() {
            return Err(ComposerError::MissingContent);
        }

        let image_url = self.image_url().map(str::to_string);
        let post = store.create(&self.title, &self.content, image_url).await?;

        self.title.clear();
        self.content.clear();
        self.upload = UploadState::Idle;
        Ok(post)
    }
}
