use serde::{Deserialize, Serialize};

/// Body of `POST /posts`, shared by the server handler and the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostDTO {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>, // null when no image is attached
}

impl CreatePostDTO {
    pub fn new(title: impl Into<String>, content: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_url: normalize_image_url(image_url),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        if self.content.trim().is_empty() {
            return Err("Content is required".to_string());
        }
        Ok(())
    }
}

/// Blank URLs are treated as "no image" so they never reach the backend.
pub fn normalize_image_url(image_url: Option<String>) -> Option<String> {
    image_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageOut {
    pub message: String,
}
