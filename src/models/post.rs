use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A published post. `id` is always assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Post {
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}
