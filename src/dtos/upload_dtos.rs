use serde::{Deserialize, Serialize};

/// Short-lived credentials returned by `GET /api/auth/imagekit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadAuthOut {
    pub signature: String,
    pub expire: i64,
    pub token: String,
}

/// Success body of the ImageKit upload endpoint (only the fields we use).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(default, rename = "fileId")]
    pub file_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UploadErrorBody {
    pub message: String,
}
