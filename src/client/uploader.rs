// src/client/uploader.rs - direct uploads to ImageKit with signed credentials
use std::path::Path;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use log::{debug, info};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::api::Authenticator;
use crate::dtos::upload::{UploadErrorBody, UploadedImage};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("could not obtain upload credentials: {0}")]
    Authentication(String),
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upload rejected ({status}): {message}")]
    Provider { status: StatusCode, message: String },
    #[error("unexpected upload response: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A picked image, ready to be uploaded.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        let content_type = image_mime(&file_name)
            .ok_or_else(|| UploadError::UnsupportedType(file_name.clone()))?;
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| UploadError::UnsupportedType(path.display().to_string()))?
            .to_string();
        // check the type before reading a possibly large file
        image_mime(&file_name).ok_or_else(|| UploadError::UnsupportedType(file_name.clone()))?;
        let bytes = tokio::fs::read(path).await?;
        Self::new(file_name, bytes)
    }
}

fn image_mime(file_name: &str) -> Option<mime::Mime> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(mime::IMAGE_JPEG),
        "png" => Some(mime::IMAGE_PNG),
        "gif" => Some(mime::IMAGE_GIF),
        "webp" => "image/webp".parse().ok(),
        _ => None,
    }
}

#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, file: &ImageFile) -> Result<UploadedImage, UploadError>;
}

pub struct ImageKitUploader<T> {
    client: Client,
    authenticator: T,
    public_key: String,
    upload_url: String,
}

impl<T: Authenticator> ImageKitUploader<T> {
    pub fn new(client: Client, authenticator: T, public_key: &str, upload_url: &str) -> Self {
        Self {
            client,
            authenticator,
            public_key: public_key.to_string(),
            upload_url: upload_url.to_string(),
        }
    }
}

#[async_trait]
impl<T: Authenticator> ImageUploader for ImageKitUploader<T> {
    async fn upload(&self, file: &ImageFile) -> Result<UploadedImage, UploadError> {
        // never upload without fresh credentials
        let auth = self
            .authenticator
            .upload_credentials()
            .await
            .map_err(|e| UploadError::Authentication(e.to_string()))?;

        debug!(
            "uploading {} ({}, {} bytes)",
            file.file_name,
            file.content_type,
            file.bytes.len()
        );

        let form = reqwest::multipart::Form::new()
            .text("file", general_purpose::STANDARD.encode(&file.bytes))
            .text("fileName", file.file_name.clone())
            .text("publicKey", self.public_key.clone())
            .text("signature", auth.signature)
            .text("expire", auth.expire.to_string())
            .text("token", auth.token)
            .text("useUniqueFileName", "true");

        let resp = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<UploadErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(UploadError::Provider { status, message });
        }

        let uploaded: UploadedImage = serde_json::from_str(&body)?;
        info!("uploaded {} to {}", file.file_name, uploaded.url);
        Ok(uploaded)
    }
}
