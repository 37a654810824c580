use std::env;

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_IMAGEKIT_UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";

pub fn mask_key(k: &str) -> String {
    if k.chars().count() <= 8 {
        return "[REDACTED]".to_string();
    }
    let head: String = k.chars().take(4).collect();
    let mut tail: Vec<char> = k.chars().rev().take(4).collect();
    tail.reverse();
    format!("{}***{}", head, tail.into_iter().collect::<String>())
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub imagekit_private_key: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let port = match optional_var("PORT") {
            Some(p) => p
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {p}"))?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = optional_var("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string());

        Ok(Self {
            port,
            allowed_origins: split_origins(&allowed_origins),
            imagekit_private_key: optional_var("IMAGEKIT_PRIVATE_KEY"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub imagekit: Option<ImageKitConfig>,
}

/// Only present when a public key is configured; uploads are disabled otherwise.
#[derive(Debug, Clone)]
pub struct ImageKitConfig {
    pub public_key: String,
    pub url_endpoint: Option<String>,
    pub upload_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let api_base_url = optional_var("API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("API_BASE_URL must be an http(s) URL, got {api_base_url}");
        }

        let imagekit = optional_var("IMAGEKIT_PUBLIC_KEY").map(|public_key| ImageKitConfig {
            public_key,
            url_endpoint: optional_var("IMAGEKIT_URL_ENDPOINT"),
            upload_url: optional_var("IMAGEKIT_UPLOAD_URL")
                .unwrap_or_else(|| DEFAULT_IMAGEKIT_UPLOAD_URL.to_string()),
        });

        Ok(Self {
            api_base_url,
            imagekit,
        })
    }
}
