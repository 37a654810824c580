// src/services/upload_auth_service.rs - signed upload credentials for ImageKit
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use thiserror::Error;
use uuid::Uuid;

use crate::dtos::upload::UploadAuthOut;

type HmacSha1 = Hmac<Sha1>;

/// Lifetime of a credential triple, in seconds.
pub const DEFAULT_EXPIRE_SECS: i64 = 60 * 30;

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("IMAGEKIT_PRIVATE_KEY is not configured")]
    MissingPrivateKey,
    #[error("invalid signing key")]
    InvalidKey,
}

#[derive(Clone)]
pub struct UploadAuthService {
    private_key: Option<String>,
    expire_secs: i64,
}

impl UploadAuthService {
    pub fn new(private_key: Option<String>) -> Self {
        Self {
            private_key: private_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            expire_secs: DEFAULT_EXPIRE_SECS,
        }
    }

    #[cfg(test)]
    fn with_expire_secs(mut self, expire_secs: i64) -> Self {
        self.expire_secs = expire_secs;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.private_key.is_some()
    }

    /// Fresh `{signature, expire, token}` for one upload attempt.
    pub fn authentication_parameters(&self) -> Result<UploadAuthOut, SigningError> {
        let token = Uuid::new_v4().to_string();
        let expire = Utc::now().timestamp() + self.expire_secs;
        let signature = self.sign(&token, expire)?;

        Ok(UploadAuthOut {
            signature,
            expire,
            token,
        })
    }

    /// hex(HMAC-SHA1(private_key, token ++ expire))
    pub fn sign(&self, token: &str, expire: i64) -> Result<String, SigningError> {
        let key = self
            .private_key
            .as_deref()
            .ok_or(SigningError::MissingPrivateKey)?;

        let mut mac =
            HmacSha1::new_from_slice(key.as_bytes()).map_err(|_| SigningError::InvalidKey)?;
        mac.update(token.as_bytes());
        mac.update(expire.to_string().as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}
