//! File-hosting provider client.
//!
//! Stored objects back design cover images, gated documentation, and project
//! galleries. Objects may be provisioned under different access policies, so
//! retrieval walks an ordered list of [`RetrievalStrategy`] values and stops
//! at the first one the provider accepts.

mod strategy;

pub use strategy::RetrievalStrategy;

use std::time::Duration;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use jiff::Timestamp;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use crate::secrets::SecretString;

type HmacSha256 = Hmac<Sha256>;

/// Timeout applied to every individual retrieval attempt.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Lifetime of a signed delivery URL.
pub const SIGNED_URL_TTL_SECS: i64 = 300;

/// Configuration for the file-hosting provider.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Provider management API address.
    pub api_addr: String,

    /// Provider delivery address objects are fetched from.
    pub delivery_addr: String,

    /// Account namespace within the provider.
    pub cloud_name: String,

    /// Public API key.
    pub api_key: String,

    /// API secret used to sign upload, destroy, and delivery requests.
    pub api_secret: SecretString,
}

/// Provider-side object class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    Image,
    Raw,
}

impl ResourceClass {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Raw => "raw",
        }
    }
}

/// Bytes to be stored with the provider.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Reference to an object stored with the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAsset {
    pub url: String,
    pub public_id: String,
}

/// A stored object retrieved from the provider.
#[derive(Debug, Clone)]
pub struct FetchedObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error("media request failed")]
    Http(#[from] reqwest::Error),

    #[error("unexpected media response: {0}")]
    UnexpectedResponse(String),

    #[error("stored object could not be retrieved")]
    ObjectUnavailable,
}

#[automock]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `upload` under `folder` and return the created object reference.
    async fn upload(
        &self,
        upload: NewUpload,
        folder: &str,
        class: ResourceClass,
    ) -> Result<StoredAsset, MediaStoreError>;

    /// Remove a stored object. Removing an already-absent object succeeds.
    async fn destroy(&self, public_id: &str, class: ResourceClass)
    -> Result<(), MediaStoreError>;

    /// Retrieve a stored object, trying each [`RetrievalStrategy`] in order.
    async fn fetch(
        &self,
        asset: &StoredAsset,
        class: ResourceClass,
    ) -> Result<FetchedObject, MediaStoreError>;
}

/// HTTP client for the provider's management and delivery APIs.
#[derive(Debug, Clone)]
pub struct HttpMediaStore {
    config: MediaConfig,
    http: Client,
}

impl HttpMediaStore {
    #[must_use]
    pub fn new(config: MediaConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(
        &self,
        upload: NewUpload,
        folder: &str,
        class: ResourceClass,
    ) -> Result<StoredAsset, MediaStoreError> {
        let url = format!(
            "{}/v1/{}/{}/upload",
            self.config.api_addr,
            self.config.cloud_name,
            class.segment()
        );

        let timestamp = Timestamp::now().as_second();
        let signature = sign_hex(
            &self.config.api_secret,
            &format!("folder={folder}&timestamp={timestamp}"),
        );

        let part = reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.filename);
        let form = reqwest::multipart::Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", folder.to_string())
            .text("signature", signature)
            .part("file", part);

        let response = self.http.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MediaStoreError::UnexpectedResponse(format!(
                "upload failed with status {status}: {text}"
            )));
        }

        let parsed: UploadResponse = response.json().await?;

        Ok(StoredAsset {
            url: parsed.secure_url,
            public_id: parsed.public_id,
        })
    }

    async fn destroy(
        &self,
        public_id: &str,
        class: ResourceClass,
    ) -> Result<(), MediaStoreError> {
        let url = format!(
            "{}/v1/{}/{}/destroy",
            self.config.api_addr,
            self.config.cloud_name,
            class.segment()
        );

        let timestamp = Timestamp::now().as_second();
        let signature = sign_hex(
            &self.config.api_secret,
            &format!("public_id={public_id}&timestamp={timestamp}"),
        );

        let body = serde_json::json!({
            "public_id": public_id,
            "api_key": self.config.api_key,
            "timestamp": timestamp,
            "signature": signature,
        });

        let response = self.http.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MediaStoreError::UnexpectedResponse(format!(
                "destroy failed with status {status}: {text}"
            )));
        }

        Ok(())
    }

    async fn fetch(
        &self,
        asset: &StoredAsset,
        class: ResourceClass,
    ) -> Result<FetchedObject, MediaStoreError> {
        let now = Timestamp::now();

        for retrieval in RetrievalStrategy::ORDERED {
            let url = retrieval.request_url(&self.config, asset, class, now);

            let response = match self
                .http
                .get(&url)
                .timeout(ATTEMPT_TIMEOUT)
                .send()
                .await
            {
                Ok(response) => response,
                Err(error) => {
                    debug!("{retrieval:?} fetch of {} failed: {error}", asset.public_id);
                    continue;
                }
            };

            if !response.status().is_success() {
                debug!(
                    "{retrieval:?} fetch of {} returned status {}",
                    asset.public_id,
                    response.status()
                );
                continue;
            }

            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("application/octet-stream")
                .to_string();

            let bytes = response.bytes().await?;

            return Ok(FetchedObject {
                bytes: bytes.to_vec(),
                content_type,
            });
        }

        Err(MediaStoreError::ObjectUnavailable)
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

pub(crate) fn sign_hex(secret: &SecretString, input: &str) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose().as_bytes()) else {
        return String::new();
    };

    mac.update(input.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}
