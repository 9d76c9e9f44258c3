//! Chunked upload and processing client
//!
//! Uploads are strictly sequential: each chunk waits for the previous
//! acknowledgement, so throughput is bounded by one round-trip per chunk.
//! A failure mid-sequence issues a best-effort cancel and surfaces the
//! original error.

use crate::protocol::*;
use crate::{Result, UploadError};
use std::path::Path;
use tracing::{debug, warn};

/// Fixed chunk size for uploads
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Default maximum images per batch
const DEFAULT_MAX_IMAGES: usize = 3;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the processing service, without a trailing slash
    pub base_url: String,
    /// Maximum images accepted per batch
    pub max_images: usize,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            max_images: DEFAULT_MAX_IMAGES,
        }
    }
}

/// A file the service has accepted and finalized
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub upload_id: String,
    pub filename: String,
    pub size: usize,
}

/// A downloaded artifact
#[derive(Debug, Clone)]
pub struct Download {
    /// Filename from the response disposition, when the server sent one
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// HTTP client for the processing service
pub struct ServiceClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Check service health
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.http.get(self.endpoint("/api/health")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Upload a file in chunks; `progress` receives percentages 0-100.
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        progress: impl FnMut(u8),
    ) -> Result<UploadedFile> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| UploadError::Config(format!("Not a file: {}", path.display())))?;
        let bytes = tokio::fs::read(path).await?;
        self.upload_bytes(&filename, bytes, progress).await
    }

    /// Upload an in-memory buffer in chunks.
    pub async fn upload_bytes(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        mut progress: impl FnMut(u8),
    ) -> Result<UploadedFile> {
        let total_chunks = bytes.len().div_ceil(CHUNK_SIZE).max(1);

        let init = InitUploadRequest {
            filename: filename.to_string(),
            total_chunks,
            file_size: bytes.len(),
        };
        let response = self
            .http
            .post(self.endpoint("/api/upload/init"))
            .json(&init)
            .send()
            .await?;
        let init_response: InitUploadResponse = check(response).await?.json().await?;
        let upload_id = init_response.upload_id;

        debug!(upload_id, filename, total_chunks, "upload initialized");
        progress(0);

        match self
            .upload_chunks(&upload_id, filename, &bytes, total_chunks, &mut progress)
            .await
        {
            Ok(()) => {}
            Err(e) => {
                // Best effort; the original error is what the caller sees.
                self.cancel_upload(&upload_id).await;
                return Err(e);
            }
        }

        let complete = CompleteUploadRequest {
            upload_id: upload_id.clone(),
        };
        let response = self
            .http
            .post(self.endpoint("/api/upload/complete"))
            .json(&complete)
            .send()
            .await?;
        check(response).await?;

        Ok(UploadedFile {
            upload_id,
            filename: filename.to_string(),
            size: bytes.len(),
        })
    }

    /// Upload each chunk in order, one request at a time.
    async fn upload_chunks(
        &self,
        upload_id: &str,
        filename: &str,
        bytes: &[u8],
        total_chunks: usize,
        progress: &mut impl FnMut(u8),
    ) -> Result<()> {
        for (index, chunk) in bytes.chunks(CHUNK_SIZE).enumerate() {
            let part = reqwest::multipart::Part::bytes(chunk.to_vec())
                .file_name(filename.to_string())
                .mime_str("application/octet-stream")?;
            let form = reqwest::multipart::Form::new()
                .text("uploadId", upload_id.to_string())
                .text("chunkIndex", index.to_string())
                .text("totalChunks", total_chunks.to_string())
                .part("chunk", part);

            let response = self
                .http
                .post(self.endpoint("/api/upload/chunk"))
                .multipart(form)
                .send()
                .await?;
            check(response).await?;

            let percent = ((index as f64 + 1.0) / total_chunks as f64 * 100.0).round() as u8;
            progress(percent);
            debug!(upload_id, index, percent, "chunk uploaded");
        }
        Ok(())
    }

    /// Tell the service to discard a partial upload. Failures are swallowed.
    async fn cancel_upload(&self, upload_id: &str) {
        let cancel = CancelUploadRequest {
            upload_id: upload_id.to_string(),
        };
        let result = self
            .http
            .post(self.endpoint("/api/upload/cancel"))
            .json(&cancel)
            .send()
            .await;
        if let Err(e) = result {
            warn!(upload_id, error = %e, "cancel-upload failed");
        }
    }

    /// Server-side letterbox render of a finalized upload
    pub async fn process_single(&self, request: &ProcessRequest) -> Result<ProcessResponse> {
        let response = self
            .http
            .post(self.endpoint("/api/process"))
            .json(request)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Server-side collage render of finalized uploads
    pub async fn process_layout(
        &self,
        request: &LayoutProcessRequest,
    ) -> Result<LayoutProcessResponse> {
        let response = self
            .http
            .post(self.endpoint("/api/layout/process"))
            .json(request)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Fetch a server-relative download URL.
    pub async fn download(&self, url: &str) -> Result<Download> {
        let absolute = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            self.endpoint(url)
        } else {
            format!("{}/{}", self.config.base_url, url)
        };

        let response = self.http.get(absolute).send().await?;
        let response = check(response).await?;
        let filename = disposition_filename(&response);
        let bytes = response.bytes().await?.to_vec();
        Ok(Download { filename, bytes })
    }
}

/// Map non-success responses to `UploadError::Server`, preferring the
/// service's own error message when the body carries one.
async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "Unknown server error".to_string()
            } else {
                body.clone()
            }
        });

    Err(UploadError::Server { status, message })
}

/// Filename from a `Content-Disposition: attachment; filename="..."` header.
fn disposition_filename(response: &reqwest::Response) -> Option<String> {
    let value = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)?
        .to_str()
        .ok()?;
    let part = value
        .split(';')
        .map(str::trim)
        .find_map(|p| p.strip_prefix("filename="))?;
    Some(part.trim_matches('"').to_string())
}
