//! Wire types for the processing service API

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitUploadRequest {
    pub filename: String,
    pub total_chunks: usize,
    pub file_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitUploadResponse {
    pub upload_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteUploadRequest {
    pub upload_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelUploadRequest {
    pub upload_id: String,
}

/// Single-image (NoCrop) processing request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub upload_id: String,
    pub filename: String,
    /// Ratio parameter, e.g. `original` or `4:5`
    pub ratio: String,
    /// Background fill, e.g. `#ffffff`
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub filename: String,
    pub download_url: String,
    pub metadata: ProcessedMetadata,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedMetadata {
    pub width: u32,
    pub height: u32,
    pub size: u64,
}

/// One image slot in a layout processing request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutImage {
    pub upload_id: String,
    pub filename: String,
    /// 0-based cell position, insertion order
    pub position: usize,
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProcessRequest {
    /// Template parameter, e.g. `side-by-side`
    pub layout_type: String,
    /// Ratio parameter, e.g. `fit-all` or `1:1`
    pub ratio: String,
    pub background_color: String,
    pub images: Vec<LayoutImage>,
    /// Explicit canvas dimensions; omitted when the server should plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProcessResponse {
    pub download_url: String,
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Error payload shape the service uses for failed requests
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}
