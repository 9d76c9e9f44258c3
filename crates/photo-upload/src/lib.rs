//! Client for the external processing service
//!
//! Uploads files in fixed-size chunks, triggers server-side rendering for
//! the NoCrop and Layout tools, and downloads the finished artifact. The
//! backend API itself is an external collaborator; this crate only speaks
//! its protocol.

mod client;
mod protocol;

pub use client::{CHUNK_SIZE, ClientConfig, Download, ServiceClient, UploadedFile};
pub use protocol::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl UploadError {
    /// True when the request never produced a response (connectivity),
    /// as opposed to a server-reported failure.
    pub fn is_connectivity(&self) -> bool {
        match self {
            UploadError::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
