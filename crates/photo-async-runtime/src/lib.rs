mod worker;

// Re-export types from library crates
pub use photo_compose::{CellSettings, CollageOptions, LetterboxOptions};
pub use worker::PreviewWorker;

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PreviewCommand {
    /// Render a letterbox preview; runs as soon as the worker is free
    LetterboxPreview { options: LetterboxOptions },
    /// Render a collage preview; debounced so rapid setting changes
    /// (slider drags) collapse into a single render
    CollagePreview { options: CollageOptions },
    Shutdown,
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PreviewUpdate {
    PreviewReady {
        request: RequestId,
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    },
    PreviewFailed {
        request: RequestId,
        message: String,
    },
}

/// Handle to a submitted preview request
///
/// Ids are strictly increasing; the worker publishes a result only when its
/// request is still the newest one, so stale renders are discarded by
/// comparison rather than by timer ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);
