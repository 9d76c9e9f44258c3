//! Preview render worker
//!
//! One task owns all preview rendering. Collage requests are debounced:
//! while commands keep arriving within the quiet period, only the newest
//! survives. After a render finishes, the result is published only if no
//! newer request was submitted meanwhile (last write wins, checked against
//! the generation counter).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use photo_compose::{
    generate_collage_preview, generate_letterbox_preview, load_multiple_images,
};
use tokio::sync::mpsc;
use tracing::debug;

use crate::{PreviewCommand, PreviewUpdate, RequestId};

/// Default quiet period for collage preview debouncing
pub const DEFAULT_DEBOUNCE: Duration =
    Duration::from_millis(photo_compose::constants::COLLAGE_DEBOUNCE_MS);

/// Handle to the preview worker task
pub struct PreviewWorker {
    commands: mpsc::UnboundedSender<(RequestId, PreviewCommand)>,
    generation: Arc<AtomicU64>,
}

impl PreviewWorker {
    /// Spawn the worker with the default debounce period.
    pub fn spawn() -> (PreviewWorker, mpsc::UnboundedReceiver<PreviewUpdate>) {
        Self::spawn_with_debounce(DEFAULT_DEBOUNCE)
    }

    /// Spawn the worker with a custom debounce period.
    pub fn spawn_with_debounce(
        debounce: Duration,
    ) -> (PreviewWorker, mpsc::UnboundedReceiver<PreviewUpdate>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let generation = Arc::new(AtomicU64::new(0));

        tokio::spawn(run_worker(
            command_rx,
            update_tx,
            generation.clone(),
            debounce,
        ));

        (
            PreviewWorker {
                commands: command_tx,
                generation,
            },
            update_rx,
        )
    }

    /// Submit a command; returns the request id its update will carry.
    pub fn submit(&self, command: PreviewCommand) -> RequestId {
        let id = RequestId(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        let _ = self.commands.send((id, command));
        id
    }

    /// Stop the worker after any in-flight render.
    pub fn shutdown(&self) {
        self.submit(PreviewCommand::Shutdown);
    }
}

async fn run_worker(
    mut commands: mpsc::UnboundedReceiver<(RequestId, PreviewCommand)>,
    updates: mpsc::UnboundedSender<PreviewUpdate>,
    generation: Arc<AtomicU64>,
    debounce: Duration,
) {
    while let Some((id, command)) = commands.recv().await {
        let (id, command) = match command {
            PreviewCommand::Shutdown => return,
            PreviewCommand::CollagePreview { .. } => {
                match debounce_collage(&mut commands, (id, command), debounce).await {
                    Some(current) => current,
                    None => return,
                }
            }
            other => (id, other),
        };

        // Skip renders that are already superseded before they start.
        if generation.load(Ordering::SeqCst) != id.0 {
            debug!(request = id.0, "skipping superseded request");
            continue;
        }

        let result = render(&command).await;

        // Publish only if this is still the newest request.
        if generation.load(Ordering::SeqCst) != id.0 {
            debug!(request = id.0, "discarding stale render");
            continue;
        }

        let update = match result {
            Ok(image) => PreviewUpdate::PreviewReady {
                request: id,
                width: image.width(),
                height: image.height(),
                rgba_data: image.into_raw(),
            },
            Err(e) => PreviewUpdate::PreviewFailed {
                request: id,
                message: e.to_string(),
            },
        };
        if updates.send(update).is_err() {
            return;
        }
    }
}

/// Collapse collage commands arriving within the quiet period into the
/// newest one. A non-collage command ends the quiet period immediately;
/// returns `None` on shutdown or a closed channel.
async fn debounce_collage(
    commands: &mut mpsc::UnboundedReceiver<(RequestId, PreviewCommand)>,
    mut current: (RequestId, PreviewCommand),
    debounce: Duration,
) -> Option<(RequestId, PreviewCommand)> {
    loop {
        match tokio::time::timeout(debounce, commands.recv()).await {
            // Quiet period elapsed.
            Err(_) => return Some(current),
            Ok(None) => return None,
            Ok(Some((id, command))) => match command {
                PreviewCommand::Shutdown => return None,
                PreviewCommand::CollagePreview { .. } => current = (id, command),
                other => return Some((id, other)),
            },
        }
    }
}

async fn render(command: &PreviewCommand) -> photo_compose::Result<image::RgbaImage> {
    match command {
        PreviewCommand::LetterboxPreview { options } => {
            let images = load_multiple_images(&options.input_files).await?;
            let image = images
                .into_iter()
                .next()
                .ok_or(photo_compose::ComposeError::NoImages)?;
            generate_letterbox_preview(&image, options).await
        }
        PreviewCommand::CollagePreview { options } => {
            let images = load_multiple_images(&options.input_files).await?;
            generate_collage_preview(&images, options).await
        }
        PreviewCommand::Shutdown => unreachable!("shutdown handled by the worker loop"),
    }
}
