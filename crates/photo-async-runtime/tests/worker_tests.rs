use std::path::PathBuf;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use photo_async_runtime::*;
use tempfile::TempDir;

async fn write_test_image(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join(name);
    let image = RgbaImage::from_pixel(width, height, Rgba([128, 64, 32, 255]));
    photo_compose::save_image(image, &path).await.unwrap();
    path
}

fn collage_command(files: Vec<PathBuf>, zoom: f64) -> PreviewCommand {
    let mut options = CollageOptions::default();
    options.input_files = files;
    options.cell_settings.push(CellSettings {
        zoom,
        ..Default::default()
    });
    PreviewCommand::CollagePreview { options }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_letterbox_preview_renders() {
    let dir = TempDir::new().unwrap();
    let path = write_test_image(&dir, "a.png", 1600, 900).await;

    let (worker, mut updates) = PreviewWorker::spawn_with_debounce(Duration::from_millis(10));

    let mut options = LetterboxOptions::default();
    options.input_files.push(path);
    options.ratio = photo_compose::RatioSpec::Fixed {
        width: 1,
        height: 1,
    };
    let id = worker.submit(PreviewCommand::LetterboxPreview { options });

    match updates.recv().await.unwrap() {
        PreviewUpdate::PreviewReady {
            request,
            width,
            height,
            rgba_data,
        } => {
            assert_eq!(request, id);
            assert_eq!((width, height), (600, 600));
            assert_eq!(rgba_data.len(), 600 * 600 * 4);
        }
        other => panic!("expected ready, got {other:?}"),
    }

    worker.shutdown();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_burst_collapses_to_newest_request() {
    let dir = TempDir::new().unwrap();
    let a = write_test_image(&dir, "a.png", 400, 300).await;
    let b = write_test_image(&dir, "b.png", 300, 400).await;

    let (worker, mut updates) = PreviewWorker::spawn_with_debounce(Duration::from_millis(50));

    // Simulated slider drag: three rapid setting changes.
    worker.submit(collage_command(vec![a.clone(), b.clone()], 1.0));
    worker.submit(collage_command(vec![a.clone(), b.clone()], 1.5));
    let last = worker.submit(collage_command(vec![a, b], 2.0));

    match updates.recv().await.unwrap() {
        PreviewUpdate::PreviewReady { request, .. } => assert_eq!(request, last),
        other => panic!("expected ready, got {other:?}"),
    }

    // The earlier requests never produce updates.
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(updates.try_recv().is_err());

    worker.shutdown();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_decode_failure_reports_per_request() {
    let dir = TempDir::new().unwrap();
    let good = write_test_image(&dir, "good.png", 200, 200).await;
    let missing = dir.path().join("missing.png");

    let (worker, mut updates) = PreviewWorker::spawn_with_debounce(Duration::from_millis(10));

    let failed = worker.submit(collage_command(vec![good.clone(), missing], 1.0));
    match updates.recv().await.unwrap() {
        PreviewUpdate::PreviewFailed { request, message } => {
            assert_eq!(request, failed);
            assert!(!message.is_empty());
        }
        other => panic!("expected failure, got {other:?}"),
    }

    // The worker stays usable for the next attempt.
    let retry = worker.submit(collage_command(vec![good.clone(), good], 1.0));
    match updates.recv().await.unwrap() {
        PreviewUpdate::PreviewReady { request, .. } => assert_eq!(request, retry),
        other => panic!("expected ready, got {other:?}"),
    }

    worker.shutdown();
}
