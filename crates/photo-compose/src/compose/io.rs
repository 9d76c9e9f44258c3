//! Image I/O operations for composition

use crate::types::*;
use image::RgbaImage;
use std::io::Cursor;
use std::path::Path;

/// Load and decode a single image
pub async fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let image =
        tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;
    Ok(image.to_rgba8())
}

/// Load multiple images, dispatching all loads concurrently and awaiting
/// them together. One failed decode fails the whole batch.
pub async fn load_multiple_images(paths: &[impl AsRef<Path>]) -> Result<Vec<RgbaImage>> {
    let handles: Vec<_> = paths
        .iter()
        .map(|path| {
            let path = path.as_ref().to_owned();
            tokio::spawn(load_image(path))
        })
        .collect();

    let mut images = Vec::with_capacity(handles.len());
    for handle in handles {
        images.push(handle.await??);
    }
    Ok(images)
}

/// Encode and save the rendered canvas; format chosen by the extension.
pub async fn save_image(image: RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let format = image::ImageFormat::from_path(&path)?;

    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Cursor::new(Vec::new());
        match format {
            // JPEG carries no alpha channel
            image::ImageFormat::Jpeg => {
                image::DynamicImage::ImageRgba8(image)
                    .to_rgb8()
                    .write_to(&mut writer, format)?
            }
            _ => image.write_to(&mut writer, format)?,
        }
        Ok::<_, ComposeError>(writer.into_inner())
    })
    .await??;

    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
