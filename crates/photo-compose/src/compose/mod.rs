//! Raster composition - letterboxing and collage rendering
//!
//! This module orchestrates the composition process:
//! 1. Decode source images
//! 2. Plan the output canvas (fixed ratio or fit-all)
//! 3. Render cells / padding into a fresh canvas
//! 4. Encode to the output file

mod collage;
mod io;
mod letterbox;

pub use collage::render_collage;
pub use io::{load_image, load_multiple_images, save_image};
pub use letterbox::{LetterboxPlan, letterbox_plan, render_letterbox};

use crate::layout::plan_canvas;
use crate::options::{CollageOptions, LetterboxOptions};
use crate::types::*;
use image::RgbaImage;

/// Letterbox one image into the target ratio at full resolution.
///
/// The full image is always visible; leftover area is filled with the
/// background color.
pub async fn compose_letterbox(image: &RgbaImage, options: &LetterboxOptions) -> Result<RgbaImage> {
    options.validate()?;

    let image = image.clone();
    let ratio = options.ratio;
    let background = options.background;

    tokio::task::spawn_blocking(move || {
        let plan = letterbox_plan(image.width(), image.height(), &ratio)?;
        Ok(render_letterbox(&image, &plan, background))
    })
    .await?
}

/// Render a collage at full resolution.
pub async fn compose_collage(images: &[RgbaImage], options: &CollageOptions) -> Result<RgbaImage> {
    options.validate()?;

    let images = images.to_vec();
    let options = options.clone();

    tokio::task::spawn_blocking(move || compose_collage_sync(&images, &options)).await?
}

fn compose_collage_sync(images: &[RgbaImage], options: &CollageOptions) -> Result<RgbaImage> {
    if images.is_empty() {
        return Err(ComposeError::NoImages);
    }

    let sources: Vec<(u32, u32)> = images.iter().map(|i| (i.width(), i.height())).collect();
    let plan = match options.dimensions {
        Some(dimensions) => dimensions,
        None => plan_canvas(options.template, &sources, &options.ratio)?,
    };

    render_collage(
        images,
        options.template,
        &plan,
        &options.cell_settings,
        options.background,
    )
}
