use crate::compose::{letterbox_plan, render_collage, render_letterbox};
use crate::constants::PREVIEW_WIDTH;
use crate::layout::{CanvasPlan, plan_canvas};
use crate::options::{CollageOptions, LetterboxOptions};
use crate::types::*;
use image::RgbaImage;

/// Generate a downscaled letterbox preview
/// Identical geometry to the full render, uniformly scaled to the width budget
pub async fn generate_letterbox_preview(
    image: &RgbaImage,
    options: &LetterboxOptions,
) -> Result<RgbaImage> {
    options.validate()?;

    let image = image.clone();
    let ratio = options.ratio;
    let background = options.background;

    tokio::task::spawn_blocking(move || {
        let plan =
            letterbox_plan(image.width(), image.height(), &ratio)?.scaled_to_budget(PREVIEW_WIDTH);
        Ok(render_letterbox(&image, &plan, background))
    })
    .await?
}

/// Generate a downscaled collage preview
/// The plan and the per-image pixel offsets scale by the same factor, so the
/// preview is a faithful miniature of the full render
pub async fn generate_collage_preview(
    images: &[RgbaImage],
    options: &CollageOptions,
) -> Result<RgbaImage> {
    options.validate()?;

    let images = images.to_vec();
    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        if images.is_empty() {
            return Err(ComposeError::NoImages);
        }

        let sources: Vec<(u32, u32)> = images.iter().map(|i| (i.width(), i.height())).collect();
        let plan = match options.dimensions {
            Some(dimensions) => dimensions,
            None => plan_canvas(options.template, &sources, &options.ratio)?,
        };

        let scale = if plan.width > PREVIEW_WIDTH {
            PREVIEW_WIDTH as f64 / plan.width as f64
        } else {
            1.0
        };

        let preview_plan = CanvasPlan::new(
            (plan.width as f64 * scale).round() as u32,
            (plan.height as f64 * scale).round() as u32,
        );
        let settings: Vec<CellSettings> = options
            .cell_settings
            .iter()
            .map(|s| CellSettings {
                zoom: s.zoom,
                offset_x: s.offset_x * scale,
                offset_y: s.offset_y * scale,
            })
            .collect();

        render_collage(
            &images,
            options.template,
            &preview_plan,
            &settings,
            options.background,
        )
    })
    .await?
}
