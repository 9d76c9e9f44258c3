//! Collage rendering
//!
//! Fills the canvas with the background color, partitions it into cells per
//! the template, then cover-fits each assigned image into its cell with the
//! user's zoom and offset applied. Drawing is clipped to the cell, so
//! overflow from zoom or panning never bleeds into neighbors.

use crate::layout::{CanvasPlan, Rect, cell_rects};
use crate::types::{CellSettings, Color, LayoutTemplate, Result};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Render one collage canvas.
///
/// Images are assigned to cells by position index. Extra images are
/// truncated; missing images leave their cells as background.
pub fn render_collage(
    images: &[RgbaImage],
    template: LayoutTemplate,
    plan: &CanvasPlan,
    settings: &[CellSettings],
    background: Color,
) -> Result<RgbaImage> {
    let mut canvas = RgbaImage::from_pixel(plan.width, plan.height, background.to_rgba());
    let cells = cell_rects(template, plan.width as f64, plan.height as f64);

    if images.len() > cells.len() {
        debug!(
            supplied = images.len(),
            cells = cells.len(),
            "truncating extra images"
        );
    }

    for (index, cell) in cells.iter().enumerate() {
        let Some(image) = images.get(index) else {
            continue;
        };
        let cell_settings = settings.get(index).copied().unwrap_or_default();
        draw_cover(&mut canvas, image, cell, &cell_settings);
    }

    Ok(canvas)
}

/// Draw one image into its cell with a cover fit: scale so the image fills
/// the cell on both axes (times zoom), center it, apply the pixel offset,
/// and clip to the cell bounds.
fn draw_cover(canvas: &mut RgbaImage, image: &RgbaImage, cell: &Rect, settings: &CellSettings) {
    let img_width = image.width() as f64;
    let img_height = image.height() as f64;

    let scale = (cell.width / img_width).max(cell.height / img_height) * settings.zoom;

    // Ceiling keeps the scaled image at least cell-sized at zoom 1, so the
    // cover guarantee survives rounding.
    let scaled_width = (img_width * scale).ceil().max(1.0) as u32;
    let scaled_height = (img_height * scale).ceil().max(1.0) as u32;

    let dest_x = (cell.x + (cell.width - scaled_width as f64) / 2.0 + settings.offset_x).round()
        as i64;
    let dest_y = (cell.y + (cell.height - scaled_height as f64) / 2.0 + settings.offset_y).round()
        as i64;

    if scaled_width == image.width() && scaled_height == image.height() {
        blit_clipped(canvas, image, dest_x, dest_y, cell);
    } else {
        let scaled = imageops::resize(image, scaled_width, scaled_height, FilterType::Triangle);
        blit_clipped(canvas, &scaled, dest_x, dest_y, cell);
    }
}

/// Copy `src` onto `canvas` at `(dest_x, dest_y)`, restricted to the
/// intersection of the destination rectangle, the cell, and the canvas.
fn blit_clipped(canvas: &mut RgbaImage, src: &RgbaImage, dest_x: i64, dest_y: i64, cell: &Rect) {
    let (cell_x0, cell_y0, cell_x1, cell_y1) = cell.pixel_bounds();

    let x0 = cell_x0.max(dest_x).max(0);
    let y0 = cell_y0.max(dest_y).max(0);
    let x1 = cell_x1
        .min(dest_x + src.width() as i64)
        .min(canvas.width() as i64);
    let y1 = cell_y1
        .min(dest_y + src.height() as i64)
        .min(canvas.height() as i64);

    for y in y0..y1 {
        for x in x0..x1 {
            let pixel = *src.get_pixel((x - dest_x) as u32, (y - dest_y) as u32);
            canvas.put_pixel(x as u32, y as u32, pixel);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
