//! Canvas dimension planning
//!
//! Fixed-ratio plans apply the requested ratio to a constant base width.
//! "Fit all" plans derive the canvas shape from the images' own ratios so
//! that, at zoom 1, no image needs more cropping than its cell shape forces.

use crate::constants::{
    BASE_CANVAS_WIDTH, BASE_CELL_DIMENSION, HALF_CELL_DIMENSION, MAX_CANVAS_DIMENSION,
};
use crate::types::{ComposeError, LayoutTemplate, RatioSpec, Result};

use super::CanvasPlan;

/// Plan the output canvas for a collage.
///
/// # Arguments
/// * `template` - The layout template
/// * `sources` - Native `(width, height)` of each image, in position order
/// * `ratio` - Fixed ratio or fit-all; `Original` is not valid for collages
pub fn plan_canvas(
    template: LayoutTemplate,
    sources: &[(u32, u32)],
    ratio: &RatioSpec,
) -> Result<CanvasPlan> {
    match ratio {
        RatioSpec::Original => Err(ComposeError::Config(
            "Ratio 'original' is not valid for collage layouts".to_string(),
        )),
        RatioSpec::Fixed { width, height } => {
            let w = BASE_CANVAS_WIDTH as f64;
            let h = w * (*height as f64) / (*width as f64);
            Ok(clamp_plan(w, h))
        }
        RatioSpec::FitAll => Ok(fit_all_plan(template, sources)),
    }
}

/// Plan a canvas sized from the images' own ratios (fit-all mode).
///
/// Missing images contribute zero to the sums; the compositor simply leaves
/// their cells unfilled.
pub fn fit_all_plan(template: LayoutTemplate, sources: &[(u32, u32)]) -> CanvasPlan {
    let (width, height) = match template {
        LayoutTemplate::SideBySide => {
            let width: f64 = (0..2).map(|i| width_for_height(sources, i, BASE_CELL_DIMENSION)).sum();
            (width, BASE_CELL_DIMENSION)
        }
        LayoutTemplate::TopBottom => {
            let height: f64 = (0..2).map(|i| height_for_width(sources, i, BASE_CELL_DIMENSION)).sum();
            (BASE_CELL_DIMENSION, height)
        }
        LayoutTemplate::ThreeRow => {
            let width: f64 = (0..3).map(|i| width_for_height(sources, i, BASE_CELL_DIMENSION)).sum();
            (width, BASE_CELL_DIMENSION)
        }
        LayoutTemplate::ThreeColumn => {
            let height: f64 = (0..3).map(|i| height_for_width(sources, i, BASE_CELL_DIMENSION)).sum();
            (BASE_CELL_DIMENSION, height)
        }
        LayoutTemplate::OneLeftTwoRight => {
            let left = height_for_width(sources, 0, HALF_CELL_DIMENSION);
            let right: f64 = (1..3).map(|i| height_for_width(sources, i, HALF_CELL_DIMENSION)).sum();
            (2.0 * HALF_CELL_DIMENSION, left.max(right))
        }
        LayoutTemplate::TwoLeftOneRight => {
            let left: f64 = (0..2).map(|i| height_for_width(sources, i, HALF_CELL_DIMENSION)).sum();
            let right = height_for_width(sources, 2, HALF_CELL_DIMENSION);
            (2.0 * HALF_CELL_DIMENSION, left.max(right))
        }
    };

    clamp_plan(width, height)
}

/// Width of image `index` scaled to the given height (0 if missing).
fn width_for_height(sources: &[(u32, u32)], index: usize, height: f64) -> f64 {
    match sources.get(index) {
        Some(&(w, h)) if h > 0 => w as f64 / h as f64 * height,
        _ => 0.0,
    }
}

/// Height of image `index` scaled to the given width (0 if missing).
fn height_for_width(sources: &[(u32, u32)], index: usize, width: f64) -> f64 {
    match sources.get(index) {
        Some(&(w, h)) if w > 0 => h as f64 / w as f64 * width,
        _ => 0.0,
    }
}

/// Clamp a plan so neither dimension exceeds [`MAX_CANVAS_DIMENSION`],
/// preserving the aspect ratio, then round to whole pixels.
fn clamp_plan(width: f64, height: f64) -> CanvasPlan {
    let max = MAX_CANVAS_DIMENSION as f64;
    let scale = (max / width).min(max / height).min(1.0);
    CanvasPlan::new(
        (width * scale).round().max(1.0) as u32,
        (height * scale).round().max(1.0) as u32,
    )
}

// =============================================================================
// Tests
// =============================================================================
