//! Letterbox rendering
//!
//! Pads an image with solid color bars to reach a target aspect ratio.
//! The image is never cropped: one canvas axis matches the image exactly,
//! the other is extended and the image centered on it.

use crate::types::{ComposeError, Color, RatioSpec, Result};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Resolved canvas and draw geometry for a letterbox render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterboxPlan {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub draw_x: u32,
    pub draw_y: u32,
    pub draw_width: u32,
    pub draw_height: u32,
}

/// Compute the letterbox geometry for an image of the given size.
pub fn letterbox_plan(width: u32, height: u32, ratio: &RatioSpec) -> Result<LetterboxPlan> {
    if width == 0 || height == 0 {
        return Err(ComposeError::Config("Image has zero dimension".to_string()));
    }

    let target = match ratio {
        RatioSpec::Original => {
            return Ok(LetterboxPlan {
                canvas_width: width,
                canvas_height: height,
                draw_x: 0,
                draw_y: 0,
                draw_width: width,
                draw_height: height,
            });
        }
        RatioSpec::FitAll => {
            return Err(ComposeError::Config(
                "Ratio 'fit-all' is not valid for letterboxing".to_string(),
            ));
        }
        RatioSpec::Fixed { width, height } => *width as f64 / *height as f64,
    };

    let current = width as f64 / height as f64;

    if current > target {
        // Relatively wider than the target: extend the canvas vertically.
        let canvas_height = (width as f64 / target).round() as u32;
        Ok(LetterboxPlan {
            canvas_width: width,
            canvas_height,
            draw_x: 0,
            draw_y: (canvas_height - height) / 2,
            draw_width: width,
            draw_height: height,
        })
    } else {
        // Relatively taller (or equal): extend the canvas horizontally.
        let canvas_width = (height as f64 * target).round() as u32;
        Ok(LetterboxPlan {
            canvas_width,
            canvas_height: height,
            draw_x: (canvas_width - width) / 2,
            draw_y: 0,
            draw_width: width,
            draw_height: height,
        })
    }
}

impl LetterboxPlan {
    /// Uniformly scale the plan down so the canvas width fits the budget.
    /// All fields are rounded from the same scale factor so the draw
    /// rectangle stays centered without sub-pixel drift.
    pub fn scaled_to_budget(&self, budget: u32) -> LetterboxPlan {
        if self.canvas_width <= budget {
            return *self;
        }
        let scale = budget as f64 / self.canvas_width as f64;
        let round = |v: u32| (v as f64 * scale).round() as u32;
        LetterboxPlan {
            canvas_width: round(self.canvas_width),
            canvas_height: round(self.canvas_height),
            draw_x: round(self.draw_x),
            draw_y: round(self.draw_y),
            draw_width: round(self.draw_width).max(1),
            draw_height: round(self.draw_height).max(1),
        }
    }
}

/// Render the letterboxed canvas: background fill, then the image (scaled
/// only when the plan was downscaled for a preview) at the planned offset.
pub fn render_letterbox(image: &RgbaImage, plan: &LetterboxPlan, background: Color) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        plan.canvas_width,
        plan.canvas_height,
        background.to_rgba(),
    );

    if plan.draw_width == image.width() && plan.draw_height == image.height() {
        imageops::replace(&mut canvas, image, plan.draw_x as i64, plan.draw_y as i64);
    } else {
        let scaled = imageops::resize(image, plan.draw_width, plan.draw_height, FilterType::Triangle);
        imageops::replace(&mut canvas, &scaled, plan.draw_x as i64, plan.draw_y as i64);
    }

    canvas
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_ratio_is_identity() {
        let plan = letterbox_plan(800, 600, &RatioSpec::Original).unwrap();
        assert_eq!(plan.canvas_width, 800);
        assert_eq!(plan.canvas_height, 600);
        assert_eq!((plan.draw_x, plan.draw_y), (0, 0));
    }

    #[test]
    fn test_wide_image_gets_vertical_bars() {
        // 1600x900 into 1:1 -> canvas 1600x1600, image vertically centered.
        let ratio = RatioSpec::Fixed {
            width: 1,
            height: 1,
        };
        let plan = letterbox_plan(1600, 900, &ratio).unwrap();
        assert_eq!(plan.canvas_width, 1600);
        assert_eq!(plan.canvas_height, 1600);
        assert_eq!(plan.draw_x, 0);
        assert_eq!(plan.draw_y, 350);
    }

    #[test]
    fn test_tall_image_gets_horizontal_bars() {
        // 900x1600 into 16:9 -> canvas width 1600*16/9 = 2844.
        let ratio = RatioSpec::Fixed {
            width: 16,
            height: 9,
        };
        let plan = letterbox_plan(900, 1600, &ratio).unwrap();
        assert_eq!(plan.canvas_height, 1600);
        assert_eq!(plan.canvas_width, 2844);
        assert_eq!(plan.draw_x, (2844 - 900) / 2);
    }

    #[test]
    fn test_matching_ratio_needs_no_padding() {
        let ratio = RatioSpec::Fixed {
            width: 1,
            height: 1,
        };
        let plan = letterbox_plan(1000, 1000, &ratio).unwrap();
        assert_eq!(plan.canvas_width, 1000);
        assert_eq!(plan.canvas_height, 1000);
        assert_eq!((plan.draw_x, plan.draw_y), (0, 0));
    }

    #[test]
    fn test_output_ratio_matches_spec_within_rounding() {
        let ratio = RatioSpec::Fixed {
            width: 4,
            height: 5,
        };
        let plan = letterbox_plan(1237, 911, &ratio).unwrap();
        let out = plan.canvas_width as f64 / plan.canvas_height as f64;
        // Within one pixel of rounding on the extended axis.
        let tolerance = 1.0 / plan.canvas_height as f64 * (4.0 / 5.0) + 1e-9;
        assert!((out - 0.8).abs() <= tolerance, "ratio {out}");
    }

    #[test]
    fn test_preview_budget_scales_uniformly() {
        let ratio = RatioSpec::Fixed {
            width: 1,
            height: 1,
        };
        let plan = letterbox_plan(1600, 900, &ratio).unwrap();
        let preview = plan.scaled_to_budget(600);
        assert_eq!(preview.canvas_width, 600);
        assert_eq!(preview.canvas_height, 600);
        assert_eq!(preview.draw_width, 600);
        // 350 * 600/1600 = 131.25 -> 131
        assert_eq!(preview.draw_y, 131);
        assert_eq!(preview.draw_height, 338);
    }

    #[test]
    fn test_budget_leaves_small_canvases_alone() {
        let plan = letterbox_plan(400, 300, &RatioSpec::Original).unwrap();
        assert_eq!(plan.scaled_to_budget(600), plan);
    }

    #[test]
    fn test_fit_all_rejected_for_letterbox() {
        assert!(letterbox_plan(800, 600, &RatioSpec::FitAll).is_err());
    }
}
