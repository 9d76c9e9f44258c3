//! Shared constants for composition
//!
//! This module centralizes magic numbers and constants used throughout
//! the letterbox and collage pipelines.

// =============================================================================
// Canvas Sizing
// =============================================================================

/// Base canvas width in pixels for fixed-ratio collage plans.
pub const BASE_CANVAS_WIDTH: u32 = 1000;

/// Base dimension in pixels on the unconstrained axis for "fit all" planning.
pub const BASE_CELL_DIMENSION: f64 = 1000.0;

/// Cell width for the asymmetric (left/right column) templates: half of the
/// total canvas width used during planning.
pub const HALF_CELL_DIMENSION: f64 = 500.0;

/// Maximum allowed canvas dimension in pixels. Plans exceeding this on either
/// axis are scaled down proportionally.
pub const MAX_CANVAS_DIMENSION: u32 = 2000;

// =============================================================================
// Preview
// =============================================================================

/// Width budget in pixels for downscaled preview renders.
pub const PREVIEW_WIDTH: u32 = 600;

/// Quiet period before a collage preview render is started, so rapid setting
/// changes collapse into a single render.
pub const COLLAGE_DEBOUNCE_MS: u64 = 300;

// =============================================================================
// Batch Limits
// =============================================================================

/// Minimum number of images a collage template accepts.
pub const MIN_COLLAGE_IMAGES: usize = 2;

/// Maximum number of images a collage template accepts.
pub const MAX_COLLAGE_IMAGES: usize = 3;
