use crate::compose::letterbox_plan;
use crate::layout::{cell_rects, plan_canvas};
use crate::options::CollageOptions;
use crate::types::*;

/// Calculate statistics for a collage composition
pub fn calculate_statistics(
    sources: &[(u32, u32)],
    options: &CollageOptions,
) -> Result<CompositionStatistics> {
    if sources.is_empty() {
        return Err(ComposeError::NoImages);
    }

    let plan = match options.dimensions {
        Some(dimensions) => dimensions,
        None => plan_canvas(options.template, sources, &options.ratio)?,
    };

    let cells = cell_rects(options.template, plan.width as f64, plan.height as f64);
    let filled_cells = sources.len().min(cells.len());

    let mut cover_scales = Vec::with_capacity(filled_cells);
    let mut filled_area = 0.0;
    for (index, cell) in cells.iter().enumerate().take(filled_cells) {
        let (width, height) = sources[index];
        let zoom = options
            .cell_settings
            .get(index)
            .map(|s| s.zoom)
            .unwrap_or(1.0);
        let scale = (cell.width / width as f64).max(cell.height / height as f64) * zoom;
        cover_scales.push(scale);
        filled_area += cell.width * cell.height;
    }

    let total_area = plan.width as f64 * plan.height as f64;
    let background_fraction = 1.0 - (filled_area / total_area);

    Ok(CompositionStatistics {
        canvas_width: plan.width,
        canvas_height: plan.height,
        cell_count: cells.len(),
        filled_cells,
        cover_scales,
        background_fraction,
    })
}

/// Calculate statistics for a letterbox plan at full resolution
pub fn letterbox_statistics(
    width: u32,
    height: u32,
    ratio: &RatioSpec,
) -> Result<LetterboxStatistics> {
    let plan = letterbox_plan(width, height, ratio)?;

    let image_area = width as f64 * height as f64;
    let canvas_area = plan.canvas_width as f64 * plan.canvas_height as f64;

    Ok(LetterboxStatistics {
        canvas_width: plan.canvas_width,
        canvas_height: plan.canvas_height,
        padding_x: plan.draw_x,
        padding_y: plan.draw_y,
        padding_fraction: 1.0 - (image_area / canvas_area),
    })
}
