//! Cell partition tables
//!
//! Each template maps to a fixed list of fractional rectangles. Scaling the
//! fractions by the canvas dimensions yields the cell bounds, so adding a
//! template is a data change rather than new control flow.

use crate::types::LayoutTemplate;

use super::Rect;

/// A rectangle expressed as fractions of the canvas dimensions
#[derive(Debug, Clone, Copy)]
struct FractionalRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

const fn frac(x: f64, y: f64, width: f64, height: f64) -> FractionalRect {
    FractionalRect {
        x,
        y,
        width,
        height,
    }
}

const THIRD: f64 = 1.0 / 3.0;

const SIDE_BY_SIDE: [FractionalRect; 2] =
    [frac(0.0, 0.0, 0.5, 1.0), frac(0.5, 0.0, 0.5, 1.0)];

const TOP_BOTTOM: [FractionalRect; 2] =
    [frac(0.0, 0.0, 1.0, 0.5), frac(0.0, 0.5, 1.0, 0.5)];

const THREE_ROW: [FractionalRect; 3] = [
    frac(0.0, 0.0, THIRD, 1.0),
    frac(THIRD, 0.0, THIRD, 1.0),
    frac(2.0 * THIRD, 0.0, THIRD, 1.0),
];

const THREE_COLUMN: [FractionalRect; 3] = [
    frac(0.0, 0.0, 1.0, THIRD),
    frac(0.0, THIRD, 1.0, THIRD),
    frac(0.0, 2.0 * THIRD, 1.0, THIRD),
];

const ONE_LEFT_TWO_RIGHT: [FractionalRect; 3] = [
    frac(0.0, 0.0, 0.5, 1.0),
    frac(0.5, 0.0, 0.5, 0.5),
    frac(0.5, 0.5, 0.5, 0.5),
];

const TWO_LEFT_ONE_RIGHT: [FractionalRect; 3] = [
    frac(0.0, 0.0, 0.5, 0.5),
    frac(0.0, 0.5, 0.5, 0.5),
    frac(0.5, 0.0, 0.5, 1.0),
];

fn cell_fractions(template: LayoutTemplate) -> &'static [FractionalRect] {
    match template {
        LayoutTemplate::SideBySide => &SIDE_BY_SIDE,
        LayoutTemplate::TopBottom => &TOP_BOTTOM,
        LayoutTemplate::ThreeRow => &THREE_ROW,
        LayoutTemplate::ThreeColumn => &THREE_COLUMN,
        LayoutTemplate::OneLeftTwoRight => &ONE_LEFT_TWO_RIGHT,
        LayoutTemplate::TwoLeftOneRight => &TWO_LEFT_ONE_RIGHT,
    }
}

/// Cell rectangles for a template on a canvas of the given size, ordered by
/// image position index.
pub fn cell_rects(template: LayoutTemplate, canvas_width: f64, canvas_height: f64) -> Vec<Rect> {
    cell_fractions(template)
        .iter()
        .map(|f| {
            Rect::new(
                f.x * canvas_width,
                f.y * canvas_height,
                f.width * canvas_width,
                f.height * canvas_height,
            )
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_by_side_halves() {
        let cells = cell_rects(LayoutTemplate::SideBySide, 1000.0, 800.0);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], Rect::new(0.0, 0.0, 500.0, 800.0));
        assert_eq!(cells[1], Rect::new(500.0, 0.0, 500.0, 800.0));
    }

    #[test]
    fn test_top_bottom_halves() {
        let cells = cell_rects(LayoutTemplate::TopBottom, 1000.0, 800.0);
        assert_eq!(cells[0], Rect::new(0.0, 0.0, 1000.0, 400.0));
        assert_eq!(cells[1], Rect::new(0.0, 400.0, 1000.0, 400.0));
    }

    #[test]
    fn test_three_row_spans_full_width() {
        let cells = cell_rects(LayoutTemplate::ThreeRow, 900.0, 600.0);
        assert_eq!(cells.len(), 3);
        assert!((cells[0].width - 300.0).abs() < 1e-9);
        assert!((cells[2].right() - 900.0).abs() < 1e-9);
        for cell in &cells {
            assert_eq!(cell.height, 600.0);
        }
    }

    #[test]
    fn test_asymmetric_partitions() {
        let cells = cell_rects(LayoutTemplate::OneLeftTwoRight, 1000.0, 1000.0);
        assert_eq!(cells[0], Rect::new(0.0, 0.0, 500.0, 1000.0));
        assert_eq!(cells[1], Rect::new(500.0, 0.0, 500.0, 500.0));
        assert_eq!(cells[2], Rect::new(500.0, 500.0, 500.0, 500.0));

        let mirror = cell_rects(LayoutTemplate::TwoLeftOneRight, 1000.0, 1000.0);
        assert_eq!(mirror[0], Rect::new(0.0, 0.0, 500.0, 500.0));
        assert_eq!(mirror[1], Rect::new(0.0, 500.0, 500.0, 500.0));
        assert_eq!(mirror[2], Rect::new(500.0, 0.0, 500.0, 1000.0));
    }

    #[test]
    fn test_cells_cover_canvas_without_overlap() {
        for template in [
            LayoutTemplate::SideBySide,
            LayoutTemplate::TopBottom,
            LayoutTemplate::ThreeRow,
            LayoutTemplate::ThreeColumn,
            LayoutTemplate::OneLeftTwoRight,
            LayoutTemplate::TwoLeftOneRight,
        ] {
            let cells = cell_rects(template, 1200.0, 900.0);
            assert_eq!(cells.len(), template.image_count());
            let area: f64 = cells.iter().map(|c| c.width * c.height).sum();
            assert!((area - 1200.0 * 900.0).abs() < 1e-6, "{template:?}");
        }
    }
}
