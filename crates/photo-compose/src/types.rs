use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No images to compose")]
    NoImages,
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Target aspect ratio selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioSpec {
    /// Use the source image's own ratio (letterbox only: output equals input)
    Original,
    /// Derive canvas dimensions from the input images themselves
    /// (collage only; handled by the dimension planner)
    FitAll,
    /// A fixed `width:height` pair of positive integers
    Fixed { width: u32, height: u32 },
}

impl RatioSpec {
    /// Parse a ratio argument: `original`, `fit-all`, or `W:H`.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "original" => Ok(RatioSpec::Original),
            "fit-all" | "fitall" => Ok(RatioSpec::FitAll),
            _ => {
                let (w, h) = s
                    .split_once(':')
                    .ok_or_else(|| ComposeError::Config(format!("Invalid ratio: {s}")))?;
                let width: u32 = w
                    .parse()
                    .map_err(|_| ComposeError::Config(format!("Invalid ratio width: {w}")))?;
                let height: u32 = h
                    .parse()
                    .map_err(|_| ComposeError::Config(format!("Invalid ratio height: {h}")))?;
                if width == 0 || height == 0 {
                    return Err(ComposeError::Config(format!(
                        "Ratio components must be positive: {s}"
                    )));
                }
                Ok(RatioSpec::Fixed { width, height })
            }
        }
    }

    /// Target width/height ratio, if fixed.
    pub fn target_ratio(&self) -> Option<f64> {
        match self {
            RatioSpec::Fixed { width, height } => Some(*width as f64 / *height as f64),
            _ => None,
        }
    }

    /// String form used in service requests and config files.
    pub fn as_param(&self) -> String {
        match self {
            RatioSpec::Original => "original".to_string(),
            RatioSpec::FitAll => "fit-all".to_string(),
            RatioSpec::Fixed { width, height } => format!("{width}:{height}"),
        }
    }
}

/// Collage layout templates
///
/// Each variant fixes an exact image count and a partition of the canvas
/// into non-overlapping cells. Cell geometry lives in [`crate::layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTemplate {
    /// Two images, left and right halves
    SideBySide,
    /// Two images, top and bottom halves
    TopBottom,
    /// Three images in a single row of thirds
    ThreeRow,
    /// Three images in a single column of thirds
    ThreeColumn,
    /// One image filling the left half, two stacked in the right half
    OneLeftTwoRight,
    /// Two images stacked in the left half, one filling the right half
    TwoLeftOneRight,
}

impl LayoutTemplate {
    /// Number of images the template assigns cells for.
    pub fn image_count(self) -> usize {
        match self {
            LayoutTemplate::SideBySide | LayoutTemplate::TopBottom => 2,
            LayoutTemplate::ThreeRow
            | LayoutTemplate::ThreeColumn
            | LayoutTemplate::OneLeftTwoRight
            | LayoutTemplate::TwoLeftOneRight => 3,
        }
    }

    /// String form used in service requests and config files.
    pub fn as_param(self) -> &'static str {
        match self {
            LayoutTemplate::SideBySide => "side-by-side",
            LayoutTemplate::TopBottom => "top-bottom",
            LayoutTemplate::ThreeRow => "three-row",
            LayoutTemplate::ThreeColumn => "three-column",
            LayoutTemplate::OneLeftTwoRight => "one-left-two-right",
            LayoutTemplate::TwoLeftOneRight => "two-left-one-right",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "side-by-side" => Ok(LayoutTemplate::SideBySide),
            "top-bottom" => Ok(LayoutTemplate::TopBottom),
            "three-row" => Ok(LayoutTemplate::ThreeRow),
            "three-column" => Ok(LayoutTemplate::ThreeColumn),
            "one-left-two-right" => Ok(LayoutTemplate::OneLeftTwoRight),
            "two-left-one-right" => Ok(LayoutTemplate::TwoLeftOneRight),
            _ => Err(ComposeError::Config(format!("Unknown template: {s}"))),
        }
    }
}

/// Per-image cell adjustment
///
/// Zoom multiplies the cover-fit scale; offsets move the centered image in
/// canvas pixel units. Overflow past the cell boundary is clipped away.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSettings {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for CellSettings {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Solid background fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ComposeError::Config(format!("Invalid color: {s}")));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ComposeError::Config(format!("Invalid color: {s}")))
        };
        Ok(Color {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Opaque RGBA pixel for canvas fills.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Statistics about a planned composition
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionStatistics {
    /// Final canvas width in pixels
    pub canvas_width: u32,
    /// Final canvas height in pixels
    pub canvas_height: u32,
    /// Number of cells in the template
    pub cell_count: usize,
    /// Number of cells that have an image assigned
    pub filled_cells: usize,
    /// Cover-fit scale factor applied to each assigned image (zoom included)
    pub cover_scales: Vec<f64>,
    /// Fraction of the canvas left as background (unfilled cells)
    pub background_fraction: f64,
}

/// Statistics about a letterbox plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxStatistics {
    /// Output canvas width in pixels
    pub canvas_width: u32,
    /// Output canvas height in pixels
    pub canvas_height: u32,
    /// Horizontal bar width on each side, in pixels
    pub padding_x: u32,
    /// Vertical bar height on each side, in pixels
    pub padding_y: u32,
    /// Fraction of the canvas covered by fill color rather than image
    pub padding_fraction: f64,
}
