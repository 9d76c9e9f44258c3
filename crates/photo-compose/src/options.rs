use crate::constants::{MAX_CANVAS_DIMENSION, MAX_COLLAGE_IMAGES};
use crate::layout::CanvasPlan;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Letterbox (NoCrop) configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LetterboxOptions {
    // Input
    pub input_files: Vec<PathBuf>,

    // Target ratio and fill
    pub ratio: RatioSpec,
    pub background: Color,
}

impl Default for LetterboxOptions {
    fn default() -> Self {
        Self {
            input_files: Vec::new(),
            ratio: RatioSpec::Original,
            background: Color::WHITE,
        }
    }
}

impl LetterboxOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_files.is_empty() {
            return Err(ComposeError::Config("No input files specified".to_string()));
        }

        if self.ratio == RatioSpec::FitAll {
            return Err(ComposeError::Config(
                "Ratio 'fit-all' applies to collage layouts only".to_string(),
            ));
        }

        Ok(())
    }
}

/// Collage (Layout) configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollageOptions {
    // Input
    pub input_files: Vec<PathBuf>,

    // Template and canvas
    pub template: LayoutTemplate,
    pub ratio: RatioSpec,
    pub background: Color,

    /// Per-image zoom/offset, by position index; missing entries default
    pub cell_settings: Vec<CellSettings>,

    /// Explicit canvas override; skips the dimension planner when set
    pub dimensions: Option<CanvasPlan>,
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            input_files: Vec::new(),
            template: LayoutTemplate::SideBySide,
            ratio: RatioSpec::FitAll,
            background: Color::WHITE,
            cell_settings: Vec::new(),
            dimensions: None,
        }
    }
}

impl CollageOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_files.is_empty() {
            return Err(ComposeError::Config("No input files specified".to_string()));
        }

        if self.input_files.len() > MAX_COLLAGE_IMAGES {
            return Err(ComposeError::Config(format!(
                "At most {} images per collage, got {}",
                MAX_COLLAGE_IMAGES,
                self.input_files.len()
            )));
        }

        if self.ratio == RatioSpec::Original {
            return Err(ComposeError::Config(
                "Ratio 'original' applies to letterboxing only".to_string(),
            ));
        }

        for (index, settings) in self.cell_settings.iter().enumerate() {
            if settings.zoom <= 0.0 || !settings.zoom.is_finite() {
                return Err(ComposeError::Config(format!(
                    "Zoom for image {} must be positive, got {}",
                    index, settings.zoom
                )));
            }
        }

        if let Some(dimensions) = self.dimensions {
            if dimensions.width == 0 || dimensions.height == 0 {
                return Err(ComposeError::Config(
                    "Canvas dimensions must be positive".to_string(),
                ));
            }
            if dimensions.width > MAX_CANVAS_DIMENSION || dimensions.height > MAX_CANVAS_DIMENSION
            {
                return Err(ComposeError::Config(format!(
                    "Canvas dimensions may not exceed {} px",
                    MAX_CANVAS_DIMENSION
                )));
            }
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    // Manual implementations for types with custom string forms

    impl Serialize for RatioSpec {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(&self.as_param())
        }
    }

    impl<'de> Deserialize<'de> for RatioSpec {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            RatioSpec::parse(&s).map_err(serde::de::Error::custom)
        }
    }

    impl Serialize for LayoutTemplate {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.as_param())
        }
    }

    impl<'de> Deserialize<'de> for LayoutTemplate {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            LayoutTemplate::parse(&s).map_err(serde::de::Error::custom)
        }
    }

    impl Serialize for Color {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for Color {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Color::from_hex(&s).map_err(serde::de::Error::custom)
        }
    }
} // end of serde_impls module
