use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::Rgba8,
    foundation::error::{CarouselError, CarouselResult},
    model::slide::ImageSource,
};

/// Horizontal placement of each text line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    /// Line starts at the left padding.
    Left,
    /// Line ends at the right padding.
    Right,
    /// Line is centered on the canvas midline. Unrecognized values also land here.
    #[default]
    #[serde(other)]
    Center,
}

/// Text styling shared by every slide of one render pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalRenderSettings {
    /// Family name looked up in the font library; the bold face is used.
    pub font_family: String,
    /// Font size in pixels, must be > 0.
    pub font_size: u32,
    #[serde(default = "default_text_color")]
    pub text_color: Rgba8,
    #[serde(default)]
    pub text_align: TextAlign,
}

fn default_text_color() -> Rgba8 {
    Rgba8::WHITE
}

impl Default for GlobalRenderSettings {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 64,
            text_color: default_text_color(),
            text_align: TextAlign::Center,
        }
    }
}

impl GlobalRenderSettings {
    pub fn validate(&self) -> CarouselResult<()> {
        if self.font_family.trim().is_empty() {
            return Err(CarouselError::validation("fontFamily must be non-empty"));
        }
        if self.font_size == 0 {
            return Err(CarouselError::validation("fontSize must be > 0"));
        }
        Ok(())
    }

    pub fn font_size_px(&self) -> f32 {
        self.font_size as f32
    }
}

/// Corner the logo is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    TopLeft,
    TopRight,
    BottomRight,
    /// Default corner; unrecognized positions also land here.
    #[default]
    #[serde(other)]
    BottomLeft,
}

impl LogoPosition {
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];
}

/// Optional logo drawn over every slide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSource>,
    #[serde(default)]
    pub position: LogoPosition,
    /// Target length in pixels of the logo's longer side.
    #[serde(default = "default_logo_size")]
    pub size: u32,
}

fn default_logo_size() -> u32 {
    120
}

impl LogoSettings {
    pub fn new(image: ImageSource, position: LogoPosition, size: u32) -> Self {
        Self {
            enabled: true,
            image: Some(image),
            position,
            size,
        }
    }

    /// The logo stage runs only when enabled and an image is configured.
    pub fn is_active(&self) -> bool {
        self.enabled && self.image.is_some()
    }

    pub fn validate(&self) -> CarouselResult<()> {
        if self.size == 0 {
            return Err(CarouselError::validation("logo size must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/settings.rs"]
mod tests;
