use std::sync::Arc;

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

/// How a slide's background is produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundKind {
    /// Cover-fit image with a legibility scrim.
    Image,
    /// Solid fill with the slide's background color.
    ///
    /// Unrecognized background types also land here.
    #[default]
    #[serde(other)]
    Color,
}

/// Reference to an image used as a background or logo.
///
/// In JSON this is a plain string: either a `data:` URL or a path relative to the renderer's
/// assets root. In-memory bytes can only be supplied from code and serialize as a base64 data URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Path relative to the assets root.
    Path(String),
    /// `data:[<mime>][;base64],<payload>` URL, parsed lazily at load time.
    DataUrl(String),
    /// Encoded image bytes (PNG, JPEG, SVG, ...).
    Bytes(Arc<Vec<u8>>),
}

impl ImageSource {
    pub fn path(p: impl Into<String>) -> Self {
        Self::Path(p.into())
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(Arc::new(bytes.into()))
    }

    /// Classify a raw string the way JSON input is classified.
    pub fn from_uri(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.trim_start().starts_with("data:") {
            Self::DataUrl(s)
        } else {
            Self::Path(s)
        }
    }

    /// Short, log-friendly description that never dumps image payloads.
    pub fn describe(&self) -> String {
        match self {
            Self::Path(p) => format!("path '{p}'"),
            Self::DataUrl(u) => {
                let head: String = u.chars().take_while(|c| *c != ',').take(48).collect();
                format!("data url '{head},…' ({} bytes)", u.len())
            }
            Self::Bytes(b) => format!("in-memory image ({} bytes)", b.len()),
        }
    }
}

impl Serialize for ImageSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Path(s) | Self::DataUrl(s) => serializer.serialize_str(s),
            Self::Bytes(b) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(b.as_slice());
                serializer.serialize_str(&format!("data:application/octet-stream;base64,{encoded}"))
            }
        }
    }
}

impl<'de> Deserialize<'de> for ImageSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_uri(s))
    }
}

/// One carousel position: text over a background.
///
/// Slides are immutable render inputs; their order in a deck decides output order and file names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideSpec {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub background_type: BackgroundKind,
    /// Solid color, also the fallback when an image background cannot be loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Rgba8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<ImageSource>,
}

impl SlideSpec {
    /// Text slide over a solid color.
    pub fn color(text: impl Into<String>, color: Rgba8) -> Self {
        Self {
            text: text.into(),
            background_type: BackgroundKind::Color,
            background_color: Some(color),
            background_image: None,
        }
    }

    /// Text slide over a cover-fit image; `fallback` is used if the image fails to load.
    pub fn image(text: impl Into<String>, image: ImageSource, fallback: Option<Rgba8>) -> Self {
        Self {
            text: text.into(),
            background_type: BackgroundKind::Image,
            background_color: fallback,
            background_image: Some(image),
        }
    }

    /// `true` when the text stage has something to draw.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/slide.rs"]
mod tests;
