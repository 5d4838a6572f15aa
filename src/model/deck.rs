use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{CarouselError, CarouselResult},
    model::settings::{GlobalRenderSettings, LogoSettings},
    model::slide::SlideSpec,
};

/// A complete carousel: ordered slides plus the settings shared by one render pass.
///
/// A deck is plain data. It can be:
/// - loaded from JSON ([`Deck::from_path`], [`Deck::from_json_str`])
/// - built in code (see [`crate::DeckBuilder`])
///
/// Rendering is performed by [`crate::SlideRenderer`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Slides in output order.
    pub slides: Vec<SlideSpec>,
    #[serde(default)]
    pub settings: GlobalRenderSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoSettings>,
}

impl Deck {
    pub fn from_json_str(s: &str) -> CarouselResult<Self> {
        let deck: Self =
            serde_json::from_str(s).map_err(|e| CarouselError::serde(e.to_string()))?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CarouselResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read deck '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> CarouselResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CarouselError::serde(e.to_string()))
    }

    pub fn validate(&self) -> CarouselResult<()> {
        if self.slides.is_empty() {
            return Err(CarouselError::validation("deck must contain at least one slide"));
        }
        self.settings.validate()?;
        if let Some(logo) = &self.logo {
            logo.validate()?;
        }
        Ok(())
    }

    /// Logo settings only when the logo stage would actually run.
    pub fn active_logo(&self) -> Option<&LogoSettings> {
        self.logo.as_ref().filter(|l| l.is_active())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/deck.rs"]
mod tests;
