use crate::{
    foundation::core::Rgba8,
    foundation::error::CarouselResult,
    model::deck::Deck,
    model::settings::{GlobalRenderSettings, LogoPosition, LogoSettings, TextAlign},
    model::slide::{ImageSource, SlideSpec},
};

/// Fluent construction of a validated [`Deck`].
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    settings: GlobalRenderSettings,
    logo: Option<LogoSettings>,
    slides: Vec<SlideSpec>,
}

impl DeckBuilder {
    pub fn new(font_family: impl Into<String>, font_size: u32) -> Self {
        Self {
            settings: GlobalRenderSettings {
                font_family: font_family.into(),
                font_size,
                ..GlobalRenderSettings::default()
            },
            logo: None,
            slides: Vec::new(),
        }
    }

    pub fn text_color(mut self, color: Rgba8) -> Self {
        self.settings.text_color = color;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.settings.text_align = align;
        self
    }

    pub fn logo(mut self, image: ImageSource, position: LogoPosition, size: u32) -> Self {
        self.logo = Some(LogoSettings::new(image, position, size));
        self
    }

    pub fn slide(mut self, slide: SlideSpec) -> Self {
        self.slides.push(slide);
        self
    }

    pub fn color_slide(self, text: impl Into<String>, color: Rgba8) -> Self {
        self.slide(SlideSpec::color(text, color))
    }

    pub fn image_slide(
        self,
        text: impl Into<String>,
        image: ImageSource,
        fallback: Option<Rgba8>,
    ) -> Self {
        self.slide(SlideSpec::image(text, image, fallback))
    }

    pub fn build(self) -> CarouselResult<Deck> {
        let deck = Deck {
            slides: self.slides,
            settings: self.settings,
            logo: self.logo,
        };
        deck.validate()?;
        Ok(deck)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/dsl.rs"]
mod tests;
