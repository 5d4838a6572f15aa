use crate::{
    foundation::error::CarouselResult,
    model::deck::Deck,
    model::settings::{GlobalRenderSettings, LogoSettings},
    model::slide::SlideSpec,
    render::slide::{RenderedImage, RendererOpts, SlideRenderer},
};

impl SlideRenderer {
    /// Render `slides` one after another, in order.
    ///
    /// The output has one image per input slide. Recoverable image failures only change how a
    /// slide looks; any other error aborts the batch and is returned as is.
    #[tracing::instrument(skip_all, fields(slides = slides.len()))]
    pub fn render_all(
        &mut self,
        slides: &[SlideSpec],
        settings: &GlobalRenderSettings,
        logo: Option<&LogoSettings>,
    ) -> CarouselResult<Vec<RenderedImage>> {
        let mut out = Vec::with_capacity(slides.len());
        for (index, slide) in slides.iter().enumerate() {
            out.push(self.render_slide_at(index, slide, settings, logo)?);
        }

        let stats = self.stats();
        tracing::info!(
            rendered = out.len(),
            background_fallbacks = stats.background_fallbacks,
            logo_fallbacks = stats.logo_fallbacks,
            "batch rendered"
        );
        Ok(out)
    }

    /// Render every slide of `deck` with its settings and active logo.
    pub fn render_deck(&mut self, deck: &Deck) -> CarouselResult<Vec<RenderedImage>> {
        self.render_all(&deck.slides, &deck.settings, deck.active_logo())
    }
}

/// Render `slides` with a renderer built from default options.
pub fn render_all(
    slides: &[SlideSpec],
    settings: &GlobalRenderSettings,
    logo: Option<&LogoSettings>,
) -> CarouselResult<Vec<RenderedImage>> {
    SlideRenderer::new(RendererOpts::default()).render_all(slides, settings, logo)
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
