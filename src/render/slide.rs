use std::collections::HashMap;
use std::path::PathBuf;

use crate::{
    assets::cache::AssetCache,
    assets::fonts::{FontFace, FontLibrary},
    foundation::core::{Canvas, DEFAULT_BACKGROUND, Rgba8},
    foundation::error::CarouselResult,
    layout::block::TextBlock,
    layout::engine::TextLayoutEngine,
    layout::wrap::wrap_text,
    model::settings::{GlobalRenderSettings, LogoSettings},
    model::slide::SlideSpec,
    render::background::{BackgroundOutcome, paint_background},
    render::canvas::SlideCanvas,
    render::logo::{LogoOutcome, paint_logo},
    render::text::{paint_text, position_lines},
};

/// Renderer configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RendererOpts {
    /// Directory that relative image paths are resolved against.
    pub assets_root: PathBuf,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` fonts.
    pub font_dirs: Vec<PathBuf>,
    /// Load the host's installed fonts.
    pub system_fonts: bool,
    /// Background for color slides without a color of their own.
    pub default_background: Rgba8,
}

impl Default for RendererOpts {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("."),
            font_dirs: Vec::new(),
            system_fonts: true,
            default_background: DEFAULT_BACKGROUND,
        }
    }
}

/// One rendered slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    /// Position in the input order, starting at 0.
    pub index: usize,
    pub width: u32,
    pub height: u32,
    /// PNG-encoded pixels.
    pub png: Vec<u8>,
}

/// Counters collected across the renders of one [`SlideRenderer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub slides: u64,
    pub background_fallbacks: u64,
    pub logo_fallbacks: u64,
}

/// Renders slides to PNG.
///
/// Holds the font library, the shaper and the image cache, so one renderer should be reused for
/// every slide of a deck.
pub struct SlideRenderer {
    canvas: Canvas,
    opts: RendererOpts,
    fonts: FontLibrary,
    engine: TextLayoutEngine,
    assets: AssetCache,
    faces: HashMap<String, FontFace>,
    stats: RenderStats,
}

impl std::fmt::Debug for SlideRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideRenderer")
            .field("opts", &self.opts)
            .field("fonts", &self.fonts)
            .field("stats", &self.stats)
            .finish()
    }
}

impl SlideRenderer {
    pub fn new(opts: RendererOpts) -> Self {
        let fonts = FontLibrary::new(opts.system_fonts, opts.font_dirs.as_slice());
        Self::with_fonts(opts, fonts)
    }

    /// Use an already populated font library instead of scanning `opts.font_dirs`.
    pub fn with_fonts(opts: RendererOpts, fonts: FontLibrary) -> Self {
        Self {
            canvas: Canvas::SLIDE,
            assets: AssetCache::new(opts.assets_root.clone()).with_svg_fonts(fonts.database()),
            opts,
            fonts,
            engine: TextLayoutEngine::new(),
            faces: HashMap::new(),
            stats: RenderStats::default(),
        }
    }

    pub fn opts(&self) -> &RendererOpts {
        &self.opts
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// Render one slide to a 1080x1350 PNG.
    pub fn render_slide(
        &mut self,
        slide: &SlideSpec,
        settings: &GlobalRenderSettings,
        logo: Option<&LogoSettings>,
    ) -> CarouselResult<RenderedImage> {
        self.render_slide_at(0, slide, settings, logo)
    }

    /// [`SlideRenderer::render_slide`] for the slide at `index` of a deck.
    #[tracing::instrument(level = "debug", skip(self, slide, settings, logo))]
    pub fn render_slide_at(
        &mut self,
        index: usize,
        slide: &SlideSpec,
        settings: &GlobalRenderSettings,
        logo: Option<&LogoSettings>,
    ) -> CarouselResult<RenderedImage> {
        let canvas = self.compose(slide, settings, logo)?;
        let png = canvas.encode_png()?;
        Ok(RenderedImage {
            index,
            width: self.canvas.width,
            height: self.canvas.height,
            png,
        })
    }

    /// Paint a slide and return the canvas without encoding it.
    pub fn compose(
        &mut self,
        slide: &SlideSpec,
        settings: &GlobalRenderSettings,
        logo: Option<&LogoSettings>,
    ) -> CarouselResult<SlideCanvas> {
        settings.validate()?;
        if let Some(logo) = logo {
            logo.validate()?;
        }

        let mut canvas = SlideCanvas::new(self.canvas)?;
        let background = paint_background(
            &mut canvas,
            slide,
            &mut self.assets,
            self.opts.default_background,
        )?;
        if background == BackgroundOutcome::Fallback {
            self.stats.background_fallbacks += 1;
        }

        if slide.has_text() {
            self.paint_slide_text(&mut canvas, &slide.text, settings)?;
        }

        if let Some(logo) = logo
            && paint_logo(&mut canvas, logo, &mut self.assets)? == LogoOutcome::Failed
        {
            self.stats.logo_fallbacks += 1;
        }

        self.stats.slides += 1;
        Ok(canvas)
    }

    fn paint_slide_text(
        &mut self,
        canvas: &mut SlideCanvas,
        text: &str,
        settings: &GlobalRenderSettings,
    ) -> CarouselResult<()> {
        let face = self.face_for(&settings.font_family)?;
        let style = self.engine.style(&face, settings.font_size_px())?;
        let max_width = self.canvas.text_width() as f32;
        let lines = wrap_text(text, max_width, self.engine.measurer(&style));
        tracing::debug!(lines = lines.len(), family = style.family(), "wrapped slide text");

        let block = TextBlock::place(
            lines,
            f64::from(settings.font_size),
            settings.text_align,
            self.canvas,
        );
        let positioned = position_lines(&mut self.engine, &style, &block);
        paint_text(canvas, &style, &positioned, settings.text_color)
    }

    fn face_for(&mut self, family: &str) -> CarouselResult<FontFace> {
        if let Some(face) = self.faces.get(family) {
            return Ok(face.clone());
        }
        let face = self.fonts.resolve_bold(family)?;
        self.faces.insert(family.to_string(), face.clone());
        Ok(face)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/slide.rs"]
mod tests;
