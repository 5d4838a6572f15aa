use std::borrow::Cow;
use std::collections::HashMap;

use crate::{
    assets::fonts::FontFace,
    foundation::error::{CarouselError, CarouselResult},
    layout::wrap::TextMeasurer,
};

/// A registered bold face at a fixed size.
#[derive(Clone)]
pub struct TextStyle {
    family: String,
    size_px: f32,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextStyle")
            .field("family", &self.family)
            .field("size_px", &self.size_px)
            .finish()
    }
}

impl TextStyle {
    /// Family name the shaper resolved for this face.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Font handle for the rasterizer's glyph runs.
    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }
}

/// A single shaped line. Glyph positions are relative to the line's left edge and the top of its
/// layout box.
#[derive(Clone, Debug, Default)]
pub struct ShapedLine {
    pub glyphs: Vec<vello_cpu::Glyph>,
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
    /// Baseline offset from the top of the layout box.
    pub baseline: f32,
}

impl ShapedLine {
    /// Vertical translation that puts the middle of the em box (`textBaseline = "middle"`) on
    /// `center_y`.
    pub fn offset_for_center(&self, center_y: f32) -> f32 {
        center_y - (self.baseline - (self.ascent - self.descent) / 2.0)
    }
}

/// Parley-backed shaping and measurement for slide text.
///
/// Font bytes are registered once per face; only registered faces are visible to the shaper.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    registered: HashMap<(String, u32, usize), (String, vello_cpu::peniko::FontData)>,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("registered_faces", &self.registered.len())
            .finish()
    }
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    /// Register `face` (if new) and return a style for it at `size_px`.
    pub fn style(&mut self, face: &FontFace, size_px: f32) -> CarouselResult<TextStyle> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CarouselError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let key = (face.family.clone(), face.index, face.bytes.len());
        if let Some((family, font)) = self.registered.get(&key) {
            return Ok(TextStyle {
                family: family.clone(),
                size_px,
                font: font.clone(),
            });
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes.to_vec()), None);
        let mut names = Vec::with_capacity(families.len());
        for (id, _) in &families {
            if let Some(name) = self.font_ctx.collection.family_name(*id) {
                names.push(name.to_string());
            }
        }
        let family = names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(&face.family))
            .or_else(|| names.first())
            .cloned()
            .ok_or_else(|| {
                CarouselError::font(format!("font '{}' registered no families", face.family))
            })?;

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes.to_vec()),
            face.index,
        );
        tracing::debug!(family = %family, index = face.index, "registered font face");
        self.registered.insert(key, (family.clone(), font.clone()));

        Ok(TextStyle {
            family,
            size_px,
            font,
        })
    }

    fn layout(&mut self, text: &str, style: &TextStyle) -> parley::Layout<()> {
        let text = canvas_whitespace(text);
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &*text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(style.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));

        let mut layout: parley::Layout<()> = builder.build(&*text);
        layout.break_all_lines(None);
        layout
    }

    /// Advance width of `text` as one unbroken line.
    pub fn measure(&mut self, text: &str, style: &TextStyle) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout(text, style).width()
    }

    /// Shape `text` as one unbroken line.
    pub fn shape_line(&mut self, text: &str, style: &TextStyle) -> ShapedLine {
        if text.is_empty() {
            return ShapedLine::default();
        }

        let layout = self.layout(text, style);
        let mut out = ShapedLine {
            width: layout.width(),
            ..ShapedLine::default()
        };
        for (i, line) in layout.lines().enumerate() {
            if i == 0 {
                let m = line.metrics();
                out.ascent = m.ascent;
                out.descent = m.descent;
                out.baseline = m.baseline;
            }
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                out.glyphs
                    .extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    }));
            }
        }
        out
    }

    /// A [`TextMeasurer`] measuring with `style`.
    pub fn measurer<'a>(&'a mut self, style: &'a TextStyle) -> StyledMeasurer<'a> {
        StyledMeasurer {
            engine: self,
            style,
        }
    }
}

/// [`TextMeasurer`] view over a [`TextLayoutEngine`] and one style.
#[derive(Debug)]
pub struct StyledMeasurer<'a> {
    engine: &'a mut TextLayoutEngine,
    style: &'a TextStyle,
}

impl TextMeasurer for StyledMeasurer<'_> {
    fn measure(&mut self, text: &str) -> f32 {
        self.engine.measure(text, self.style)
    }
}

/// Canvas text preparation: every ASCII whitespace character draws as a plain space.
fn canvas_whitespace(text: &str) -> Cow<'_, str> {
    if text.chars().any(|c| c.is_ascii_whitespace() && c != ' ') {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_ascii_whitespace() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
