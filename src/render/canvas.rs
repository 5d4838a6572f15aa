use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context;

use crate::{
    assets::decode::{PreparedImage, unpremultiply_rgba8_in_place},
    foundation::core::{Canvas, Rgba8},
    foundation::error::{CarouselError, CarouselResult},
    render::composite::{fill_over_in_place, over_in_place},
};

/// The pixel surface of one slide.
///
/// `vello_cpu` renders into a fresh buffer every time, so every drawing stage renders into a
/// transparent layer which is then composited over the accumulated base.
pub struct SlideCanvas {
    canvas: Canvas,
    base: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for SlideCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideCanvas")
            .field("width", &self.canvas.width)
            .field("height", &self.canvas.height)
            .finish()
    }
}

impl SlideCanvas {
    /// A transparent canvas.
    pub fn new(canvas: Canvas) -> CarouselResult<Self> {
        let (w, h) = dims_u16(canvas.width, canvas.height)?;
        Ok(Self {
            canvas,
            base: vello_cpu::Pixmap::new(w, h),
            ctx: None,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.base.data_as_u8_slice()
    }

    /// Straight-alpha color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = ((y as usize) * (self.canvas.width as usize) + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels()[i..i + 4]);
        unpremultiply_rgba8_in_place(&mut px);
        Some(Rgba8::new(px[0], px[1], px[2], px[3]))
    }

    /// Replace every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let premul = color.to_premul();
        for px in self.base.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Composite a translucent `color` over the whole canvas.
    pub fn overlay(&mut self, color: Rgba8) {
        fill_over_in_place(self.base.data_as_u8_slice_mut(), color.to_premul());
    }

    /// Run `draw` against a fresh transparent layer and return the rendered layer.
    pub(crate) fn render_layer(
        &mut self,
        draw: impl FnOnce(&mut vello_cpu::RenderContext) -> CarouselResult<()>,
    ) -> CarouselResult<vello_cpu::Pixmap> {
        let (w, h) = (self.base.width(), self.base.height());
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let mut layer = vello_cpu::Pixmap::new(w, h);
        let drawn = draw(&mut ctx);
        if drawn.is_ok() {
            ctx.flush();
            ctx.render_to_pixmap(&mut layer);
        }
        self.ctx = Some(ctx);
        drawn.map(|()| layer)
    }

    /// Composite a premultiplied layer of the canvas size over the base.
    pub(crate) fn composite(&mut self, layer: &vello_cpu::Pixmap) -> CarouselResult<()> {
        over_in_place(
            self.base.data_as_u8_slice_mut(),
            layer.data_as_u8_slice(),
        )
    }

    /// Render `draw` into a layer and composite it over the base.
    pub(crate) fn draw_layer(
        &mut self,
        draw: impl FnOnce(&mut vello_cpu::RenderContext) -> CarouselResult<()>,
    ) -> CarouselResult<()> {
        let layer = self.render_layer(draw)?;
        self.composite(&layer)
    }

    /// Straight-alpha RGBA8 pixels.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut data = self.pixels().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        data
    }

    /// Encode the canvas as PNG.
    pub fn encode_png(&self) -> CarouselResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.canvas.width, self.canvas.height, self.to_rgba8())
            .ok_or_else(|| CarouselError::render("canvas buffer does not match its size"))?;
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .context("encode slide png")?;
        Ok(out)
    }
}

/// Image paint for a prepared raster, drawn in its own pixel coordinates.
pub(crate) fn image_paint(img: &PreparedImage) -> CarouselResult<vello_cpu::Image> {
    let (w, h) = dims_u16(img.width, img.height)?;
    if img.rgba8_premul.len() != (img.width as usize) * (img.height as usize) * 4 {
        return Err(CarouselError::render("image byte len mismatch"));
    }
    let pixels = img
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn dims_u16(width: u32, height: u32) -> CarouselResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CarouselError::render(format!("width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CarouselError::render(format!("height {height} exceeds u16")))?;
    if w == 0 || h == 0 {
        return Err(CarouselError::render("surface size must be non-zero"));
    }
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
