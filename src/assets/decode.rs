use std::{io::Cursor, sync::Arc};

use anyhow::Context;
use image::ImageDecoder as _;
use usvg::fontdb;

use crate::foundation::error::{CarouselError, CarouselResult};

/// Largest raster edge produced when rasterizing vector logos or backgrounds.
const MAX_RASTER_DIM: u32 = 16_384;

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Parsed SVG document, rasterized on demand at its final drawn size.
#[derive(Clone, Debug)]
pub struct PreparedSvg {
    pub tree: Arc<usvg::Tree>,
}

/// A decoded background or logo image.
#[derive(Clone, Debug)]
pub enum PreparedGraphic {
    Raster(PreparedImage),
    Svg(PreparedSvg),
}

impl PreparedGraphic {
    /// Intrinsic size in pixels (SVG: its document size).
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Raster(img) => (f64::from(img.width), f64::from(img.height)),
            Self::Svg(svg) => {
                let s = svg.tree.size();
                (f64::from(s.width()), f64::from(s.height()))
            }
        }
    }

    /// Raster form suitable for drawing at `draw_w` x `draw_h` pixels.
    ///
    /// Bitmaps are returned as-is and scaled by the rasterizer; SVGs are rasterized at the
    /// target size so they stay sharp.
    pub fn raster_for(&self, draw_w: f64, draw_h: f64) -> CarouselResult<PreparedImage> {
        match self {
            Self::Raster(img) => Ok(img.clone()),
            Self::Svg(svg) => {
                let w = raster_dim(draw_w)?;
                let h = raster_dim(draw_h)?;
                rasterize_svg(&svg.tree, w, h)
            }
        }
    }
}

fn raster_dim(v: f64) -> CarouselResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(CarouselError::decode("svg draw size must be finite and > 0"));
    }
    let px = (v.ceil() as u32).max(1);
    if px > MAX_RASTER_DIM {
        return Err(CarouselError::decode(format!(
            "svg raster size too large: {px} (max {MAX_RASTER_DIM})"
        )));
    }
    Ok(px)
}

/// Inputs to [`decode_graphic`] beyond the bytes themselves.
#[derive(Clone, Debug)]
pub struct DecodeOpts {
    /// Faces available to `<text>` elements inside SVG documents.
    pub svg_fontdb: Arc<fontdb::Database>,
    /// Media type declared by the source (`data:` URL MIME or file extension), if any.
    pub media_type: Option<String>,
}

impl Default for DecodeOpts {
    fn default() -> Self {
        Self {
            svg_fontdb: Arc::new(fontdb::Database::new()),
            media_type: None,
        }
    }
}

impl DecodeOpts {
    fn declares_svg(&self) -> bool {
        self.media_type
            .as_deref()
            .is_some_and(|m| m.trim().eq_ignore_ascii_case("image/svg+xml"))
    }
}

/// Decode encoded bytes as SVG or bitmap.
///
/// SVG is chosen when the source declares `image/svg+xml` or the content sniffs as SVG.
pub fn decode_graphic(bytes: &[u8], opts: &DecodeOpts) -> CarouselResult<PreparedGraphic> {
    if opts.declares_svg() || looks_like_svg(bytes) {
        Ok(PreparedGraphic::Svg(parse_svg(bytes, &opts.svg_fontdb)?))
    } else {
        Ok(PreparedGraphic::Raster(decode_image(bytes)?))
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
///
/// EXIF orientation is applied, so the result has the dimensions a viewer displays.
pub fn decode_image(bytes: &[u8]) -> CarouselResult<PreparedImage> {
    if bytes.is_empty() {
        return Err(CarouselError::decode("image data is empty"));
    }
    let mut decoder = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CarouselError::decode(format!("sniff image format: {e}")))?
        .into_decoder()
        .map_err(|e| CarouselError::decode(format!("decode image from memory: {e}")))?;
    let orientation = decoder
        .orientation()
        .unwrap_or(image::metadata::Orientation::NoTransforms);
    let mut dyn_img = image::DynamicImage::from_decoder(decoder)
        .map_err(|e| CarouselError::decode(format!("decode image from memory: {e}")))?;
    dyn_img.apply_orientation(orientation);
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(CarouselError::decode("image has zero width or height"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes into a prepared `usvg` tree, resolving `<text>` against `fontdb`.
pub fn parse_svg(bytes: &[u8], fontdb: &Arc<fontdb::Database>) -> CarouselResult<PreparedSvg> {
    let opts = usvg::Options {
        fontdb: Arc::clone(fontdb),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| CarouselError::decode(format!("parse svg tree: {e}")))?;
    let size = tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(CarouselError::decode("svg has invalid width/height"));
    }
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> CarouselResult<PreparedImage> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .context("allocate svg pixmap")
        .map_err(CarouselError::from)?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.take()),
    })
}

/// True when the document's first element is `<svg>`.
///
/// A leading BOM, whitespace, processing instructions, comments and a doctype are skipped.
pub(crate) fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(4096)]);
    let mut t = head.trim_start_matches('\u{feff}').trim_start();
    loop {
        if t.starts_with("<svg") {
            return true;
        }
        let rest = if let Some(r) = t.strip_prefix("<?") {
            r.find("?>").map(|end| &r[end + 2..])
        } else if let Some(r) = t.strip_prefix("<!--") {
            r.find("-->").map(|end| &r[end + 3..])
        } else if let Some(r) = t.strip_prefix("<!") {
            skip_doctype(r)
        } else {
            None
        };
        match rest {
            Some(r) => t = r.trim_start(),
            None => return false,
        }
    }
}

// Doctype body up to its closing '>', including an optional `[...]` internal subset.
fn skip_doctype(body: &str) -> Option<&str> {
    let gt = body.find('>')?;
    match body.find('[') {
        Some(open) if open < gt => {
            let close = open + body[open..].find(']')?;
            let gt = close + body[close..].find('>')?;
            Some(&body[gt + 1..])
        }
        _ => Some(&body[gt + 1..]),
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
