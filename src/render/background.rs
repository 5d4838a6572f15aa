use crate::{
    assets::cache::AssetCache,
    foundation::core::{Affine, Canvas, Rect, Rgba8, SCRIM_COLOR, affine_to_cpu},
    foundation::error::{CarouselError, CarouselResult},
    model::slide::{BackgroundKind, SlideSpec},
    render::canvas::{SlideCanvas, image_paint},
};

/// What the background stage ended up drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundOutcome {
    Color,
    Image,
    /// The image could not be used; the solid color was drawn instead.
    Fallback,
}

/// Cover-fit placement of an `img_w` x `img_h` image on `canvas`.
///
/// The image is scaled to cover the canvas completely and centered on the overflowing axis.
pub fn cover_rect(img_w: f64, img_h: f64, canvas: Canvas) -> Rect {
    let (cw, ch) = (canvas.width_f64(), canvas.height_f64());
    if img_w / img_h > canvas.aspect_ratio() {
        let w = img_w * ch / img_h;
        let x = (cw - w) / 2.0;
        Rect::new(x, 0.0, x + w, ch)
    } else {
        let h = img_h * cw / img_w;
        let y = (ch - h) / 2.0;
        Rect::new(0.0, y, cw, y + h)
    }
}

/// Paint the slide background.
///
/// Image failures never surface as errors: the slide falls back to its solid color.
pub fn paint_background(
    canvas: &mut SlideCanvas,
    slide: &SlideSpec,
    assets: &mut AssetCache,
    default_color: Rgba8,
) -> CarouselResult<BackgroundOutcome> {
    let color = slide.background_color.unwrap_or(default_color);
    canvas.fill(color);

    if slide.background_type != BackgroundKind::Image {
        return Ok(BackgroundOutcome::Color);
    }

    let Some(source) = slide.background_image.as_ref() else {
        tracing::warn!("image background without an image, using solid color");
        return Ok(BackgroundOutcome::Fallback);
    };

    match draw_cover_image(canvas, assets, source) {
        Ok(()) => {
            canvas.overlay(SCRIM_COLOR);
            Ok(BackgroundOutcome::Image)
        }
        Err(e) => {
            tracing::warn!(
                source = %source.describe(),
                error = %e,
                "background image unavailable, using solid color"
            );
            canvas.fill(color);
            Ok(BackgroundOutcome::Fallback)
        }
    }
}

fn draw_cover_image(
    canvas: &mut SlideCanvas,
    assets: &mut AssetCache,
    source: &crate::model::slide::ImageSource,
) -> CarouselResult<()> {
    let graphic = assets.get_or_load(source)?;
    let (iw, ih) = graphic.size();
    if !(iw > 0.0 && ih > 0.0 && iw.is_finite() && ih.is_finite()) {
        return Err(CarouselError::decode("background image has no area"));
    }

    let dest = cover_rect(iw, ih, canvas.canvas());
    let raster = graphic.raster_for(dest.width(), dest.height())?;
    let paint = image_paint(&raster)?;
    let (rw, rh) = (f64::from(raster.width), f64::from(raster.height));
    let tr = Affine::translate((dest.x0, dest.y0))
        * Affine::scale_non_uniform(dest.width() / rw, dest.height() / rh);

    canvas.draw_layer(|ctx| {
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, rw, rh));
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
