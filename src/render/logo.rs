use crate::{
    assets::cache::AssetCache,
    foundation::core::{Affine, Canvas, LOGO_MARGIN, Rect, affine_to_cpu},
    foundation::error::{CarouselError, CarouselResult},
    model::settings::{LogoPosition, LogoSettings},
    render::canvas::{SlideCanvas, image_paint},
};

/// What the logo stage ended up drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoOutcome {
    Drawn,
    /// Disabled or no image configured.
    Skipped,
    /// The image could not be loaded; the slide has no logo.
    Failed,
}

/// Drawn logo size: the longer side becomes `size`, the other keeps the aspect ratio.
pub fn logo_size(img_w: f64, img_h: f64, size: u32) -> (f64, f64) {
    let size = f64::from(size);
    let aspect = img_w / img_h;
    if aspect >= 1.0 {
        (size, size / aspect)
    } else {
        (size * aspect, size)
    }
}

/// Where a logo of intrinsic size `img_w` x `img_h` lands for `position`.
pub fn logo_rect(img_w: f64, img_h: f64, size: u32, position: LogoPosition, canvas: Canvas) -> Rect {
    let (w, h) = logo_size(img_w, img_h, size);
    let (cw, ch) = (canvas.width_f64(), canvas.height_f64());
    let x = match position {
        LogoPosition::TopLeft | LogoPosition::BottomLeft => LOGO_MARGIN,
        LogoPosition::TopRight | LogoPosition::BottomRight => cw - w - LOGO_MARGIN,
    };
    let y = match position {
        LogoPosition::TopLeft | LogoPosition::TopRight => LOGO_MARGIN,
        LogoPosition::BottomLeft | LogoPosition::BottomRight => ch - h - LOGO_MARGIN,
    };
    Rect::new(x, y, x + w, y + h)
}

/// Draw the logo if it is enabled and loadable. Load failures are logged, not returned.
pub fn paint_logo(
    canvas: &mut SlideCanvas,
    logo: &LogoSettings,
    assets: &mut AssetCache,
) -> CarouselResult<LogoOutcome> {
    let Some(source) = logo.image.as_ref().filter(|_| logo.enabled) else {
        return Ok(LogoOutcome::Skipped);
    };

    match draw_logo(canvas, logo, assets, source) {
        Ok(()) => Ok(LogoOutcome::Drawn),
        Err(e) => {
            tracing::warn!(source = %source.describe(), error = %e, "logo unavailable, skipping");
            Ok(LogoOutcome::Failed)
        }
    }
}

fn draw_logo(
    canvas: &mut SlideCanvas,
    logo: &LogoSettings,
    assets: &mut AssetCache,
    source: &crate::model::slide::ImageSource,
) -> CarouselResult<()> {
    let graphic = assets.get_or_load(source)?;
    let (iw, ih) = graphic.size();
    if !(iw > 0.0 && ih > 0.0 && iw.is_finite() && ih.is_finite()) {
        return Err(CarouselError::decode("logo image has no area"));
    }

    let dest = logo_rect(iw, ih, logo.size, logo.position, canvas.canvas());
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
#[path = "../../tests/unit/render/logo.rs"]
mod tests;
