use crate::{
    foundation::core::{Affine, Rgba8, SHADOW_BLUR_PX, SHADOW_COLOR, SHADOW_OFFSET, affine_to_cpu},
    foundation::error::CarouselResult,
    layout::block::{TextBlock, line_left},
    layout::engine::{ShapedLine, TextLayoutEngine, TextStyle},
    render::blur::{blur_painted_region_in_place, radius_for_sigma, shadow_sigma},
    render::canvas::SlideCanvas,
};

/// A shaped line with its final translation on the canvas.
#[derive(Clone, Debug)]
pub struct PositionedLine {
    pub shaped: ShapedLine,
    pub origin: (f32, f32),
}

/// Shape every line of `block` and work out where its glyphs go.
pub fn position_lines(
    engine: &mut TextLayoutEngine,
    style: &TextStyle,
    block: &TextBlock,
) -> Vec<PositionedLine> {
    block
        .lines
        .iter()
        .map(|line| {
            let shaped = engine.shape_line(&line.text, style);
            let x = line_left(block.align, line.anchor_x, f64::from(shaped.width)) as f32;
            let y = shaped.offset_for_center(line.center_y as f32);
            PositionedLine {
                shaped,
                origin: (x, y),
            }
        })
        .collect()
}

/// Draw the text block: blurred drop shadow first, then the glyphs in `color`.
pub fn paint_text(
    canvas: &mut SlideCanvas,
    style: &TextStyle,
    lines: &[PositionedLine],
    color: Rgba8,
) -> CarouselResult<()> {
    if lines.iter().all(|l| l.shaped.glyphs.is_empty()) {
        return Ok(());
    }

    let mut shadow = canvas.render_layer(|ctx| {
        fill_lines(ctx, style, lines, SHADOW_COLOR, SHADOW_OFFSET);
        Ok(())
    })?;
    let (w, h) = (u32::from(shadow.width()), u32::from(shadow.height()));
    let sigma = shadow_sigma(SHADOW_BLUR_PX);
    blur_painted_region_in_place(
        shadow.data_as_u8_slice_mut(),
        w,
        h,
        radius_for_sigma(sigma),
        sigma,
    )?;
    canvas.composite(&shadow)?;

    canvas.draw_layer(|ctx| {
        fill_lines(ctx, style, lines, color, (0.0, 0.0));
        Ok(())
    })
}

fn fill_lines(
    ctx: &mut vello_cpu::RenderContext,
    style: &TextStyle,
    lines: &[PositionedLine],
    color: Rgba8,
    offset: (f64, f64),
) {
    ctx.set_paint(color.to_cpu());
    for line in lines {
        if line.shaped.glyphs.is_empty() {
            continue;
        }
        let (x, y) = line.origin;
        let tr = Affine::translate((f64::from(x) + offset.0, f64::from(y) + offset.1));
        ctx.set_transform(affine_to_cpu(tr));
        ctx.glyph_run(style.font())
            .font_size(style.size_px())
            .fill_glyphs(line.shaped.glyphs.iter().copied());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
