use crate::{
    foundation::core::{Canvas, LINE_HEIGHT_FACTOR, TEXT_PADDING},
    model::settings::TextAlign,
};

/// One wrapped line and where it goes on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Horizontal anchor. Its meaning depends on the alignment: the left edge, the center or the
    /// right edge of the line.
    pub anchor_x: f64,
    /// Vertical center of the line slot.
    pub center_y: f64,
}

/// Vertically centered block of wrapped lines.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub align: TextAlign,
    pub line_height: f64,
    pub total_height: f64,
    pub lines: Vec<PlacedLine>,
}

impl TextBlock {
    /// Place `lines` in the middle of `canvas`, one `font_size * 1.3` slot per line.
    pub fn place(lines: Vec<String>, font_size: f64, align: TextAlign, canvas: Canvas) -> Self {
        let line_height = font_size * LINE_HEIGHT_FACTOR;
        let total_height = lines.len() as f64 * line_height;
        let start_y = (canvas.height_f64() - total_height) / 2.0 + line_height / 2.0;
        let anchor_x = anchor_x(align, canvas);

        let lines = lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| PlacedLine {
                text,
                anchor_x,
                center_y: start_y + i as f64 * line_height,
            })
            .collect();

        Self {
            align,
            line_height,
            total_height,
            lines,
        }
    }
}

/// Alignment anchor: left padding, canvas center or right padding.
pub fn anchor_x(align: TextAlign, canvas: Canvas) -> f64 {
    match align {
        TextAlign::Left => TEXT_PADDING,
        TextAlign::Center => canvas.width_f64() / 2.0,
        TextAlign::Right => canvas.width_f64() - TEXT_PADDING,
    }
}

/// Left edge of a line of width `line_width` anchored at `anchor_x`.
pub fn line_left(align: TextAlign, anchor_x: f64, line_width: f64) -> f64 {
    match align {
        TextAlign::Left => anchor_x,
        TextAlign::Center => anchor_x - line_width / 2.0,
        TextAlign::Right => anchor_x - line_width,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/block.rs"]
mod tests;
