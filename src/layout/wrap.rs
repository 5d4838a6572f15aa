/// Width oracle used by [`wrap_text`].
pub trait TextMeasurer {
    /// Advance width of `text` in pixels.
    fn measure(&mut self, text: &str) -> f32;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn measure(&mut self, text: &str) -> f32 {
        (**self).measure(text)
    }
}

/// Deterministic measurer: every `char` advances by the same width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub advance: f32,
}

impl FixedAdvance {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl TextMeasurer for FixedAdvance {
    fn measure(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Words are the pieces between single spaces. A word that alone exceeds `max_width` is kept
/// whole on its own line. The result always holds at least one line (`""` for empty input).
pub fn wrap_text<M: TextMeasurer>(text: &str, max_width: f32, mut measurer: M) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };

        if !current.is_empty() && measurer.measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut current));
            current = word.to_owned();
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
