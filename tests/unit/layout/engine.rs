use super::*;
use crate::assets::fonts::fixture_library;
use crate::layout::wrap::wrap_text;

fn system_face() -> Option<FontFace> {
    let lib = fixture_library(std::thread::current().name().unwrap_or("text test"))?;
    lib.resolve_bold("sans-serif").ok()
}

#[test]
fn whitespace_is_flattened_to_spaces() {
    assert_eq!(canvas_whitespace("a\nb\tc"), "a b c");
    assert!(matches!(canvas_whitespace("plain text"), Cow::Borrowed(_)));
}

#[test]
fn center_offset_puts_em_middle_on_target() {
    let line = ShapedLine {
        glyphs: vec![],
        width: 10.0,
        ascent: 40.0,
        descent: 10.0,
        baseline: 40.0,
    };
    // Baseline lands 15px below the center: (ascent - descent) / 2.
    let dy = line.offset_for_center(100.0);
    assert!((line.baseline + dy - 115.0).abs() < 1e-4);
}

#[test]
fn rejects_non_positive_size() {
    let Some(face) = system_face() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    assert!(engine.style(&face, 0.0).is_err());
    assert!(engine.style(&face, f32::NAN).is_err());
}

#[test]
fn measurement_grows_with_text_and_size() {
    let Some(face) = system_face() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let small = engine.style(&face, 32.0).unwrap();
    let large = engine.style(&face, 64.0).unwrap();
    assert_eq!(small.family(), large.family());

    assert_eq!(engine.measure("", &small), 0.0);
    let w1 = engine.measure("Hello", &small);
    let w2 = engine.measure("Hello World", &small);
    let w3 = engine.measure("Hello World", &large);
    assert!(w1 > 0.0);
    assert!(w2 > w1);
    assert!(w3 > w2);
}

#[test]
fn shaped_line_has_glyphs_within_its_width() {
    let Some(face) = system_face() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let style = engine.style(&face, 64.0).unwrap();
    let line = engine.shape_line("Hello World", &style);
    assert!(!line.glyphs.is_empty());
    assert!(line.ascent > 0.0);
    assert!(line.glyphs.iter().all(|g| g.x >= -1.0 && g.x <= line.width + 1.0));
}

#[test]
fn measurer_drives_wrapping() {
    let Some(face) = system_face() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let style = engine.style(&face, 64.0).unwrap();
    let short = wrap_text("Hello World", 920.0, engine.measurer(&style));
    assert_eq!(short, vec!["Hello World".to_string()]);

    let long = "word ".repeat(60);
    let lines = wrap_text(long.trim_end(), 920.0, engine.measurer(&style));
    assert!(lines.len() > 1);
}
