use super::*;
use crate::assets::fonts::fixture_library;
use crate::foundation::core::Canvas;
use crate::model::settings::TextAlign;

fn style(engine: &mut TextLayoutEngine) -> Option<TextStyle> {
    let lib = fixture_library(std::thread::current().name().unwrap_or("text test"))?;
    let face = lib.resolve_bold("sans-serif").ok()?;
    engine.style(&face, 64.0).ok()
}

#[test]
fn lines_are_positioned_by_alignment() {
    let mut engine = TextLayoutEngine::new();
    let Some(style) = style(&mut engine) else {
        return;
    };
    for align in [TextAlign::Left, TextAlign::Center, TextAlign::Right] {
        let block = TextBlock::place(vec!["Hello".into()], 64.0, align, Canvas::SLIDE);
        let lines = position_lines(&mut engine, &style, &block);
        assert_eq!(lines.len(), 1);
        let l = &lines[0];
        let w = l.shaped.width;
        let expected = match align {
            TextAlign::Left => 80.0,
            TextAlign::Center => 540.0 - w / 2.0,
            TextAlign::Right => 1000.0 - w,
        };
        assert!((l.origin.0 - expected).abs() < 1e-3);
    }
}

#[test]
fn blank_lines_draw_nothing() {
    let mut engine = TextLayoutEngine::new();
    let Some(style) = style(&mut engine) else {
        return;
    };
    let mut canvas = SlideCanvas::new(Canvas::SLIDE).unwrap();
    canvas.fill(Rgba8::BLACK);
    let before = canvas.pixels().to_vec();
    let block = TextBlock::place(vec![String::new()], 64.0, TextAlign::Center, Canvas::SLIDE);
    let lines = position_lines(&mut engine, &style, &block);
    paint_text(&mut canvas, &style, &lines, Rgba8::WHITE).unwrap();
    assert_eq!(canvas.pixels(), &before[..]);
}

#[test]
fn text_and_shadow_stay_near_the_middle() {
    let mut engine = TextLayoutEngine::new();
    let Some(style) = style(&mut engine) else {
        return;
    };
    let mut canvas = SlideCanvas::new(Canvas::SLIDE).unwrap();
    canvas.fill(Rgba8::opaque(0, 0, 128));
    let block = TextBlock::place(vec!["HHHH".into()], 64.0, TextAlign::Center, Canvas::SLIDE);
    let lines = position_lines(&mut engine, &style, &block);
    paint_text(&mut canvas, &style, &lines, Rgba8::WHITE).unwrap();

    let row = 675u32;
    let bright = (0..1080)
        .filter_map(|x| canvas.pixel(x, row))
        .filter(|p| p.r > 200 && p.g > 200)
        .count();
    assert!(bright > 0, "expected white glyph pixels on the middle row");

    // The shadow darkens the background somewhere around the glyphs.
    let darkened = (0..1080)
        .flat_map(|x| (640..720).map(move |y| (x, y)))
        .filter_map(|(x, y)| canvas.pixel(x, y))
        .any(|p| p.b < 128 && p.r < 50);
    assert!(darkened, "expected shadow pixels");

    assert_eq!(canvas.pixel(0, 0), Some(Rgba8::opaque(0, 0, 128)));
    assert_eq!(canvas.pixel(1079, 1349), Some(Rgba8::opaque(0, 0, 128)));
}
