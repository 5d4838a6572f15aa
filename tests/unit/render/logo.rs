use std::io::Cursor;

use super::*;
use crate::foundation::core::Rgba8;
use crate::model::slide::ImageSource;

fn png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn landscape_logo_takes_size_as_width() {
    assert_eq!(logo_size(200.0, 100.0, 120), (120.0, 60.0));
    assert_eq!(logo_size(100.0, 100.0, 120), (120.0, 120.0));
}

#[test]
fn portrait_logo_takes_size_as_height() {
    assert_eq!(logo_size(100.0, 200.0, 120), (60.0, 120.0));
}

#[test]
fn corners_are_inset_by_margin() {
    let c = Canvas::SLIDE;
    let tl = logo_rect(200.0, 100.0, 120, LogoPosition::TopLeft, c);
    assert_eq!((tl.x0, tl.y0), (40.0, 40.0));

    let tr = logo_rect(200.0, 100.0, 120, LogoPosition::TopRight, c);
    assert_eq!((tr.x1, tr.y0), (1040.0, 40.0));

    let bl = logo_rect(200.0, 100.0, 120, LogoPosition::BottomLeft, c);
    assert_eq!((bl.x0, bl.y1), (40.0, 1310.0));

    let br = logo_rect(200.0, 100.0, 120, LogoPosition::BottomRight, c);
    assert_eq!((br.x1, br.y1), (1040.0, 1310.0));
    assert_eq!(br.width(), 120.0);
    assert_eq!(br.height(), 60.0);
}

#[test]
fn every_corner_stays_on_canvas() {
    let c = Canvas::SLIDE;
    for pos in LogoPosition::ALL {
        let r = logo_rect(50.0, 80.0, 300, pos, c);
        assert!(r.x0 >= 40.0 && r.y0 >= 40.0);
        assert!(r.x1 <= 1040.0 && r.y1 <= 1310.0);
    }
}

#[test]
fn disabled_logo_is_skipped() {
    let mut canvas = SlideCanvas::new(Canvas::SLIDE).unwrap();
    let mut assets = AssetCache::new(".");
    let mut logo = LogoSettings::new(ImageSource::path("x.png"), LogoPosition::TopLeft, 120);
    logo.enabled = false;
    assert_eq!(
        paint_logo(&mut canvas, &logo, &mut assets).unwrap(),
        LogoOutcome::Skipped
    );
    assert_eq!(assets.decode_count(&ImageSource::path("x.png")), 0);
}

#[test]
fn unloadable_logo_is_omitted() {
    let mut canvas = SlideCanvas::new(Canvas::SLIDE).unwrap();
    canvas.fill(Rgba8::BLACK);
    let before = canvas.pixels().to_vec();
    let mut assets = AssetCache::new(".");
    let logo = LogoSettings::new(ImageSource::from_uri("data:image/png;base64,!!!"), LogoPosition::TopLeft, 120);
    assert_eq!(
        paint_logo(&mut canvas, &logo, &mut assets).unwrap(),
        LogoOutcome::Failed
    );
    assert_eq!(canvas.pixels(), &before[..]);
}

#[test]
fn logo_is_drawn_in_its_corner_only() {
    let mut canvas = SlideCanvas::new(Canvas::SLIDE).unwrap();
    canvas.fill(Rgba8::BLACK);
    let mut assets = AssetCache::new(".");
    let logo = LogoSettings::new(
        ImageSource::bytes(png(20, 10, [255, 0, 0, 255])),
        LogoPosition::BottomRight,
        120,
    );
    assert_eq!(
        paint_logo(&mut canvas, &logo, &mut assets).unwrap(),
        LogoOutcome::Drawn
    );
    // Logo occupies x 920..1040, y 1250..1310.
    assert_eq!(canvas.pixel(980, 1280), Some(Rgba8::opaque(255, 0, 0)));
    assert_eq!(canvas.pixel(1060, 1280), Some(Rgba8::BLACK));
    assert_eq!(canvas.pixel(980, 1320), Some(Rgba8::BLACK));
    assert_eq!(canvas.pixel(40, 40), Some(Rgba8::BLACK));
}
