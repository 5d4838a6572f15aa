use super::*;

#[test]
fn builder_keeps_slide_order_and_settings() {
    let deck = DeckBuilder::new("Roboto", 48)
        .text_color(Rgba8::opaque(10, 20, 30))
        .align(TextAlign::Left)
        .color_slide("one", Rgba8::BLACK)
        .image_slide("two", ImageSource::path("bg.png"), Some(Rgba8::WHITE))
        .color_slide("three", Rgba8::WHITE)
        .logo(ImageSource::path("logo.svg"), LogoPosition::BottomRight, 90)
        .build()
        .unwrap();

    let texts: Vec<&str> = deck.slides.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["one", "two", "three"]);
    assert_eq!(deck.settings.font_size, 48);
    assert_eq!(deck.settings.text_align, TextAlign::Left);
    assert_eq!(deck.active_logo().map(|l| l.size), Some(90));
}

#[test]
fn builder_validates() {
    assert!(DeckBuilder::new("Roboto", 48).build().is_err());
    assert!(
        DeckBuilder::new("Roboto", 0)
            .color_slide("x", Rgba8::BLACK)
            .build()
            .is_err()
    );
}
