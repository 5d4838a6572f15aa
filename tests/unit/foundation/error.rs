use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CarouselError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CarouselError::decode("x").to_string().contains("decode error:"));
    assert!(CarouselError::font("x").to_string().contains("font error:"));
    assert!(CarouselError::render("x").to_string().contains("render error:"));
    assert!(
        CarouselError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CarouselError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
