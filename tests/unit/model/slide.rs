use super::*;
use serde_json::json;

#[test]
fn slide_json_uses_camel_case_fields() {
    let s: SlideSpec = serde_json::from_value(json!({
        "text": "Hello World",
        "backgroundType": "color",
        "backgroundColor": "#112233"
    }))
    .unwrap();
    assert_eq!(s, SlideSpec::color("Hello World", Rgba8::opaque(0x11, 0x22, 0x33)));
}

#[test]
fn unknown_background_type_is_solid_color() {
    let s: SlideSpec = serde_json::from_value(json!({
        "text": "x",
        "backgroundType": "gradient",
        "backgroundColor": "#ffffff"
    }))
    .unwrap();
    assert_eq!(s.background_type, BackgroundKind::Color);
}

#[test]
fn missing_fields_default_to_blank_color_slide() {
    let s: SlideSpec = serde_json::from_value(json!({})).unwrap();
    assert_eq!(s.background_type, BackgroundKind::Color);
    assert!(s.background_color.is_none());
    assert!(!s.has_text());
}

#[test]
fn image_source_classifies_data_urls_and_paths() {
    let s: SlideSpec = serde_json::from_value(json!({
        "backgroundType": "image",
        "backgroundImage": "data:image/png;base64,AAAA"
    }))
    .unwrap();
    assert!(matches!(s.background_image, Some(ImageSource::DataUrl(_))));

    assert_eq!(
        ImageSource::from_uri("photos/a.jpg"),
        ImageSource::Path("photos/a.jpg".to_string())
    );
}

#[test]
fn in_memory_bytes_serialize_as_data_url() {
    let src = ImageSource::bytes(vec![1u8, 2, 3]);
    let v = serde_json::to_value(&src).unwrap();
    assert_eq!(v, json!("data:application/octet-stream;base64,AQID"));

    let back: ImageSource = serde_json::from_value(v).unwrap();
    assert!(matches!(back, ImageSource::DataUrl(_)));
}

#[test]
fn whitespace_only_text_is_blank() {
    assert!(!SlideSpec::color("  \t\n", Rgba8::BLACK).has_text());
    assert!(SlideSpec::color(" a ", Rgba8::BLACK).has_text());
}

#[test]
fn describe_never_dumps_payload() {
    let url = format!("data:image/png;base64,{}", "A".repeat(4096));
    let d = ImageSource::DataUrl(url).describe();
    assert!(d.len() < 128, "{d}");
    assert!(d.starts_with("data url 'data:image/png;base64,"));
}

#[test]
fn background_kind_serializes_by_name() {
    assert_eq!(serde_json::to_value(BackgroundKind::Color).unwrap(), json!("color"));
    assert_eq!(serde_json::to_value(BackgroundKind::Image).unwrap(), json!("image"));
    assert_eq!(BackgroundKind::default(), BackgroundKind::Color);
}
