use std::io::Cursor;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "carousel_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, vec![1u8, 2u8, 3u8, 255u8]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn same_source_only_decodes_once() {
    let tmp = temp_dir("cache_decode_once");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("img.png"), png_bytes()).unwrap();

    let mut cache = AssetCache::new(&tmp);
    let src = ImageSource::path("img.png");
    cache.get_or_load(&src).unwrap();
    cache.get_or_load(&ImageSource::path("./img.png")).unwrap();
    assert_eq!(cache.decode_count(&src), 1);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn failures_are_cached_too() {
    let mut cache = AssetCache::new("target/no_such_assets_root");
    let src = ImageSource::path("missing.png");
    assert!(cache.get_or_load(&src).is_err());
    let err = cache.get_or_load(&src).unwrap_err();
    assert!(matches!(err, CarouselError::Decode(_)));
    assert_eq!(cache.decode_count(&src), 1);
}

#[test]
fn keys_are_separator_insensitive_for_paths() {
    let cache = AssetCache::new(".");
    assert_eq!(
        cache.key_for(&ImageSource::path("a/b.png")),
        cache.key_for(&ImageSource::path("a\\b.png"))
    );
    assert_ne!(
        cache.key_for(&ImageSource::bytes(vec![1u8])),
        cache.key_for(&ImageSource::bytes(vec![2u8]))
    );
}

#[test]
fn in_memory_bytes_decode_and_clear_resets_counts() {
    let mut cache = AssetCache::new(".");
    let src = ImageSource::bytes(png_bytes());
    let g = cache.get_or_load(&src).unwrap();
    assert_eq!(g.size(), (1.0, 1.0));
    cache.clear();
    assert_eq!(cache.decode_count(&src), 0);
}

#[test]
fn svg_data_url_loads_with_the_cache_font_database() {
    let db = Arc::new(fontdb::Database::new());
    let mut cache = AssetCache::new(".").with_svg_fonts(Arc::clone(&db));
    let src = ImageSource::from_uri(
        "data:image/svg+xml,%3C!DOCTYPE%20svg%3E%3Csvg%20xmlns%3D%22http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg%22%20width%3D%228%22%20height%3D%224%22%2F%3E",
    );
    let PreparedGraphic::Svg(svg) = cache.get_or_load(&src).unwrap() else {
        panic!("expected an svg graphic");
    };
    assert_eq!(svg.tree.size().width(), 8.0);
    assert!(Arc::ptr_eq(svg.tree.fontdb(), &db));
}
