use super::*;

#[test]
fn shadow_blur_ten_is_sigma_five() {
    assert_eq!(shadow_sigma(10.0), 5.0);
    assert_eq!(radius_for_sigma(5.0), 15);
    assert_eq!(radius_for_sigma(0.0), 0);
}

#[test]
fn radius_zero_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap(), src);
}

#[test]
fn constant_image_is_unchanged() {
    let (w, h) = (4u32, 3u32);
    let src = [10u8, 20, 30, 40].repeat((w * h) as usize);
    assert_eq!(blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap(), src);
}

#[test]
fn mismatched_buffer_is_rejected() {
    assert!(blur_rgba8_premul(&[0u8; 12], 2, 2, 1, 1.0).is_err());
}

#[test]
fn single_pixel_spreads_and_keeps_energy() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();
    assert!(out.chunks_exact(4).filter(|px| px[3] != 0).count() > 1);
    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn bounds_cover_painted_pixels_only() {
    let (w, h) = (6u32, 4u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    assert_eq!(opaque_bounds(&buf, w, h), None);
    buf[((1 * w + 2) * 4 + 3) as usize] = 10;
    buf[((2 * w + 4) * 4 + 3) as usize] = 10;
    assert_eq!(opaque_bounds(&buf, w, h), Some((2, 1, 5, 3)));
}

#[test]
fn region_blur_matches_full_blur() {
    let (w, h) = (40u32, 30u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    for y in 12..16u32 {
        for x in 18..22u32 {
            let i = ((y * w + x) * 4) as usize;
            buf[i..i + 4].copy_from_slice(&[0, 0, 0, 128]);
        }
    }
    let full = blur_rgba8_premul(&buf, w, h, 6, 2.0).unwrap();
    blur_painted_region_in_place(&mut buf, w, h, 6, 2.0).unwrap();
    assert_eq!(buf, full);
}
