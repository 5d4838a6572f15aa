use crate::foundation::error::{CarouselError, CarouselResult};

/// Gaussian sigma for a canvas-style `shadowBlur` value.
pub fn shadow_sigma(shadow_blur: f64) -> f32 {
    (shadow_blur / 2.0) as f32
}

/// Kernel radius covering three standard deviations.
pub fn radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Separable Gaussian blur of a premultiplied RGBA8 buffer.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> CarouselResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CarouselError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(CarouselError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];
    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Pixel bounds `[x0, x1) x [y0, y1)` of all non-transparent pixels, if any.
pub fn opaque_bounds(buf: &[u8], width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let (mut x0, mut y0, mut x1, mut y1) = (u32::MAX, u32::MAX, 0u32, 0u32);
    for y in 0..height {
        let row = (y as usize) * (width as usize) * 4;
        for x in 0..width {
            if buf[row + (x as usize) * 4 + 3] != 0 {
                x0 = x0.min(x);
                y0 = y0.min(y);
                x1 = x1.max(x + 1);
                y1 = y1.max(y + 1);
            }
        }
    }
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

/// Blur only the area around the painted pixels of `buf`, in place.
///
/// The region is the painted bounds grown by `radius` on every side and clamped to the buffer, so
/// the result matches a full-buffer blur while touching far fewer pixels.
pub fn blur_painted_region_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> CarouselResult<()> {
    if buf.len() != (width as usize) * (height as usize) * 4 {
        return Err(CarouselError::render(
            "blur_painted_region_in_place expects buf matching width*height*4",
        ));
    }
    let Some((x0, y0, x1, y1)) = opaque_bounds(buf, width, height) else {
        return Ok(());
    };
    let x0 = x0.saturating_sub(radius);
    let y0 = y0.saturating_sub(radius);
    let x1 = x1.saturating_add(radius).min(width);
    let y1 = y1.saturating_add(radius).min(height);
    let (rw, rh) = (x1 - x0, y1 - y0);

    let mut region = Vec::with_capacity((rw as usize) * (rh as usize) * 4);
    for y in y0..y1 {
        let start = ((y as usize) * (width as usize) + x0 as usize) * 4;
        region.extend_from_slice(&buf[start..start + (rw as usize) * 4]);
    }

    let blurred = blur_rgba8_premul(&region, rw, rh, radius, sigma)?;
    for (row, y) in (y0..y1).enumerate() {
        let start = ((y as usize) * (width as usize) + x0 as usize) * 4;
        let src = row * (rw as usize) * 4;
        buf[start..start + (rw as usize) * 4].copy_from_slice(&blurred[src..src + (rw as usize) * 4]);
    }
    Ok(())
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> CarouselResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CarouselError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(CarouselError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Rounding drift goes to the center tap so the kernel sums to exactly 1.0 in q16.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
