//! Separable Gaussian blur.
//!
//! The RGB frame path runs in Q16 fixed point (kernel weights sum to 65536
//! exactly, so a constant image blurs to itself bit-for-bit). The mask path
//! stays in floats. Both clamp at the image edge.

use crate::foundation::core::{Frame, Mask};
use crate::foundation::error::{FramefxError, FramefxResult};
use crate::foundation::math::force_odd;

/// Default sigma for an odd kernel size: `0.3*((k-1)*0.5 - 1) + 0.8`.
pub fn sigma_for_kernel(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

pub fn blur_frame(frame: &Frame, radius: u32, sigma: f32) -> FramefxResult<Frame> {
    frame.validate()?;
    if radius == 0 {
        return Ok(frame.clone());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; frame.data.len()];
    let mut out = vec![0u8; frame.data.len()];

    horizontal_pass(&frame.data, &mut tmp, frame.width, frame.height, &kernel);
    vertical_pass(&tmp, &mut out, frame.width, frame.height, &kernel);
    Frame::from_raw(frame.width, frame.height, out)
}

/// Blur with an odd kernel size, deriving sigma from the size. Even sizes
/// are bumped to the next odd one.
pub fn blur_frame_kernel(frame: &Frame, kernel_size: u32) -> FramefxResult<Frame> {
    let k = force_odd(kernel_size.max(1));
    blur_frame(frame, k / 2, sigma_for_kernel(k))
}

pub fn blur_mask(mask: &Mask, radius: u32, sigma: f32) -> FramefxResult<Mask> {
    if radius == 0 {
        return Ok(mask.clone());
    }

    let weights = gaussian_weights(radius, sigma)?;
    let w = mask.width as i32;
    let h = mask.height as i32;
    let r = radius as i32;

    let mut tmp = vec![0f32; mask.data.len()];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0f64;
            for (ki, &kw) in weights.iter().enumerate() {
                let sx = (x + ki as i32 - r).clamp(0, w - 1);
                acc += kw * f64::from(mask.data[(y * w + sx) as usize]);
            }
            tmp[(y * w + x) as usize] = acc as f32;
        }
    }

    let mut out = vec![0f32; mask.data.len()];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0f64;
            for (ki, &kw) in weights.iter().enumerate() {
                let sy = (y + ki as i32 - r).clamp(0, h - 1);
                acc += kw * f64::from(tmp[(sy * w + x) as usize]);
            }
            out[(y * w + x) as usize] = (acc as f32).clamp(0.0, 1.0);
        }
    }

    Mask::from_raw(mask.width, mask.height, out)
}

/// Normalized f64 kernel weights for half-width `radius`.
fn gaussian_weights(radius: u32, sigma: f32) -> FramefxResult<Vec<f64>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FramefxError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(FramefxError::stage_failure("gaussian kernel sum is zero"));
    }
    for w in &mut weights {
        *w /= sum;
    }
    Ok(weights)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> FramefxResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    let weights_f = gaussian_weights(radius, sigma)?;

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push the quantization remainder into the middle tap so the kernel
    // sums to exactly 65536.
    let delta = 65536i64 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 3];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 3;
                for c in 0..3 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 3;
            for c in 0..3 {
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
            let mut acc = [0u64; 3];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 3;
                for c in 0..3 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 3;
            for c in 0..3 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}
