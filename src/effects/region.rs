//! Localized enhancement operations over a cropped face region.
//!
//! Every operation takes an intensity in [0,1] (inputs outside the range are
//! clamped) and is a pixel-exact no-op at 0.

use crate::color::hsv::{hsv_to_rgb, rgb_to_hsv};
use crate::foundation::core::Frame;
use crate::foundation::error::FramefxResult;
use crate::foundation::math::{blend_u8, clamp_round_u8, force_odd};

/// Edge-preserving skin smoothing: bilateral filter blended back with the
/// original at `intensity * 0.7` so full intensity keeps some texture.
pub fn smooth_skin(region: &mut Frame, intensity: f32) -> FramefxResult<()> {
    let intensity = intensity.clamp(0.0, 1.0);
    if intensity <= 0.0 {
        return Ok(());
    }
    region.validate()?;

    let d = force_odd(((10.0 * intensity) as u32).max(5));
    let smoothed = bilateral(region, d / 2, 40.0, 40.0);

    let alpha = intensity * 0.7;
    for (dst, &s) in region.data.iter_mut().zip(smoothed.data.iter()) {
        *dst = blend_u8(s, *dst, alpha);
    }
    Ok(())
}

/// Brighten the eye band (top third of the region) with a linear gain plus
/// offset: `out = in*(1 + 0.2*intensity) + 15*intensity`.
pub fn brighten_eyes(region: &mut Frame, intensity: f32) -> FramefxResult<()> {
    let intensity = intensity.clamp(0.0, 1.0);
    if intensity <= 0.0 {
        return Ok(());
    }
    region.validate()?;

    let gain = 1.0 + intensity * 0.2;
    let offset = intensity * 15.0;
    for y in 0..region.height / 3 {
        for v in region.row_mut(y) {
            *v = clamp_round_u8(f32::from(*v) * gain + offset);
        }
    }
    Ok(())
}

/// Whiten the mouth band (bottom third of the region): push HSV value up by
/// `20*intensity` (8-bit units) and pull saturation down by 10% at full
/// intensity.
pub fn whiten_teeth(region: &mut Frame, intensity: f32) -> FramefxResult<()> {
    let intensity = intensity.clamp(0.0, 1.0);
    if intensity <= 0.0 {
        return Ok(());
    }
    region.validate()?;

    let value_boost = intensity * 20.0 / 255.0;
    let sat_scale = 1.0 - intensity * 0.1;
    for y in region.height * 2 / 3..region.height {
        for px in region.row_mut(y).chunks_exact_mut(3) {
            let (h, s, v) = rgb_to_hsv(px[0], px[1], px[2]);
            let s = (s * sat_scale).clamp(0.0, 1.0);
            let v = (v + value_boost).clamp(0.0, 1.0);
            let (r, g, b) = hsv_to_rgb(h, s, v);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    }
    Ok(())
}

/// Bilateral filter: spatial Gaussian times color-range Gaussian, window
/// clamped at the region edge, weighted sum normalized per pixel.
fn bilateral(src: &Frame, radius: u32, sigma_color: f32, sigma_space: f32) -> Frame {
    let (w, h) = (src.width, src.height);
    let mut out = src.clone();
    let range_denom = 2.0 * sigma_color * sigma_color;
    let space_denom = 2.0 * sigma_space * sigma_space;

    for y in 0..h {
        for x in 0..w {
            let ci = (y as usize * w as usize + x as usize) * 3;
            let center_r = f32::from(src.data[ci]);
            let center_g = f32::from(src.data[ci + 1]);
            let center_b = f32::from(src.data[ci + 2]);

            let mut sum_r = 0.0f32;
            let mut sum_g = 0.0f32;
            let mut sum_b = 0.0f32;
            let mut weight_sum = 0.0f32;

            let y_start = y.saturating_sub(radius);
            let y_end = (y + radius + 1).min(h);
            let x_start = x.saturating_sub(radius);
            let x_end = (x + radius + 1).min(w);

            for ny in y_start..y_end {
                for nx in x_start..x_end {
                    let ni = (ny as usize * w as usize + nx as usize) * 3;
                    let nr = f32::from(src.data[ni]);
                    let ng = f32::from(src.data[ni + 1]);
                    let nb = f32::from(src.data[ni + 2]);

                    let dr = nr - center_r;
                    let dg = ng - center_g;
                    let db = nb - center_b;
                    let color_dist_sq = dr * dr + dg * dg + db * db;

                    let dx = nx as f32 - x as f32;
                    let dy = ny as f32 - y as f32;
                    let spatial_dist_sq = dx * dx + dy * dy;

                    let weight = (-color_dist_sq / range_denom).exp()
                        * (-spatial_dist_sq / space_denom).exp();

                    sum_r += nr * weight;
                    sum_g += ng * weight;
                    sum_b += nb * weight;
                    weight_sum += weight;
                }
            }

            if weight_sum > 0.0 {
                out.data[ci] = (sum_r / weight_sum).round().clamp(0.0, 255.0) as u8;
                out.data[ci + 1] = (sum_g / weight_sum).round().clamp(0.0, 255.0) as u8;
                out.data[ci + 2] = (sum_b / weight_sum).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    out
}
