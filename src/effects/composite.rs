//! Alpha compositing of two frames under an f32 blend mask.

use crate::effects::blur::{blur_mask, sigma_for_kernel};
use crate::foundation::core::{Frame, Mask};
use crate::foundation::error::{FramefxError, FramefxResult};
use crate::foundation::math::blend_u8;

/// Half-width of the Gaussian used to soften mask edges before blending.
const SMOOTH_RADIUS: u32 = 2;

/// Soften mask edges with a small Gaussian. `composite` applies this
/// internally; callers that pre-smooth should blend with `blend_masked`
/// instead of double-smoothing.
pub fn smooth_mask(mask: &Mask) -> FramefxResult<Mask> {
    blur_mask(mask, SMOOTH_RADIUS, sigma_for_kernel(SMOOTH_RADIUS * 2 + 1))
}

/// `out = fg*mask + bg*(1-mask)` per channel, after softening the mask
/// edges. All three inputs must share dimensions.
pub fn composite(foreground: &Frame, background: &Frame, mask: &Mask) -> FramefxResult<Frame> {
    let smoothed = smooth_mask(mask)?;
    blend_masked(foreground, background, &smoothed)
}

/// The raw blend, no mask smoothing.
pub fn blend_masked(foreground: &Frame, background: &Frame, mask: &Mask) -> FramefxResult<Frame> {
    foreground.validate()?;
    background.validate()?;
    if !foreground.same_size(background) {
        return Err(FramefxError::dimension_mismatch(format!(
            "foreground {}x{} vs background {}x{}",
            foreground.width, foreground.height, background.width, background.height
        )));
    }
    if !mask.matches_frame(foreground) {
        return Err(FramefxError::dimension_mismatch(format!(
            "mask {}x{} vs frame {}x{}",
            mask.width, mask.height, foreground.width, foreground.height
        )));
    }

    let mut data = Vec::with_capacity(foreground.data.len());
    for ((f, b), &m) in foreground
        .data
        .chunks_exact(3)
        .zip(background.data.chunks_exact(3))
        .zip(mask.data.iter())
    {
        for c in 0..3 {
            data.push(blend_u8(f[c], b[c], m));
        }
    }
    Frame::from_raw(foreground.width, foreground.height, data)
}
