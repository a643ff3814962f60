//! Small numeric helpers shared by the pixel loops.
//!
//! Rounding policy, everywhere: compute in f32, round to nearest, clamp to
//! the 8-bit channel range. Never wrap.

pub(crate) fn clamp_round_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Scale an 8-bit channel by a non-negative factor, saturating at 255.
pub(crate) fn scale_u8(v: u8, factor: f32) -> u8 {
    clamp_round_u8(f32::from(v) * factor)
}

/// Linear blend of two 8-bit channels. `weight_a` = 1 returns `a` exactly,
/// 0 returns `b` exactly.
pub(crate) fn blend_u8(a: u8, b: u8, weight_a: f32) -> u8 {
    let w = weight_a.clamp(0.0, 1.0);
    clamp_round_u8(f32::from(a) * w + f32::from(b) * (1.0 - w))
}

/// Next odd size at or above `k`. Kernel sizes must be odd.
pub(crate) fn force_odd(k: u32) -> u32 {
    if k.is_multiple_of(2) { k + 1 } else { k }
}
