//! Color-space conversion and per-channel scalar operations.
//!
//! All operations are total over well-formed buffers: outputs are rounded to
//! nearest and clamped into the channel range, never wrapped.

/// RGB <-> HSV conversion.
pub mod hsv;
/// Channel scale/offset, saturation, luma and matrix mixing.
pub mod ops;

pub use hsv::{HsvFrame, frame_to_hsv, hsv_to_frame, hsv_to_rgb, rgb_to_hsv};
pub use ops::{
    Channel, add_offset, add_offset_all, apply_matrix3, luminance, scale_all, scale_channel,
    scale_saturation,
};
