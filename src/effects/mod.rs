//! Pixel-level building blocks shared by the pipeline stages.

/// Separable Gaussian blur over frames and masks.
pub mod blur;
/// Masked alpha compositing of two frames.
pub mod composite;
/// Localized face-region enhancement operations.
pub mod region;

pub use blur::{blur_frame, blur_frame_kernel, blur_mask, sigma_for_kernel};
pub use composite::{blend_masked, composite, smooth_mask};
pub use region::{brighten_eyes, smooth_skin, whiten_teeth};
