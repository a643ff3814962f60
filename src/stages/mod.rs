//! The four pipeline stages, in their fixed execution order.

/// Segmentation-driven background replacement.
pub mod background;
/// Face-region enhancement.
pub mod face;
/// Global brightness/contrast/saturation grading.
pub mod grade;
/// Vintage, color filters and uniform blur.
pub mod stylize;

pub use background::BackgroundStage;
pub use face::FaceStage;
pub use grade::ColorGradeStage;
pub use stylize::EffectsStage;
