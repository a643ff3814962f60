//! Core value types, the crate error type, and shared numeric helpers.

/// Frame, mask and face-box value types.
pub mod core;
/// Crate-wide error and result types.
pub mod error;
pub(crate) mod math;
