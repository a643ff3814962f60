//! Per-frame video effects: background replacement, face enhancement, color
//! grading and stylistic filters over interleaved RGB frames.
//!
//! The public API is pipeline-oriented:
//!
//! - Parse [`FilterParams`] from the wire (every field is optional)
//! - Build a [`FilterPipeline`] for those parameters
//! - Feed it [`Frame`]s plus optional per-frame [`FrameInputs`] (person mask,
//!   face box) and collect the output frame and a [`PipelineReport`]
//!
//! Stages degrade independently: a failing stage passes its input through and
//! is recorded in the report, so one bad detector result never drops a frame.
//! The [`host`] module adds the JSON request/response protocol and the
//! base64/JPEG codec used by the `framefx` binary.

#![forbid(unsafe_code)]

pub mod color;
pub mod effects;
mod foundation;
pub mod host;
mod params;
mod pipeline;
pub mod stages;

pub use crate::foundation::core::{FaceBox, Frame, Mask, Region};
pub use crate::foundation::error::{FramefxError, FramefxResult};

pub use crate::host::{ProcessRequest, ProcessResponse, process_request};
pub use crate::params::{BackgroundMode, ColorFilter, FilterParams};
pub use crate::pipeline::{
    FilterPipeline, FrameInputs, PipelineReport, StageKind, StageOutcome, StageReport,
};
