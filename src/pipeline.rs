//! Stage orchestration: one frame in, one frame out.
//!
//! The stage order is fixed: background, face, color grade, effects. Stages
//! are constructed once per [`FilterParams`] and each stage's failure is
//! isolated, so a single failing stage degrades to a pass-through instead of
//! aborting the frame.

use crate::{
    foundation::core::{FaceBox, Frame, Mask},
    foundation::error::FramefxResult,
    params::FilterParams,
    stages::{BackgroundStage, ColorGradeStage, EffectsStage, FaceStage},
};

/// Per-frame collaborator inputs, computed upstream of the pipeline:
/// a segmentation mask and the primary detected face.
#[derive(Clone, Debug, Default)]
pub struct FrameInputs {
    pub mask: Option<Mask>,
    pub face_box: Option<FaceBox>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageKind {
    Background,
    Face,
    ColorGrade,
    Effects,
}

impl StageKind {
    pub fn name(self) -> &'static str {
        match self {
            StageKind::Background => "background",
            StageKind::Face => "face",
            StageKind::ColorGrade => "color_grade",
            StageKind::Effects => "effects",
        }
    }
}

/// What happened to one stage while processing one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageOutcome {
    /// The stage ran and produced the next frame.
    Applied,
    /// The stage was absent or configured as an identity.
    Skipped,
    /// The stage failed internally; its input was substituted unchanged.
    PassedThrough { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageReport {
    pub stage: StageKind,
    pub outcome: StageOutcome,
}

/// Per-frame stage outcomes, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub stages: Vec<StageReport>,
}

impl PipelineReport {
    fn push(&mut self, stage: StageKind, outcome: StageOutcome) {
        self.stages.push(StageReport { stage, outcome });
    }

    pub fn applied(&self) -> usize {
        self.count(|o| matches!(o, StageOutcome::Applied))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StageOutcome::Skipped))
    }

    pub fn passed_through(&self) -> usize {
        self.count(|o| matches!(o, StageOutcome::PassedThrough { .. }))
    }

    /// True when no stage had to fall back to pass-through.
    pub fn clean(&self) -> bool {
        self.passed_through() == 0
    }

    fn count(&self, pred: impl Fn(&StageOutcome) -> bool) -> usize {
        self.stages.iter().filter(|s| pred(&s.outcome)).count()
    }
}

/// The per-frame effects pipeline. Immutable after construction; safe to
/// reuse across frames and share across threads.
#[derive(Clone, Debug)]
pub struct FilterPipeline {
    background: Option<BackgroundStage>,
    face: Option<FaceStage>,
    grade: ColorGradeStage,
    effects: EffectsStage,
}

impl FilterPipeline {
    pub fn new(params: &FilterParams) -> Self {
        Self {
            background: BackgroundStage::from_params(params),
            face: FaceStage::from_params(params),
            grade: ColorGradeStage::from_params(params),
            effects: EffectsStage::from_params(params),
        }
    }

    /// Process one frame. Only a malformed input frame is fatal; per-stage
    /// failures degrade to pass-through.
    pub fn process(&self, frame: Frame, inputs: &FrameInputs) -> FramefxResult<Frame> {
        self.process_with_report(frame, inputs).map(|(f, _)| f)
    }

    /// [`process`](Self::process), also returning the per-stage outcomes.
    #[tracing::instrument(skip_all, fields(width = frame.width, height = frame.height))]
    pub fn process_with_report(
        &self,
        frame: Frame,
        inputs: &FrameInputs,
    ) -> FramefxResult<(Frame, PipelineReport)> {
        frame.validate()?;

        let mut report = PipelineReport::default();
        let mut current = frame;

        current = match &self.background {
            Some(stage) => isolate(current, StageKind::Background, &mut report, |f| {
                stage.apply(f, inputs.mask.as_ref())
            }),
            None => {
                report.push(StageKind::Background, StageOutcome::Skipped);
                current
            }
        };

        current = match &self.face {
            Some(stage) if !stage.is_identity() => {
                isolate(current, StageKind::Face, &mut report, |f| {
                    stage.apply(f, inputs.face_box)
                })
            }
            _ => {
                report.push(StageKind::Face, StageOutcome::Skipped);
                current
            }
        };

        current = if self.grade.is_identity() {
            report.push(StageKind::ColorGrade, StageOutcome::Skipped);
            current
        } else {
            isolate(current, StageKind::ColorGrade, &mut report, |f| {
                self.grade.apply(f)
            })
        };

        current = if self.effects.is_identity() {
            report.push(StageKind::Effects, StageOutcome::Skipped);
            current
        } else {
            isolate(current, StageKind::Effects, &mut report, |f| {
                self.effects.apply(f)
            })
        };

        Ok((current, report))
    }
}

/// Run one stage with failure isolation: on error, log and substitute the
/// stage's input. The stage borrows its input, so a failed stage cannot
/// leave partial mutations behind.
fn isolate(
    input: Frame,
    kind: StageKind,
    report: &mut PipelineReport,
    run: impl FnOnce(&Frame) -> FramefxResult<Frame>,
) -> Frame {
    match run(&input) {
        Ok(out) => {
            report.push(kind, StageOutcome::Applied);
            out
        }
        Err(err) => {
            tracing::warn!(
                stage = kind.name(),
                error = %err,
                "stage failed, passing frame through"
            );
            report.push(
                kind,
                StageOutcome::PassedThrough {
                    reason: err.to_string(),
                },
            );
            input
        }
    }
}
