pub type FramefxResult<T> = Result<T, FramefxError>;

#[derive(thiserror::Error, Debug)]
pub enum FramefxError {
    /// The input frame itself is malformed. Fatal for the whole request.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// A stage's internal computation failed. Recoverable: the pipeline
    /// substitutes the stage's input and continues.
    #[error("stage failure: {0}")]
    StageFailure(String),

    /// Frame/mask/background sizes disagree. Treated as a stage failure
    /// by callers.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramefxError {
    pub fn invalid_frame(msg: impl Into<String>) -> Self {
        Self::InvalidFrame(msg.into())
    }

    pub fn stage_failure(msg: impl Into<String>) -> Self {
        Self::StageFailure(msg.into())
    }

    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the pipeline may recover from this error by passing the
    /// stage's input through unchanged.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::StageFailure(_) | Self::DimensionMismatch(_))
    }
}
