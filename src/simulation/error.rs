use std::fmt;

/// Failures that can reach the simulation from its frame inputs
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// No new frame this tick; the tick is skipped and the grid kept
    CaptureUnavailable,
    /// A brightness field (or configuration) that cannot produce a grid
    DegenerateInput { reason: String },
}

impl FrameError {
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput { reason: reason.into() }
    }

    /// Whether the next tick may succeed without outside intervention
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::CaptureUnavailable)
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaptureUnavailable => write!(f, "no camera frame available"),
            Self::DegenerateInput { reason } => write!(f, "degenerate input: {}", reason),
        }
    }
}

impl std::error::Error for FrameError {}
