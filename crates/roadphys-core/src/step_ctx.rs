use crate::Scalar;

/// Upper bound on a single integration step (seconds). Frame time above
/// this is truncated, bounding the stiffness of every force term.
pub const MAX_DT: Scalar = 0.05;

/// Per-tick context passed into force evaluation and integration.
#[derive(Copy, Clone, Debug)]
pub struct StepCtx {
    pub dt: Scalar,
    pub tick: u64,
}

impl StepCtx {
    /// Build a context with the frame dt clamped to [0, MAX_DT].
    pub fn clamped(dt: Scalar, tick: u64) -> Self {
        Self { dt: dt.clamp(0.0, MAX_DT), tick }
    }
}
