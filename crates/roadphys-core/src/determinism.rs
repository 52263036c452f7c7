use crate::{Scalar, MAX_DT};

/// What a replay harness may assume: the nominal fixed dt, the dt
/// ceiling, float width, and that no FMA contraction is relied upon.
#[derive(Copy, Clone, Debug)]
pub struct DeterminismContract {
    pub fixed_dt: Scalar,
    pub max_dt: Scalar,
    pub float: &'static str,
    pub fma: bool,
}

impl DeterminismContract {
    pub fn default_contract() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_dt: MAX_DT,
            float: "f32",
            fma: false,
        }
    }
}
