use roadphys_core::Scalar;

/// Driver input sampled once per tick by the embedding loop, passed by
/// value. Immutable for the duration of one update.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

impl InputSnapshot {
    pub const NEUTRAL: Self = Self {
        accelerate: false,
        brake: false,
        steer_left: false,
        steer_right: false,
    };

    /// +1 steering left, -1 right, 0 neutral. Both directions pressed
    /// cancel out.
    #[inline]
    pub fn steer_sign(&self) -> Scalar {
        (self.steer_left as i8 - self.steer_right as i8) as Scalar
    }

    /// Neither drive pedal is pressed.
    #[inline]
    pub fn coasting(&self) -> bool {
        !self.accelerate && !self.brake
    }
}
