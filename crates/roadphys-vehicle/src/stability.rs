use roadphys_core::Scalar;

use crate::config::VehicleConfig;
use crate::state::LocalVelocity;

/// Fraction of the ESC slip threshold at which the counter-steer assist arms.
const ASSIST_SLIP_FRACTION: Scalar = 0.3;
/// Spin rate (rad/s) below which the assist stays out.
const ASSIST_MIN_SPIN: Scalar = 0.5;
/// Assist torque (N·m) at or beyond the full ESC slip threshold.
const ASSIST_GAIN: Scalar = 2000.0;

/// ESC pre-pass: a per-frame binary gate on a continuous attenuation
/// value. No hysteresis, no latch across frames. The factor applies to
/// engine and cornering forces only, never braking or drag.
pub fn stability_factor(local: &LocalVelocity, cfg: &VehicleConfig) -> Scalar {
    if cfg.stability_enabled && local.slip_magnitude() > cfg.max_slip_angle {
        cfg.stability_attenuation
    } else {
        1.0
    }
}

/// Torque opposing an established spin once slip is meaningful. A damping
/// assist, not a full correction: proportional to slip up to the ESC
/// threshold, capped at the gain.
pub fn counter_steer_torque(
    local: &LocalVelocity,
    angular_velocity: Scalar,
    cfg: &VehicleConfig,
) -> Scalar {
    let slip = local.slip_magnitude();
    if slip > ASSIST_SLIP_FRACTION * cfg.max_slip_angle && angular_velocity.abs() > ASSIST_MIN_SPIN {
        -angular_velocity.signum() * (slip / cfg.max_slip_angle).min(1.0) * ASSIST_GAIN
    } else {
        0.0
    }
}
