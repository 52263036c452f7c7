use roadphys_core::{Scalar, AIR_DENSITY, GRAVITY};

use crate::config::VehicleConfig;
use crate::input::InputSnapshot;
use crate::stability::{counter_steer_torque, stability_factor};
use crate::state::VehicleState;

/// Throttle response floor near top speed; the engine tapers but never
/// fully vanishes.
const ENGINE_TAPER_FLOOR: Scalar = 0.2;
/// Brake efficiency ramps up over this much forward speed (m/s)...
const BRAKE_RAMP_SPEED: Scalar = 5.0;
/// ...and never drops below this floor.
const BRAKE_EFFICIENCY_MIN: Scalar = 0.2;
/// At or below this forward speed (m/s) the stop force owns deceleration;
/// brake and rolling resistance stand down.
const CREEP_SPEED: Scalar = 0.1;
/// Rolling-resistance coefficient on the reference surface.
const ROLLING_RESISTANCE: Scalar = 0.015;
/// Lateral friction capacity ramps from the floor fraction to full grip
/// over this much lateral speed (m/s).
const LATERAL_RAMP_SPEED: Scalar = 3.0;
const LATERAL_RAMP_FLOOR: Scalar = 0.3;
/// Steering is ignored below this forward speed (m/s).
const STEER_MIN_SPEED: Scalar = 0.5;
/// Maximum road-wheel angle (rad), before the effectiveness curve.
const MAX_STEER_ANGLE: Scalar = 0.5;
/// Cornering force clamp: base (N) plus a per-km/h allowance.
const CORNERING_CLAMP_BASE: Scalar = 8000.0;
const CORNERING_CLAMP_PER_KMH: Scalar = 20.0;
/// Cornering torque attenuation once slip passes half the ESC threshold.
const TORQUE_SLIP_ATTENUATION: Scalar = 0.7;
/// Velocity-direction cosines are skipped below this speed (m/s); the
/// drag term vanishes instead of dividing by ~0.
const MIN_DIRECTION_SPEED: Scalar = 0.01;

const MS_TO_KMH: Scalar = 3.6;

/// Net car-local force for one frame. Transient: produced here, consumed
/// by the integrator, never persisted.
#[derive(Copy, Clone, Debug, Default)]
pub struct ForceBundle {
    /// N along the forward axis.
    pub longitudinal: Scalar,
    /// N along the lateral axis.
    pub lateral: Scalar,
    /// N·m about the vertical axis.
    pub torque: Scalar,
}

/// One frame of the force model. Deterministic and side-effect free:
/// same (state, input, config, dt) in, same bundle out.
pub fn compute_forces(
    state: &VehicleState,
    input: &InputSnapshot,
    cfg: &VehicleConfig,
    dt: Scalar,
) -> ForceBundle {
    let local = state.local_velocity();
    let esc = stability_factor(&local, cfg);
    let mut out = ForceBundle::default();

    // Engine. Taper keeps throttle response alive near top speed.
    if input.accelerate {
        let ratio = local.forward / cfg.max_speed;
        let speed_factor = (1.0 - ratio * ratio).max(ENGINE_TAPER_FLOOR);
        out.longitudinal += cfg.engine_force * speed_factor * esc;
    }

    // Brake. Efficiency fades toward the floor at low speed, and the term
    // stands down below the creep threshold so the stop force can bring
    // the car to an exact rest instead of pushing it through zero.
    if input.brake && local.forward.abs() > CREEP_SPEED {
        let efficiency =
            (local.forward.abs() / BRAKE_RAMP_SPEED).clamp(BRAKE_EFFICIENCY_MIN, 1.0);
        out.longitudinal -= local.forward.signum() * cfg.brake_force * efficiency;
    }

    // Quadratic aerodynamic drag, split into car axes by the velocity
    // direction cosines.
    let speed = state.speed();
    if speed > MIN_DIRECTION_SPEED {
        let drag = 0.5 * cfg.drag_coefficient * AIR_DENSITY * cfg.frontal_area * speed * speed;
        out.longitudinal -= drag * local.forward / speed;
        out.lateral -= drag * local.lateral / speed;
    }

    // Rolling resistance while rolling; an exact stop force once forward
    // motion is down to creep and the throttle is released.
    if local.forward.abs() > CREEP_SPEED {
        out.longitudinal -= local.forward.signum() * ROLLING_RESISTANCE * cfg.mass * GRAVITY;
    } else if !input.accelerate && dt > 0.0 {
        out.longitudinal -= local.forward * cfg.mass / dt;
    }

    // Lateral tire friction. Capacity ramps with lateral speed; clamping
    // the cancel demand against it gives full lock at low slide speeds
    // and saturation in a drift.
    if local.lateral != 0.0 && dt > 0.0 {
        let ramp = LATERAL_RAMP_FLOOR
            + (1.0 - LATERAL_RAMP_FLOOR) * (local.lateral.abs() / LATERAL_RAMP_SPEED).min(1.0);
        let capacity = ramp * cfg.tire_friction * cfg.tire_grip * cfg.mass * GRAVITY;
        let demand = -local.lateral * cfg.mass / dt;
        out.lateral += demand.clamp(-capacity, capacity);
    }

    // Steering and cornering.
    let steer = input.steer_sign();
    if steer != 0.0 && local.forward.abs() > STEER_MIN_SPEED {
        let kmh = local.forward.abs() * MS_TO_KMH;
        let effectiveness = steering_effectiveness(kmh);
        let steering_angle = steer * MAX_STEER_ANGLE * effectiveness;

        let current_slip = local.slip_angle();
        let target_slip = current_slip - steering_angle;
        let stiffness =
            cfg.cornering_stiffness * cfg.tire_grip / (1.0 + 0.2 * (kmh / 100.0) * (kmh / 100.0));
        let clamp = CORNERING_CLAMP_BASE + CORNERING_CLAMP_PER_KMH * kmh;
        let cornering = (-stiffness * target_slip).clamp(-clamp, clamp) * esc;
        out.lateral += cornering;

        let mut torque =
            cornering * (cfg.wheelbase * 0.5) * local.forward.signum() * effectiveness;
        if current_slip.abs() > 0.5 * cfg.max_slip_angle {
            torque *= TORQUE_SLIP_ATTENUATION;
        }
        out.torque += torque;
    }

    // Counter-steer assist damps an established spin.
    out.torque += counter_steer_torque(&local, state.angular_velocity, cfg);

    out
}

/// Steering effectiveness over forward speed in km/h. Three segments:
/// full authority below 30, linear to 0.6 at 80, then linear down to a
/// 0.3 floor reached at 120.
pub fn steering_effectiveness(speed_kmh: Scalar) -> Scalar {
    let kmh = speed_kmh.abs();
    if kmh <= 30.0 {
        1.0
    } else if kmh <= 80.0 {
        1.0 - 0.4 * (kmh - 30.0) / 50.0
    } else {
        (0.6 - 0.3 * (kmh - 80.0) / 40.0).max(0.3)
    }
}
