use roadphys_core::{wrap_angle, Scalar, Vec2};

use crate::config::VehicleConfig;
use crate::forces::ForceBundle;
use crate::input::InputSnapshot;
use crate::state::VehicleState;

/// Hard cap on spin rate (rad/s).
pub const MAX_ANGULAR_VELOCITY: Scalar = 2.5;
/// Below this speed (m/s) with no pedal pressed, the car is at rest and
/// residual float creep is zeroed.
pub const REST_SPEED: Scalar = 0.1;
/// Per-frame angular damping outside a slide.
const ANGULAR_DAMPING: Scalar = 0.95;
/// Spin below this (rad/s) snaps to zero.
const ANGULAR_REST: Scalar = 0.01;

/// Apply one frame of forces: velocity integration, the constraint block,
/// then the position/orientation advance. `dt` must already be clamped
/// by the caller (the session wrapper does it once per tick).
pub fn integrate(
    state: &mut VehicleState,
    forces: &ForceBundle,
    input: &InputSnapshot,
    cfg: &VehicleConfig,
    dt: Scalar,
) {
    // Local force into world space via the current heading.
    let world_force =
        state.forward_axis() * forces.longitudinal + state.lateral_axis() * forces.lateral;

    state.velocity += world_force * (dt / cfg.mass);
    state.angular_velocity += forces.torque / cfg.moment_of_inertia * dt;

    // Constraint block, before the position update.
    let speed = state.speed();
    if speed > cfg.max_speed {
        state.velocity *= cfg.max_speed / speed;
    }
    if state.speed() < REST_SPEED && input.coasting() {
        state.velocity = Vec2::ZERO;
    }

    state.angular_velocity =
        state.angular_velocity.clamp(-MAX_ANGULAR_VELOCITY, MAX_ANGULAR_VELOCITY);
    let sliding = state.local_velocity().slip_magnitude() > 0.5 * cfg.max_slip_angle;
    state.angular_velocity *= if sliding { cfg.anti_spin_damping } else { ANGULAR_DAMPING };
    if state.angular_velocity.abs() < ANGULAR_REST {
        state.angular_velocity = 0.0;
    }

    state.position.x += state.velocity.x * dt;
    state.position.z += state.velocity.y * dt;
    state.heading = wrap_angle(state.heading + state.angular_velocity * dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadphys_core::vec2;
    use std::f32::consts::TAU;

    const DT: Scalar = 1.0 / 60.0;

    #[test] fn speed_clamp_preserves_direction() {
        let cfg = VehicleConfig::default();
        let mut state = VehicleState::default();
        state.velocity = vec2(30.0, 40.0); // |v| = 50 > 40
        integrate(&mut state, &ForceBundle::default(), &InputSnapshot::NEUTRAL, &cfg, DT);
        assert!((state.speed() - cfg.max_speed).abs() < 1e-3);
        let dir = state.velocity.normalize();
        assert!((dir.x - 0.6).abs() < 1e-5 && (dir.y - 0.8).abs() < 1e-5);
    }

    #[test] fn residual_creep_snaps_to_rest() {
        let cfg = VehicleConfig::default();
        let mut state = VehicleState::default();
        state.velocity = vec2(0.03, -0.04);
        integrate(&mut state, &ForceBundle::default(), &InputSnapshot::NEUTRAL, &cfg, DT);
        assert_eq!(state.velocity, Vec2::ZERO);
    }

    #[test] fn no_rest_snap_while_driving() {
        let cfg = VehicleConfig::default();
        let mut state = VehicleState::default();
        state.velocity = vec2(0.0, 0.05);
        let input = InputSnapshot { accelerate: true, ..InputSnapshot::NEUTRAL };
        integrate(&mut state, &ForceBundle::default(), &input, &cfg, DT);
        assert!(state.velocity.y > 0.0);
    }

    #[test] fn angular_velocity_is_capped() {
        let cfg = VehicleConfig::default();
        let mut state = VehicleState::default();
        let kick = ForceBundle { torque: 1.0e9, ..Default::default() };
        integrate(&mut state, &kick, &InputSnapshot::NEUTRAL, &cfg, DT);
        assert!(state.angular_velocity <= MAX_ANGULAR_VELOCITY);
    }

    #[test] fn small_spin_snaps_to_zero() {
        let cfg = VehicleConfig::default();
        let mut state = VehicleState::default();
        state.angular_velocity = 0.009;
        integrate(&mut state, &ForceBundle::default(), &InputSnapshot::NEUTRAL, &cfg, DT);
        assert_eq!(state.angular_velocity, 0.0);
    }

    #[test] fn heading_stays_wrapped_under_sustained_torque() {
        let cfg = VehicleConfig::default();
        let mut state = VehicleState::default();
        let spin = ForceBundle { torque: 20_000.0, ..Default::default() };
        for _ in 0..2000 {
            integrate(&mut state, &spin, &InputSnapshot::NEUTRAL, &cfg, DT);
            assert!(state.heading > -TAU && state.heading < TAU);
        }
        // The car really did keep turning.
        assert!(state.angular_velocity > 0.0);
    }

    #[test] fn slide_uses_the_aggressive_damping() {
        let cfg = VehicleConfig::default();
        let mut planted = VehicleState::default();
        planted.velocity = vec2(0.0, 20.0); // straight ahead
        planted.angular_velocity = 2.0;

        let mut sliding = VehicleState::default();
        sliding.velocity = vec2(10.0, 20.0); // slip ≈ 0.46 rad
        sliding.angular_velocity = 2.0;

        integrate(&mut planted, &ForceBundle::default(), &InputSnapshot::NEUTRAL, &cfg, DT);
        integrate(&mut sliding, &ForceBundle::default(), &InputSnapshot::NEUTRAL, &cfg, DT);
        assert!(sliding.angular_velocity < planted.angular_velocity);
    }
}
