use anyhow::{bail, Result};
use roadphys_core::Scalar;
use serde::{Deserialize, Serialize};

/// Static tunables for one car. Immutable during a tick; mutated only
/// between ticks through the preset/sensitivity/stability calls.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub mass: Scalar,                  // kg
    pub moment_of_inertia: Scalar,     // kg·m^2 about the vertical axis
    pub engine_force: Scalar,          // N at full throttle, before taper
    pub brake_force: Scalar,           // N at full efficiency
    pub drag_coefficient: Scalar,      // dimensionless Cd
    pub frontal_area: Scalar,          // m^2
    pub tire_friction: Scalar,         // lateral friction coefficient
    /// Tire-surface grip quality in [0, 1]. The off-road config swap
    /// lowers this; it scales lateral friction and cornering stiffness.
    pub tire_grip: Scalar,
    pub cornering_stiffness: Scalar,   // N/rad
    pub max_speed: Scalar,             // m/s
    pub wheelbase: Scalar,             // m
    pub stability_enabled: bool,
    pub max_slip_angle: Scalar,        // rad; ESC engages above this
    pub stability_attenuation: Scalar, // 0..1 force multiplier while engaged
    pub anti_spin_damping: Scalar,     // 0..1 per-frame angular damping in a slide
}

impl Default for VehicleConfig {
    fn default() -> Self {
        let mut cfg = Self {
            mass: 1200.0,
            moment_of_inertia: 1800.0,
            engine_force: 12_000.0,
            brake_force: 16_000.0,
            drag_coefficient: 0.32,
            frontal_area: 2.2,
            tire_friction: 0.9,
            tire_grip: 1.0,
            cornering_stiffness: 60_000.0,
            max_speed: 40.0,
            wheelbase: 2.6,
            stability_enabled: true,
            max_slip_angle: 0.0,
            stability_attenuation: 0.0,
            anti_spin_damping: 0.0,
        };
        cfg.set_drift_sensitivity(Preset::Balanced.drift_sensitivity());
        cfg
    }
}

impl VehicleConfig {
    /// Reject invalid parameters before the tick loop; the integrator
    /// never re-checks them. `!(x > 0.0)` also rejects NaN.
    pub fn validate(&self) -> Result<()> {
        if !(self.mass > 0.0) {
            bail!("mass must be positive, got {}", self.mass);
        }
        if !(self.moment_of_inertia > 0.0) {
            bail!("moment_of_inertia must be positive, got {}", self.moment_of_inertia);
        }
        let non_negative = [
            ("engine_force", self.engine_force),
            ("brake_force", self.brake_force),
            ("drag_coefficient", self.drag_coefficient),
            ("frontal_area", self.frontal_area),
            ("tire_friction", self.tire_friction),
            ("cornering_stiffness", self.cornering_stiffness),
            ("max_speed", self.max_speed),
            ("wheelbase", self.wheelbase),
            ("max_slip_angle", self.max_slip_angle),
        ];
        for (name, v) in non_negative {
            if !(v >= 0.0) {
                bail!("{name} must be non-negative, got {v}");
            }
        }
        let unit_interval = [
            ("tire_grip", self.tire_grip),
            ("stability_attenuation", self.stability_attenuation),
            ("anti_spin_damping", self.anti_spin_damping),
        ];
        for (name, v) in unit_interval {
            if !(0.0..=1.0).contains(&v) {
                bail!("{name} must lie in [0, 1], got {v}");
            }
        }
        Ok(())
    }

    /// Retune the slide thresholds from one knob, s in [0, 1] (clamped):
    /// 0 keeps the car planted, 1 lets it hang the tail out.
    pub fn set_drift_sensitivity(&mut self, s: Scalar) {
        let s = s.clamp(0.0, 1.0);
        self.max_slip_angle = 0.2 + 0.3 * s;
        self.stability_attenuation = 0.9 - 0.4 * s;
        self.anti_spin_damping = 0.95 - 0.1 * s;
    }

    /// Flip ESC. Pure config mutation; takes effect from the next tick.
    pub fn toggle_stability_control(&mut self) {
        self.stability_enabled = !self.stability_enabled;
    }
}

/// Named handling characters exposed to the player (keys 1/2/3 upstream).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Preset {
    Stable,
    Balanced,
    Drift,
}

impl Preset {
    pub fn drift_sensitivity(self) -> Scalar {
        match self {
            Preset::Stable => 0.0,
            Preset::Balanced => 0.5,
            Preset::Drift => 1.0,
        }
    }

    pub fn config(self) -> VehicleConfig {
        let mut cfg = VehicleConfig::default();
        cfg.set_drift_sensitivity(self.drift_sensitivity());
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn defaults_validate() {
        VehicleConfig::default().validate().unwrap();
        for p in [Preset::Stable, Preset::Balanced, Preset::Drift] {
            p.config().validate().unwrap();
        }
    }

    #[test] fn zero_mass_is_rejected() {
        let cfg = VehicleConfig { mass: 0.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test] fn negative_inertia_is_rejected() {
        let cfg = VehicleConfig { moment_of_inertia: -1.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test] fn nan_coefficient_is_rejected() {
        let cfg = VehicleConfig { drag_coefficient: f32::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test] fn out_of_range_attenuation_is_rejected() {
        let cfg = VehicleConfig { stability_attenuation: 1.5, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test] fn sensitivity_formula() {
        let mut cfg = VehicleConfig::default();
        cfg.set_drift_sensitivity(1.0);
        assert!((cfg.max_slip_angle - 0.5).abs() < 1e-6);
        assert!((cfg.stability_attenuation - 0.5).abs() < 1e-6);
        assert!((cfg.anti_spin_damping - 0.85).abs() < 1e-6);

        cfg.set_drift_sensitivity(0.0);
        assert!((cfg.max_slip_angle - 0.2).abs() < 1e-6);
        assert!((cfg.stability_attenuation - 0.9).abs() < 1e-6);
        assert!((cfg.anti_spin_damping - 0.95).abs() < 1e-6);
    }

    #[test] fn sensitivity_is_clamped() {
        let mut a = VehicleConfig::default();
        let mut b = VehicleConfig::default();
        a.set_drift_sensitivity(7.0);
        b.set_drift_sensitivity(1.0);
        assert_eq!(a.max_slip_angle, b.max_slip_angle);
    }

    #[test] fn stability_toggle_flips() {
        let mut cfg = VehicleConfig::default();
        let before = cfg.stability_enabled;
        cfg.toggle_stability_control();
        assert_eq!(cfg.stability_enabled, !before);
        cfg.toggle_stability_control();
        assert_eq!(cfg.stability_enabled, before);
    }
}
