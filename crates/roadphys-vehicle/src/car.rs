use anyhow::Result;
use roadphys_core::{quantize, Scalar, StepCtx, Vec3};
use roadphys_surface::SurfaceQuery;

use crate::config::{Preset, VehicleConfig};
use crate::forces::compute_forces;
use crate::input::InputSnapshot;
use crate::integrator::integrate;
use crate::state::VehicleState;
use crate::telemetry::Telemetry;

/// One car: configuration, state, and the per-tick call sequence. The
/// embedding loop samples input, then calls `step` exactly once per
/// rendered frame. Single-writer: nothing else mutates the state.
pub struct Car {
    config: VehicleConfig,
    state: VehicleState,
    ready: bool,
    on_road: bool,
    tick: u64,
}

impl Car {
    /// Validates the configuration up front; the tick loop never
    /// re-checks it.
    pub fn new(config: VehicleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: VehicleState::default(),
            ready: false,
            on_road: true,
            tick: 0,
        })
    }

    /// Preset tables are valid by construction.
    pub fn with_preset(preset: Preset) -> Self {
        Self {
            config: preset.config(),
            state: VehicleState::default(),
            ready: false,
            on_road: true,
            tick: 0,
        }
    }

    /// Place the car at a spawn pose with zero velocity.
    pub fn spawn_at(&mut self, position: Vec3, heading: Scalar) {
        self.state = VehicleState::at(position, heading);
    }

    /// Mark the externally loaded model ready. Until then `step` is a
    /// no-op: asset loading is the host's business, not the core's.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Advance one tick: clamp dt, run the force model, integrate, then
    /// pin y to the ground and refresh the on-road flag.
    pub fn step(&mut self, input: InputSnapshot, dt: Scalar, surface: &dyn SurfaceQuery) {
        if !self.ready {
            return;
        }
        let ctx = StepCtx::clamped(dt, self.tick);
        if ctx.dt <= 0.0 {
            return;
        }

        let forces = compute_forces(&self.state, &input, &self.config, ctx.dt);
        integrate(&mut self.state, &forces, &input, &self.config, ctx.dt);

        let (x, z) = (self.state.position.x, self.state.position.z);
        self.state.position.y = surface.ground_height(x, z);
        self.on_road = surface.on_surface(x, z);
        self.tick += 1;
    }

    // ---- configuration boundary (legal at any time between ticks) ----

    pub fn set_drift_sensitivity(&mut self, s: Scalar) {
        self.config.set_drift_sensitivity(s);
    }

    pub fn toggle_stability_control(&mut self) {
        self.config.toggle_stability_control();
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.config.set_drift_sensitivity(preset.drift_sensitivity());
    }

    // ---- telemetry boundary ----

    /// Ground speed in m/s.
    pub fn speed(&self) -> Scalar {
        self.state.speed()
    }

    pub fn is_on_road(&self) -> bool {
        self.on_road
    }

    /// Values are quantized to 1e-6 so HUD readouts are stable across
    /// platforms; the raw state is left untouched.
    pub fn telemetry(&self) -> Telemetry {
        let local = self.state.local_velocity();
        Telemetry {
            speed: quantize(self.state.speed()),
            forward_velocity: quantize(local.forward),
            slip_angle: quantize(local.slip_angle()),
            heading: quantize(self.state.heading),
            on_road: self.on_road,
        }
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn tick_index(&self) -> u64 {
        self.tick
    }

    /// Blake3 digest of the dynamic state, for replay comparison.
    pub fn state_digest(&self) -> [u8; 32] {
        self.state.digest()
    }
}
