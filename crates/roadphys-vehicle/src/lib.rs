//! Arcade vehicle dynamics: sampled driver input → tire/engine/brake
//! forces → integrated motion, with an ESC layer against spin-outs.
//!
//! The core is pure functions over plain values: `compute_forces` turns
//! one frame's `InputSnapshot` + `VehicleState` + `VehicleConfig` into a
//! car-local `ForceBundle`, and `integrate` applies it under the
//! stability clamps. `Car` wires up the per-tick call sequence for an
//! embedding loop and exposes the telemetry/configuration boundaries.

pub mod car;
pub mod config;
pub mod forces;
pub mod input;
pub mod integrator;
pub mod stability;
pub mod state;
pub mod telemetry;

pub use car::Car;
pub use config::{Preset, VehicleConfig};
pub use forces::{compute_forces, steering_effectiveness, ForceBundle};
pub use input::InputSnapshot;
pub use integrator::{integrate, MAX_ANGULAR_VELOCITY, REST_SPEED};
pub use stability::{counter_steer_torque, stability_factor};
pub use state::{LocalVelocity, VehicleState};
pub use telemetry::Telemetry;
