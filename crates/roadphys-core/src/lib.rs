pub mod scalar;
pub mod types;
pub mod hash;
pub mod determinism;
pub mod step_ctx;

pub use scalar::Scalar;
pub use types::{Vec2, Vec3, vec2, vec3, wrap_angle, quantize, AIR_DENSITY, GRAVITY};
pub use hash::{StepHasher, hash_scalar, hash_vec2, hash_vec3};
pub use determinism::DeterminismContract;
pub use step_ctx::{StepCtx, MAX_DT};
