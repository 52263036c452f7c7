/// Simulation scalar. f32 everywhere; the determinism contract records it.
pub type Scalar = f32;
