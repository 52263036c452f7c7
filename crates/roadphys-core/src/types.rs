use crate::Scalar;
use std::f32::consts::TAU;

pub type Vec2 = glam::Vec2;
pub type Vec3 = glam::Vec3;

#[inline] pub fn vec2(x: Scalar, y: Scalar) -> Vec2 { Vec2::new(x, y) }
#[inline] pub fn vec3(x: Scalar, y: Scalar, z: Scalar) -> Vec3 { Vec3::new(x, y, z) }

/// Sea-level air density (kg/m^3).
pub const AIR_DENSITY: Scalar = 1.225;
/// Gravitational acceleration (m/s^2).
pub const GRAVITY: Scalar = 9.81;

/// Wrap a signed angle into (-2π, 2π). Sign-preserving remainder, so a
/// heading keeps its winding direction until it completes a full turn.
#[inline]
pub fn wrap_angle(a: Scalar) -> Scalar {
    a % TAU
}

/// 1e-6 quantization for hash stability across platforms.
#[inline]
pub fn quantize(x: Scalar) -> Scalar {
    (x * 1.0e6_f32).round() * 1.0e-6_f32
}
