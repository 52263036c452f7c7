use roadphys_core::{
    hash_scalar, hash_vec2, hash_vec3, vec2, wrap_angle, Scalar, StepHasher, Vec2, Vec3,
};

/// Forward speeds at or below this are treated as "not moving" for slip
/// purposes (guards the atan2 decomposition).
const MIN_FORWARD_FOR_SLIP: Scalar = 0.01;

/// Mutable simulation state of one car. Mutated only by the integrator,
/// once per tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VehicleState {
    /// World position; y is pinned to ground height by the session wrapper.
    pub position: Vec3,
    /// Signed rotation about the vertical axis, wrapped to (-2π, 2π).
    /// Zero faces +z; positive heading rotates the nose from +z toward +x.
    pub heading: Scalar,
    /// World ground-plane velocity, components (x, z).
    pub velocity: Vec2,
    /// Heading rate (rad/s).
    pub angular_velocity: Scalar,
}

impl VehicleState {
    /// Spawn pose with zero velocity.
    pub fn at(position: Vec3, heading: Scalar) -> Self {
        Self {
            position,
            heading: wrap_angle(heading),
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
        }
    }

    /// Unit vector the nose points along, in the (x, z) ground plane.
    #[inline]
    pub fn forward_axis(&self) -> Vec2 {
        vec2(self.heading.sin(), self.heading.cos())
    }

    /// Unit vector toward the side a positive heading rate turns into.
    #[inline]
    pub fn lateral_axis(&self) -> Vec2 {
        vec2(self.heading.cos(), -self.heading.sin())
    }

    #[inline]
    pub fn speed(&self) -> Scalar {
        self.velocity.length()
    }

    /// Car-local decomposition of the world velocity. A view, recomputed
    /// each frame; never stored.
    pub fn local_velocity(&self) -> LocalVelocity {
        LocalVelocity {
            forward: self.velocity.dot(self.forward_axis()),
            lateral: self.velocity.dot(self.lateral_axis()),
        }
    }

    /// Blake3 digest of the dynamic fields, stable field order, for
    /// cross-run replay comparison.
    pub fn digest(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        hash_vec3(&mut h, &self.position);
        hash_scalar(&mut h, self.heading);
        hash_vec2(&mut h, &self.velocity);
        hash_scalar(&mut h, self.angular_velocity);
        h.finalize()
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::at(Vec3::ZERO, 0.0)
    }
}

/// Velocity seen from the driver's seat: forward along the nose, lateral
/// toward the positive-turn side.
#[derive(Copy, Clone, Debug)]
pub struct LocalVelocity {
    pub forward: Scalar,
    pub lateral: Scalar,
}

impl LocalVelocity {
    /// Signed angle between heading and direction of travel. Zero when
    /// there is essentially no forward motion.
    pub fn slip_angle(&self) -> Scalar {
        if self.forward.abs() <= MIN_FORWARD_FOR_SLIP {
            return 0.0;
        }
        self.lateral.atan2(self.forward.abs())
    }

    #[inline]
    pub fn slip_magnitude(&self) -> Scalar {
        self.slip_angle().abs()
    }
}
