use roadphys_core::Scalar;

/// Read-only per-frame values for the HUD/visualization boundary.
/// Speeds are m/s, angles rad; unit conversion (km/h etc.) is the
/// consumer's concern.
#[derive(Copy, Clone, Debug)]
pub struct Telemetry {
    pub speed: Scalar,
    pub forward_velocity: Scalar,
    pub slip_angle: Scalar,
    pub heading: Scalar,
    pub on_road: bool,
}
