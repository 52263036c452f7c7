//! Ground/road boundary consumed by the vehicle core.
//!
//! The core only ever asks two questions: how high is the ground here, and
//! is this point on the drivable surface. Answers feed the telemetry
//! on-road flag and pin the car's y — they never branch force computation.

use glam::{UVec2, Vec2, Vec3};

/// Host-side ground lookup. Implementations must be pure: same point,
/// same answer, no interior mutation.
pub trait SurfaceQuery {
    /// Ground height (world y) under world-plane point (x, z).
    fn ground_height(&self, x: f32, z: f32) -> f32;
    /// Whether (x, z) lies on the drivable surface.
    fn on_surface(&self, x: f32, z: f32) -> bool;
}

/// Infinite flat ground at a fixed height; everywhere drivable.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlatSurface {
    pub height: f32,
}

impl SurfaceQuery for FlatSurface {
    fn ground_height(&self, _x: f32, _z: f32) -> f32 { self.height }
    fn on_surface(&self, _x: f32, _z: f32) -> bool { true }
}

/// Regular-grid road patch: per-cell heights plus a drivable mask, with a
/// spawn pose for placing the car at the track start.
#[derive(Clone, Debug)]
pub struct SurfaceGrid {
    dims: UVec2,        // nx, nz (columns in x, rows in z)
    cell: Vec2,         // world units per cell in x and z
    origin: Vec2,       // world (x, z) of cell (0, 0)
    heights: Vec<f32>,
    road: Vec<bool>,
    start: Vec3,
    start_heading: f32,
}

impl SurfaceGrid {
    pub fn new(
        dims: UVec2,
        cell: Vec2,
        origin: Vec2,
        heights: Vec<f32>,
        road: Vec<bool>,
    ) -> Self {
        let n = (dims.x as usize) * (dims.y as usize);
        assert_eq!(heights.len(), n);
        assert_eq!(road.len(), n);
        Self { dims, cell, origin, heights, road, start: Vec3::ZERO, start_heading: 0.0 }
    }

    /// Flat patch helper: every cell at `height`, drivable per `road`.
    pub fn flat(dims: UVec2, cell: Vec2, origin: Vec2, height: f32, road: Vec<bool>) -> Self {
        let n = (dims.x as usize) * (dims.y as usize);
        Self::new(dims, cell, origin, vec![height; n], road)
    }

    pub fn with_start(mut self, start: Vec3, heading: f32) -> Self {
        self.start = start;
        self.start_heading = heading;
        self
    }

    /// Spawn position and heading for the track start line.
    pub fn start_pose(&self) -> (Vec3, f32) {
        (self.start, self.start_heading)
    }

    #[inline]
    fn idx(&self, x: i32, z: i32) -> usize {
        (x as usize) + (z as usize) * (self.dims.x as usize)
    }

    #[inline]
    fn h(&self, x: i32, z: i32) -> f32 {
        self.heights[self.idx(x, z)]
    }

    /// Grid coordinates of (x, z), or None outside the patch.
    fn cell_of(&self, x: f32, z: f32) -> Option<(f32, f32)> {
        let fx = (x - self.origin.x) / self.cell.x;
        let fz = (z - self.origin.y) / self.cell.y;
        let (nx, nz) = (self.dims.x as f32, self.dims.y as f32);
        if fx < 0.0 || fz < 0.0 || fx > nx - 1.0 || fz > nz - 1.0 {
            return None;
        }
        Some((fx, fz))
    }
}

impl SurfaceQuery for SurfaceGrid {
    /// Bilinear height inside the patch; clamped edge value outside.
    fn ground_height(&self, x: f32, z: f32) -> f32 {
        let nx = self.dims.x as i32;
        let nz = self.dims.y as i32;
        let fx = ((x - self.origin.x) / self.cell.x).clamp(0.0, (nx - 1) as f32 - 1e-5);
        let fz = ((z - self.origin.y) / self.cell.y).clamp(0.0, (nz - 1) as f32 - 1e-5);
        let x0 = fx.floor() as i32;
        let x1 = (x0 + 1).min(nx - 1);
        let z0 = fz.floor() as i32;
        let z1 = (z0 + 1).min(nz - 1);
        let tx = fx - x0 as f32;
        let tz = fz - z0 as f32;

        let a = self.h(x0, z0) * (1.0 - tx) + self.h(x1, z0) * tx;
        let b = self.h(x0, z1) * (1.0 - tx) + self.h(x1, z1) * tx;
        a * (1.0 - tz) + b * tz
    }

    /// Nearest-cell mask lookup; anything outside the patch is off-road.
    fn on_surface(&self, x: f32, z: f32) -> bool {
        let Some((fx, fz)) = self.cell_of(x, z) else { return false };
        let cx = fx.round() as i32;
        let cz = fz.round() as i32;
        self.road[self.idx(cx, cz)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{uvec2, vec2, vec3};

    fn two_lane_strip() -> SurfaceGrid {
        // 4x2 cells, 1 m cells: road on the z = 0 row only.
        let road = vec![
            true, true, true, true,
            false, false, false, false,
        ];
        SurfaceGrid::flat(uvec2(4, 2), vec2(1.0, 1.0), vec2(0.0, 0.0), 0.5, road)
            .with_start(vec3(0.0, 0.5, 0.0), 0.0)
    }

    #[test] fn height_is_sampled_bilinearly() {
        let mut g = two_lane_strip();
        g.heights[0] = 0.0;
        g.heights[1] = 1.0;
        let h = g.ground_height(0.5, 0.0);
        assert!((h - 0.5).abs() < 1e-6);
    }

    #[test] fn mask_separates_road_from_shoulder() {
        let g = two_lane_strip();
        assert!(g.on_surface(1.2, 0.1));
        assert!(!g.on_surface(1.2, 0.9));
    }

    #[test] fn outside_the_patch_is_off_road() {
        let g = two_lane_strip();
        assert!(!g.on_surface(-2.0, 0.0));
        assert!(!g.on_surface(9.0, 0.0));
    }

    #[test] fn flat_surface_is_everywhere_drivable() {
        let f = FlatSurface { height: 0.25 };
        assert_eq!(f.ground_height(100.0, -40.0), 0.25);
        assert!(f.on_surface(1e6, -1e6));
    }
}
