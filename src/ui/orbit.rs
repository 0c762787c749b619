use std::f64::consts::FRAC_PI_2;

use crate::data::points::GradePoints;

// ---------------------------------------------------------------------------
// Orbit camera for the 3D scatter
// ---------------------------------------------------------------------------

/// Rotation of the normalised data cube. Z is up; yaw turns around Z and
/// pitch tilts from a side view (0) to a plan view (π/2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f64,
    pub pitch: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: -0.7,
            pitch: 0.45,
        }
    }
}

/// A point after projection: screen position plus depth (larger is farther).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: [f64; 2],
    pub depth: f64,
}

const DRAG_SPEED: f64 = 0.01;

impl OrbitCamera {
    /// Apply a mouse drag in screen pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx as f64 * DRAG_SPEED;
        self.pitch = (self.pitch + dy as f64 * DRAG_SPEED).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Project a point already scaled into the `[-1, 1]` cube.
    pub fn project(&self, p: [f64; 3]) -> Projected {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        let x = p[0] * cy - p[1] * sy;
        let y = p[0] * sy + p[1] * cy;
        let z = p[2];

        Projected {
            screen: [x, z * cp + y * sp],
            depth: y * cp - z * sp,
        }
    }
}

// ---------------------------------------------------------------------------
// Normalisation into the unit cube
// ---------------------------------------------------------------------------

/// Per-axis affine map from data coordinates into `[-1, 1]`, so axes with
/// very different extents (easting vs. elevation) fill the same cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeFit {
    center: [f64; 3],
    half: [f64; 3],
}

impl CubeFit {
    pub fn new(points: &GradePoints) -> Self {
        let bounds = points
            .bounds()
            .unwrap_or([(-1.0, 1.0), (-1.0, 1.0), (-1.0, 1.0)]);
        let mut center = [0.0; 3];
        let mut half = [1.0; 3];
        for (axis, (lo, hi)) in bounds.iter().enumerate() {
            center[axis] = (lo + hi) / 2.0;
            let h = (hi - lo) / 2.0;
            half[axis] = if h > f64::EPSILON { h } else { 1.0 };
        }
        CubeFit { center, half }
    }

    pub fn apply(&self, p: [f64; 3]) -> [f64; 3] {
        [
            (p[0] - self.center[0]) / self.half[0],
            (p[1] - self.center[1]) / self.half[1],
            (p[2] - self.center[2]) / self.half[2],
        ]
    }

    /// Data value at the cube's low (-1) and high (+1) face for an axis.
    pub fn axis_extent(&self, axis: usize) -> (f64, f64) {
        (
            self.center[axis] - self.half[axis],
            self.center[axis] + self.half[axis],
        )
    }
}

/// The 12 edges of the unit cube, for drawing the bounding frame.
pub fn cube_edges() -> Vec<([f64; 3], [f64; 3])> {
    let mut edges = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            edges.push(([-1.0, a, b], [1.0, a, b]));
            edges.push(([a, -1.0, b], [a, 1.0, b]));
            edges.push(([a, b, -1.0], [a, b, 1.0]));
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    #[test]
    fn test_side_view_shows_x_and_z() {
        let cam = OrbitCamera { yaw: 0.0, pitch: 0.0 };
        let p = cam.project([0.3, 0.9, -0.5]);
        assert!(close(p.screen, [0.3, -0.5]));
        assert!((p.depth - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_plan_view_shows_x_and_y() {
        let cam = OrbitCamera { yaw: 0.0, pitch: FRAC_PI_2 };
        let p = cam.project([0.3, 0.9, -0.5]);
        assert!(close(p.screen, [0.3, 0.9]));
    }

    #[test]
    fn test_drag_clamps_pitch() {
        let mut cam = OrbitCamera::default();
        cam.drag(0.0, 10_000.0);
        assert_eq!(cam.pitch, FRAC_PI_2);
        cam.drag(100.0, 0.0);
        assert!((cam.yaw - (-0.7 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_cube_fit_maps_bounds_to_unit_cube() {
        let points = GradePoints {
            x: vec![100.0, 300.0],
            y: vec![5.0, 5.0],
            z: vec![-10.0, 30.0],
            grade: vec![0.1, 0.2],
            skipped: 0,
        };
        let fit = CubeFit::new(&points);
        assert_eq!(fit.apply([100.0, 5.0, 30.0]), [-1.0, 0.0, 1.0]);
        assert_eq!(fit.apply([300.0, 5.0, -10.0]), [1.0, 0.0, -1.0]);
        assert_eq!(fit.axis_extent(0), (100.0, 300.0));
        assert_eq!(cube_edges().len(), 12);
    }
}
