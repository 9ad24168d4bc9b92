pub mod lines;
pub mod triangles;

pub use self::{
    lines::{draw_line, draw_wireframe},
    triangles::draw_triangle,
};

use crate::math::Vec3;
use core::ops::AddAssign;

/// Triangles whose doubled screen-space area does not exceed this are treated as degenerate and produce no pixels.
pub const DEGENERATE_AREA: f32 = 1e-2;

/// The weights returned by [`barycentric`] for a degenerate triangle. Always rejected, since one weight is negative.
pub const DEGENERATE_WEIGHTS: Vec3 = Vec3::new(-1.0, 1.0, 1.0);

/// Compute the barycentric weights `(w0, w1, w2)` of `p` with respect to the screen-space triangle `a`, `b`, `c`.
///
/// Only the `x` and `y` components are considered. The weights always sum to 1, and `p` lies inside the triangle
/// (edges included) exactly when all three are non-negative. Zero-area and edge-on triangles yield
/// [`DEGENERATE_WEIGHTS`].
pub fn barycentric(a: Vec3, b: Vec3, c: Vec3, p: Vec3) -> Vec3 {
    // Solving p = a + u * (b - a) + v * (c - a) means (v, u, 1) is orthogonal to both of these
    let x_vec = Vec3::new(c.x - a.x, b.x - a.x, a.x - p.x);
    let y_vec = Vec3::new(c.y - a.y, b.y - a.y, a.y - p.y);
    let vec = x_vec.cross(y_vec);

    if vec.z.abs() > DEGENERATE_AREA {
        let v = vec.x / vec.z;
        let u = vec.y / vec.z;
        Vec3::new(1.0 - u - v, u, v)
    } else {
        DEGENERATE_WEIGHTS
    }
}

/// Whether a set of barycentric weights describes a point inside its triangle.
#[inline(always)]
pub fn is_inside(weights: Vec3) -> bool {
    weights.x >= 0.0 && weights.y >= 0.0 && weights.z >= 0.0
}

/// Counters describing the work done by one or more draw calls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Triangles submitted to the rasterizer.
    pub triangles: usize,
    /// Submitted triangles skipped for having (near) zero screen-space area.
    pub degenerate: usize,
    /// Submitted triangles the shader asked to skip.
    pub culled: usize,
    /// Fragments that passed the coverage and depth tests and were shaded.
    pub fragments: usize,
    /// Shaded fragments that the shader discarded.
    pub discarded: usize,
}

impl DrawStats {
    /// Shaded fragments whose colour reached the pixel sink.
    pub fn written(&self) -> usize {
        self.fragments - self.discarded
    }
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, other: Self) {
        self.triangles += other.triangles;
        self.degenerate += other.degenerate;
        self.culled += other.culled;
        self.fragments += other.fragments;
        self.discarded += other.discarded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const A: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    const B: Vec3 = Vec3::new(10.0, 0.0, 0.0);
    const C: Vec3 = Vec3::new(0.0, 10.0, 0.0);

    #[test]
    fn vertex_has_unit_weight() {
        assert_eq!(barycentric(A, B, C, A), Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(barycentric(A, B, C, B), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(barycentric(A, B, C, C), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn centroid_has_equal_weights() {
        let a = Vec3::new(3.0, 1.0, 0.0);
        let b = Vec3::new(17.0, 4.0, 0.0);
        let c = Vec3::new(8.0, 22.0, 0.0);
        let g = (a + b + c) * (1.0 / 3.0);
        assert_relative_eq!(barycentric(a, b, c, g), Vec3::broadcast(1.0 / 3.0), epsilon = 1e-5);
    }

    #[test]
    fn weights_sum_to_one() {
        for p in [Vec3::new(1.0, 1.0, 0.0), Vec3::new(20.0, 20.0, 0.0), Vec3::new(-3.0, 7.0, 0.0)] {
            let w = barycentric(A, B, C, p);
            assert_relative_eq!(w.x + w.y + w.z, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn coverage_inside_and_outside() {
        assert!(is_inside(barycentric(A, B, C, Vec3::new(1.0, 1.0, 0.0))));
        assert!(!is_inside(barycentric(A, B, C, Vec3::new(20.0, 20.0, 0.0))));
    }

    #[test]
    fn winding_does_not_matter() {
        let p = Vec3::new(2.0, 3.0, 0.0);
        let w = barycentric(A, C, B, p);
        assert!(is_inside(w));
        assert_relative_eq!(w, Vec3::new(0.5, 0.3, 0.2), epsilon = 1e-5);
    }

    #[test]
    fn degenerate_triangles_are_rejected() {
        let collinear = barycentric(A, B, Vec3::new(5.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(collinear, DEGENERATE_WEIGHTS);
        assert!(!is_inside(collinear));
        // Doubled area 0.0025 is under the threshold
        let sliver = barycentric(A, Vec3::new(0.05, 0.0, 0.0), Vec3::new(0.0, 0.05, 0.0), A);
        assert!(!is_inside(sliver));
    }
}
