//! Ray/triangle intersection.

use glam::Vec3;
use mesh::Triangle;

/// Parallel/degenerate cutoff for the Möller–Trumbore determinant. A
/// triangle with collapsed area falls under it and simply reports no hit.
const DET_EPSILON: f32 = 1e-7;

/// Hits closer than this along the ray are discarded so a sample point
/// lying exactly on a surface does not count its own triangle.
const T_MIN: f32 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

impl Ray {
    #[must_use]
    pub const fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

/// Möller–Trumbore, both-sided. Returns the hit distance along `ray.dir`,
/// or `None` for misses, back-parameter hits and degenerate triangles.
///
/// Rays grazing a shared edge resolve however the fixed epsilons fall;
/// the outcome is deterministic for identical geometry and ray, which is
/// all the parity classifier requires.
#[must_use]
pub fn intersect_triangle(ray: &Ray, tri: &Triangle) -> Option<f32> {
    let edge1 = tri.b - tri.a;
    let edge2 = tri.c - tri.a;
    let h = ray.dir.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < DET_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - tri.a;
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = inv_det * ray.dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = inv_det * edge2.dot(q);
    (t > T_MIN).then_some(t)
}
