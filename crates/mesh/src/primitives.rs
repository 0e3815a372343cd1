//! Generated test-and-default geometry.

use crate::types::{Triangle, TriangleMesh};
use glam::Vec3;

/// Closed axis-aligned box centered at the origin, outward-facing
/// windings, 12 triangles. Used as the default model and as a known
/// watertight solid in tests.
#[must_use]
pub fn box_mesh(half_extents: Vec3) -> TriangleMesh {
    // Two triangles per face, indices into the corner lattice below.
    const FACES: [[usize; 4]; 6] = [
        [1, 3, 7, 5], // +x
        [4, 6, 2, 0], // -x
        [2, 6, 7, 3], // +y
        [4, 0, 1, 5], // -y
        [5, 7, 6, 4], // +z
        [0, 2, 3, 1], // -z
    ];
    let h = half_extents;
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 == 0 { -h.x } else { h.x },
            if i & 2 == 0 { -h.y } else { h.y },
            if i & 4 == 0 { -h.z } else { h.z },
        )
    };
    let mut triangles = Vec::with_capacity(12);
    for [a, b, c, d] in FACES {
        triangles.push(Triangle::new(corner(a), corner(b), corner(c)));
        triangles.push(Triangle::new(corner(a), corner(c), corner(d)));
    }
    TriangleMesh::new(triangles)
}
