//! Triangle and mesh containers.

use crate::aabb::Aabb;
use glam::{Mat4, Vec3};

/// One triangle, counter-clockwise winding, positions only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    #[must_use]
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let mut b = Aabb::EMPTY;
        b.grow(self.a);
        b.grow(self.b);
        b.grow(self.c);
        b
    }
}

/// A bag of triangles with no connectivity.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    #[must_use]
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let mut b = Aabb::EMPTY;
        for t in &self.triangles {
            b.grow(t.a);
            b.grow(t.b);
            b.grow(t.c);
        }
        b
    }

    pub fn apply_transform(&mut self, m: &Mat4) {
        for t in &mut self.triangles {
            t.a = m.transform_point3(t.a);
            t.b = m.transform_point3(t.b);
            t.c = m.transform_point3(t.c);
        }
    }
}

/// One node of a loaded model: a mesh plus its local-to-model transform.
///
/// Loaders emit a flat list of these; formats without a node hierarchy
/// (OBJ, STL) emit a single part with an identity transform.
#[derive(Debug, Clone)]
pub struct MeshPart {
    pub mesh: TriangleMesh,
    pub transform: Mat4,
}

impl MeshPart {
    #[must_use]
    pub fn new(mesh: TriangleMesh) -> Self {
        Self {
            mesh,
            transform: Mat4::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_transform(mesh: TriangleMesh, transform: Mat4) -> Self {
        Self { mesh, transform }
    }
}

/// Bake every part's node transform into vertex positions, merge the
/// results and translate the merged mesh so its AABB center sits at the
/// origin. This is the single geometry the collision surface indexes.
#[must_use]
pub fn bake_parts(parts: &[MeshPart]) -> TriangleMesh {
    let mut merged = TriangleMesh::default();
    for part in parts {
        let mut mesh = part.mesh.clone();
        mesh.apply_transform(&part.transform);
        merged.triangles.extend_from_slice(&mesh.triangles);
    }
    if merged.is_empty() {
        return merged;
    }
    let center = merged.aabb().center();
    merged.apply_transform(&Mat4::from_translation(-center));
    merged
}
