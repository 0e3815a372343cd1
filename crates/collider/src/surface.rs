//! The live collision surface: merged mesh + BVH + world transform.

use crate::bvh::Bvh;
use crate::ray::Ray;
use glam::{EulerRot, Mat4, Quat, Vec3};
use mesh::{bake_parts, Aabb, MeshPart, TriangleMesh};

/// Reusable per-caller query buffers. One of these lives for the whole
/// classification pass so casting a ray never allocates.
#[derive(Debug, Default)]
pub struct RayScratch {
    pub(crate) stack: Vec<u32>,
    hits: Vec<f32>,
}

impl RayScratch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit distances from the most recent cast, ascending.
    #[must_use]
    pub fn hits(&self) -> &[f32] {
        &self.hits
    }
}

/// Everything tied to one generation of model geometry. Built as a whole
/// and swapped in as a whole, so queries never observe a half-built
/// structure.
#[derive(Debug)]
struct Target {
    mesh: TriangleMesh,
    bvh: Bvh,
    local_aabb: Aabb,
    world: Mat4,
    inverse: Mat4,
    /// Length of a unit world direction in local space; converts local hit
    /// parameters back to world distances under the uniform scale.
    dir_scale: f32,
    world_aabb: Aabb,
}

/// The ray-test side of the loaded model.
///
/// Either holds a target consistent with the last installed geometry or
/// holds none, in which case every query reports no hits and the
/// classifier resolves everything to OUTSIDE.
#[derive(Debug, Default)]
pub struct Surface {
    target: Option<Target>,
}

impl Surface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the accelerated structure with one built from `parts`.
    ///
    /// The new target is constructed completely before the old one is
    /// released, so the swap window holds at most two structures and a
    /// query can never mix generations. Zero usable geometry clears the
    /// surface to the no-target state.
    pub fn rebuild(&mut self, parts: &[MeshPart]) {
        let mesh = bake_parts(parts);
        if mesh.is_empty() {
            tracing::warn!("rebuild with no geometry; collision surface cleared");
            self.target = None;
            return;
        }
        let bvh = Bvh::build(&mesh.triangles);
        let local_aabb = bvh.aabb();
        tracing::info!(
            triangles = mesh.triangles.len(),
            nodes = bvh.node_count(),
            "collision surface rebuilt"
        );
        self.target = Some(Target {
            mesh,
            bvh,
            local_aabb,
            world: Mat4::IDENTITY,
            inverse: Mat4::IDENTITY,
            dir_scale: 1.0,
            world_aabb: local_aabb,
        });
    }

    #[must_use]
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Refresh the surface's world matrix to match the visual model:
    /// translation, XYZ-euler rotation, uniform scale. Must run after any
    /// transform change and before the tick's ray tests.
    pub fn set_transform(&mut self, position: Vec3, rotation: Vec3, scale: f32) {
        let Some(target) = self.target.as_mut() else {
            return;
        };
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z),
            position,
        );
        target.world = world;
        target.inverse = world.inverse();
        target.dir_scale = if scale.abs() > f32::EPSILON {
            1.0 / scale.abs()
        } else {
            0.0
        };
        target.world_aabb = target.local_aabb.transformed(&world);
    }

    /// Current world-space bound of the model, conservative under
    /// rotation. `None` in the no-target state.
    #[must_use]
    pub fn world_aabb(&self) -> Option<Aabb> {
        self.target.as_ref().map(|t| t.world_aabb)
    }

    /// Cast a world-space ray and collect every intersection distance,
    /// sorted ascending, into `scratch.hits()`.
    ///
    /// The even-odd count of these hits is only meaningful for closed
    /// meshes; open or self-intersecting input gives deterministic but
    /// unspecified parity.
    pub fn cast_ray_into(&self, origin: Vec3, dir: Vec3, scratch: &mut RayScratch) {
        scratch.hits.clear();
        scratch.stack.clear();
        let Some(target) = self.target.as_ref() else {
            return;
        };
        if target.dir_scale == 0.0 {
            return;
        }
        // Query in mesh-local space; hit parameters scale back by the
        // uniform factor baked into the transform.
        let local_origin = target.inverse.transform_point3(origin);
        let local_dir = target.inverse.transform_vector3(dir);
        let len = local_dir.length();
        if len <= f32::EPSILON {
            return;
        }
        let ray = Ray::new(local_origin, local_dir / len);
        target
            .bvh
            .collect_hits(&target.mesh.triangles, &ray, &mut scratch.stack, &mut scratch.hits);
        for t in &mut scratch.hits {
            *t /= len;
        }
        scratch.hits.sort_by(f32::total_cmp);
    }

    /// Allocating convenience wrapper around [`Self::cast_ray_into`].
    #[must_use]
    pub fn cast_ray(&self, origin: Vec3, dir: Vec3) -> Vec<f32> {
        let mut scratch = RayScratch::new();
        self.cast_ray_into(origin, dir, &mut scratch);
        scratch.hits
    }
}
