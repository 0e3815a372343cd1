//! Tick orchestration over all layers.

use crate::engine::{classify_layer, ClassifyStats};
use crate::layers::{LayerDescriptor, LayerGeometry};
use crate::store::PixelStore;
use collider::{RayScratch, Surface};
use glam::{Mat4, Vec3};
use mesh::MeshPart;

/// Rate at which the auto-rotate speed sliders advance the spin, in
/// radians per unit speed per tick.
const SPIN_RATE: f32 = 0.01;

/// Immutable per-tick snapshot of the externally-controlled parameters.
///
/// The rig never reads live shared settings; whoever drives the loop
/// takes a snapshot and passes it in, which keeps a tick pure given its
/// inputs and the rig's own state.
#[derive(Debug, Clone, Copy)]
pub struct TickConfig {
    pub position: Vec3,
    /// Base model rotation, XYZ euler radians; the rig's accumulated spin
    /// is added on top.
    pub rotation: Vec3,
    pub scale: f32,
    pub auto_rotate: bool,
    pub rotation_speed: Vec3,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            auto_rotate: false,
            rotation_speed: Vec3::new(0.5, 0.3, 0.0),
        }
    }
}

/// Aggregate of one full tick across every layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickStats {
    pub classify: ClassifyStats,
    /// Spin state after this tick, for display/logging.
    pub spin: Vec3,
}

/// One layer's live state: fixed descriptor and geometry, mutable store.
#[derive(Debug)]
pub struct LayerSlot {
    pub descriptor: LayerDescriptor,
    pub geometry: LayerGeometry,
    pub store: PixelStore,
}

/// Owns the collision surface, the layer stores and the scratch buffers,
/// and runs the fixed tick order: apply transform, advance spin, refresh
/// the surface matrix, classify every layer, commit. Composite/export
/// reads the committed stores afterwards, within the same tick.
#[derive(Debug)]
pub struct Rig {
    surface: Surface,
    layers: Vec<LayerSlot>,
    cylinder_world: Mat4,
    spin: Vec3,
    scratch: RayScratch,
}

impl Rig {
    #[must_use]
    pub fn new(descriptors: &[LayerDescriptor], pixel_size: f32) -> Self {
        let layers = descriptors
            .iter()
            .map(|d| LayerSlot {
                descriptor: d.clone(),
                geometry: LayerGeometry::new(d, pixel_size),
                store: PixelStore::new(d.width, d.height),
            })
            .collect();
        Self {
            surface: Surface::new(),
            layers,
            cylinder_world: Mat4::IDENTITY,
            spin: Vec3::ZERO,
            scratch: RayScratch::new(),
        }
    }

    /// Replace the model. The previous collision surface is torn down as
    /// part of the rebuild swap, never queried alongside the new one, and
    /// the spin restarts from zero as for a fresh model.
    pub fn install_model(&mut self, parts: &[MeshPart]) {
        self.surface.rebuild(parts);
        self.spin = Vec3::ZERO;
    }

    #[must_use]
    pub fn has_model(&self) -> bool {
        self.surface.has_target()
    }

    /// World transform of the cylinder layer group, identity unless the
    /// hosting scene moves the whole group.
    pub fn set_cylinder_world(&mut self, m: Mat4) {
        self.cylinder_world = m;
    }

    #[must_use]
    pub fn layers(&self) -> &[LayerSlot] {
        &self.layers
    }

    #[must_use]
    pub fn spin(&self) -> Vec3 {
        self.spin
    }

    /// Run one tick under `config` and leave every layer's committed
    /// buffer holding this tick's classification.
    pub fn tick(&mut self, config: &TickConfig) -> TickStats {
        if config.auto_rotate {
            self.spin += config.rotation_speed * SPIN_RATE;
        }
        self.surface.set_transform(
            config.position,
            config.rotation + self.spin,
            config.scale,
        );

        let mut stats = TickStats {
            spin: self.spin,
            ..TickStats::default()
        };
        for slot in &mut self.layers {
            let layer_stats = classify_layer(
                &self.surface,
                &slot.geometry,
                &self.cylinder_world,
                &mut slot.store,
                &mut self.scratch,
            );
            stats.classify.accumulate(&layer_stats);
            slot.store.commit();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh::primitives::box_mesh;

    fn descriptors() -> Vec<LayerDescriptor> {
        vec![
            LayerDescriptor {
                id: "a".into(),
                width: 32,
                height: 8,
                gap: 4,
            },
            LayerDescriptor {
                id: "b".into(),
                width: 16,
                height: 8,
                gap: 0,
            },
        ]
    }

    #[test]
    fn tick_without_model_classifies_everything_outside() {
        let mut rig = Rig::new(&descriptors(), 0.05);
        let stats = rig.tick(&TickConfig::default());
        assert_eq!(stats.classify.sampled, 32 * 8 + 16 * 8);
        assert_eq!(stats.classify.rejected, stats.classify.sampled);
        assert_eq!(stats.classify.rays_cast, 0);
        assert_eq!(stats.classify.inside, 0);
    }

    #[test]
    fn auto_rotate_accumulates_spin() {
        let mut rig = Rig::new(&descriptors(), 0.05);
        rig.install_model(&[MeshPart::new(box_mesh(Vec3::ONE))]);
        let config = TickConfig {
            auto_rotate: true,
            rotation_speed: Vec3::new(1.0, 2.0, 0.0),
            ..TickConfig::default()
        };
        rig.tick(&config);
        let stats = rig.tick(&config);
        assert!((stats.spin.x - 0.02).abs() < 1e-6);
        assert!((stats.spin.y - 0.04).abs() < 1e-6);
        assert!(stats.spin.z.abs() < f32::EPSILON);
    }

    #[test]
    fn install_model_resets_spin() {
        let mut rig = Rig::new(&descriptors(), 0.05);
        rig.install_model(&[MeshPart::new(box_mesh(Vec3::ONE))]);
        rig.tick(&TickConfig {
            auto_rotate: true,
            ..TickConfig::default()
        });
        assert!(rig.spin().length() > 0.0);
        rig.install_model(&[MeshPart::new(box_mesh(Vec3::ONE))]);
        assert_eq!(rig.spin(), Vec3::ZERO);
    }

    #[test]
    fn cylinder_world_shifts_the_sampled_shell() {
        // Moving the whole layer group away from the model empties the wrap.
        let mut rig = Rig::new(&descriptors(), 0.05);
        rig.install_model(&[MeshPart::new(box_mesh(Vec3::ONE))]);
        rig.set_cylinder_world(Mat4::from_translation(Vec3::new(50.0, 0.0, 0.0)));
        let stats = rig.tick(&TickConfig::default());
        assert_eq!(stats.classify.inside, 0);
        assert_eq!(stats.classify.rays_cast, 0);
    }

    #[test]
    fn commit_happens_within_the_tick() {
        let mut rig = Rig::new(&descriptors(), 0.05);
        rig.install_model(&[MeshPart::new(box_mesh(Vec3::new(2.0, 4.0, 2.0)))]);
        rig.tick(&TickConfig::default());
        // The big box encloses both little cylinders, so the committed
        // buffers must show white already.
        for slot in rig.layers() {
            assert!(slot
                .store
                .committed()
                .iter()
                .all(|&p| p == crate::store::Pixel::INSIDE));
        }
    }
}
