use glam::{Mat4, Vec3};
use mesh::primitives::box_mesh;
use mesh::MeshPart;
use raster::{
    classify_layer, sample_point, LayerDescriptor, LayerGeometry, Pixel, PixelStore, Rig,
    TickConfig,
};

fn descriptor(width: u32, height: u32) -> LayerDescriptor {
    LayerDescriptor {
        id: format!("layer-{width}x{height}"),
        width,
        height,
        gap: 0,
    }
}

fn box_rig(half_extents: Vec3, width: u32, height: u32) -> Rig {
    let mut rig = Rig::new(&[descriptor(width, height)], 0.05);
    rig.install_model(&[MeshPart::new(box_mesh(half_extents))]);
    rig
}

/// Independent oracle: is the sample inside an origin-centered box?
fn inside_box(p: Vec3, half: Vec3) -> bool {
    p.x.abs() <= half.x && p.y.abs() <= half.y && p.z.abs() <= half.z
}

/// Distance from the sample to the nearest box face plane; samples right
/// on a face are excluded from oracle comparisons since the mesh test and
/// the closed-box test may legitimately disagree there.
fn face_distance(p: Vec3, half: Vec3) -> f32 {
    (p.x.abs() - half.x)
        .abs()
        .min((p.y.abs() - half.y).abs())
        .min((p.z.abs() - half.z).abs())
}

fn classification_matches_oracle(half_extents: Vec3, width: u32, height: u32) {
    let mut rig = box_rig(half_extents, width, height);
    rig.tick(&TickConfig::default());

    let slot = &rig.layers()[0];
    let geo = slot.geometry;
    for y in 0..height {
        for x in 0..width {
            let p = sample_point(x, y, &geo, &Mat4::IDENTITY);
            if face_distance(p, half_extents) < 1e-3 {
                continue;
            }
            let expected = if inside_box(p, half_extents) {
                Pixel::INSIDE
            } else {
                Pixel::OUTSIDE
            };
            let got = slot.store.committed()[(y * width + x) as usize];
            assert_eq!(got, expected, "pixel ({x},{y}) at {p:?}");
        }
    }
}

#[test]
fn parity_matches_point_in_box_enclosing_cylinder() {
    // The default model: the 4x8x4 box fully encloses the
    // 128-wide layer's ~1.02 radius, so the whole wrap is white.
    classification_matches_oracle(Vec3::new(2.0, 4.0, 2.0), 128, 80);
}

#[test]
fn parity_matches_point_in_box_band_scenario() {
    // A narrow box cuts the 128x80 layer into a vertical white band
    // around θ=0/π where |r·sinθ| fits inside the half-width.
    classification_matches_oracle(Vec3::new(0.6, 4.0, 2.0), 128, 80);
}

#[test]
fn band_scenario_has_both_colors() {
    let mut rig = box_rig(Vec3::new(0.6, 4.0, 2.0), 128, 80);
    rig.tick(&TickConfig::default());
    let buf = rig.layers()[0].store.committed();
    assert!(buf.contains(&Pixel::INSIDE));
    assert!(buf.contains(&Pixel::OUTSIDE));
    // Column 0 is θ=0: x = r·sin0 = 0, well inside the band.
    let width = 128;
    for y in 0..80 {
        assert_eq!(buf[y * width], Pixel::INSIDE, "row {y} of column 0");
    }
}

#[test]
fn repeated_passes_are_bit_identical() {
    let mut rig = box_rig(Vec3::new(0.6, 4.0, 2.0), 128, 80);
    let config = TickConfig {
        position: Vec3::new(0.2, -0.3, 0.1),
        rotation: Vec3::new(0.4, 1.1, 0.0),
        scale: 1.3,
        ..TickConfig::default()
    };
    rig.tick(&config);
    let first = rig.layers()[0].store.committed_bytes().to_vec();
    rig.tick(&config);
    let second = rig.layers()[0].store.committed_bytes().to_vec();
    assert_eq!(first, second);
}

#[test]
fn bounding_reject_skips_ray_tests_for_disjoint_model() {
    // Model translated far from every cylinder: all samples must reject
    // on the AABB and the intersection structure must never be queried.
    let mut rig = box_rig(Vec3::ONE, 64, 32);
    let stats = rig.tick(&TickConfig {
        position: Vec3::new(100.0, 0.0, 0.0),
        ..TickConfig::default()
    });
    assert_eq!(stats.classify.rays_cast, 0);
    assert_eq!(stats.classify.rejected, 64 * 32);
    assert_eq!(stats.classify.inside, 0);
    assert!(rig.layers()[0]
        .store
        .committed()
        .iter()
        .all(|&p| p == Pixel::OUTSIDE));
}

#[test]
fn reject_never_flips_an_inside_answer() {
    // Every sample the oracle calls inside must also be inside the
    // expanded AABB, i.e. the shortcut can only route points to the ray
    // test, never straight to OUTSIDE when they are actually inside.
    let half = Vec3::new(0.6, 4.0, 2.0);
    let mut rig = box_rig(half, 128, 80);
    let stats = rig.tick(&TickConfig::default());
    let buf = rig.layers()[0].store.committed();
    let inside_count = buf.iter().filter(|&&p| p == Pixel::INSIDE).count();
    assert_eq!(stats.classify.inside, inside_count);
    assert!(stats.classify.rays_cast >= inside_count);
}

#[test]
fn transformed_model_classifies_under_its_transform() {
    // Push the thin box to one side: the white band follows the model.
    let half = Vec3::new(0.6, 4.0, 2.0);
    let mut rig = box_rig(half, 128, 80);
    let offset = Vec3::new(0.7, 0.0, 0.0);
    rig.tick(&TickConfig {
        position: offset,
        ..TickConfig::default()
    });
    let slot = &rig.layers()[0];
    for y in 0..80u32 {
        for x in 0..128u32 {
            let p = sample_point(x, y, &slot.geometry, &Mat4::IDENTITY);
            let local = p - offset;
            if face_distance(local, half) < 1e-3 {
                continue;
            }
            let expected = if inside_box(local, half) {
                Pixel::INSIDE
            } else {
                Pixel::OUTSIDE
            };
            assert_eq!(slot.store.committed()[(y * 128 + x) as usize], expected);
        }
    }
}

#[test]
fn classify_layer_direct_call_reports_consistent_stats() {
    let mut surface = collider::Surface::new();
    surface.rebuild(&[MeshPart::new(box_mesh(Vec3::new(0.6, 4.0, 2.0)))]);
    surface.set_transform(Vec3::ZERO, Vec3::ZERO, 1.0);

    let desc = descriptor(64, 40);
    let geo = LayerGeometry::new(&desc, 0.05);
    let mut store = PixelStore::new(64, 40);
    let mut scratch = collider::RayScratch::new();
    let stats = classify_layer(&surface, &geo, &Mat4::IDENTITY, &mut store, &mut scratch);

    assert_eq!(stats.sampled, 64 * 40);
    assert_eq!(stats.sampled, stats.rejected + stats.rays_cast);
    assert!(stats.inside > 0);
}
