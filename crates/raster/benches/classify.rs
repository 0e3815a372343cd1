use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec3;
use mesh::primitives::box_mesh;
use mesh::MeshPart;
use raster::{LayerDescriptor, Rig, TickConfig};

fn bench_full_pass(c: &mut Criterion) {
    let descriptors = vec![
        LayerDescriptor {
            id: "layer-1".into(),
            width: 128,
            height: 80,
            gap: 8,
        },
        LayerDescriptor {
            id: "layer-2".into(),
            width: 96,
            height: 80,
            gap: 8,
        },
        LayerDescriptor {
            id: "layer-3".into(),
            width: 64,
            height: 80,
            gap: 0,
        },
    ];
    let mut rig = Rig::new(&descriptors, 0.05);
    rig.install_model(&[MeshPart::new(box_mesh(Vec3::new(0.6, 4.0, 2.0)))]);
    let config = TickConfig {
        auto_rotate: true,
        rotation_speed: Vec3::new(0.5, 0.3, 0.0),
        ..TickConfig::default()
    };

    c.bench_function("classify_all_layers_tick", |b| {
        b.iter(|| rig.tick(&config));
    });
}

criterion_group!(benches, bench_full_pass);
criterion_main!(benches);
