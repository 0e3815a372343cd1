//! Pixel-grid to cylinder-surface mapping.

use crate::layers::LayerGeometry;
use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// World-space sample point for pixel `(x, y)` of a layer.
///
/// Column `x` maps to angle `θ = (x / W) · 2π`; row 0 maps to the top of
/// the cylinder and rows grow downward, so the local height is
/// `(H/2 − y) · pixel_size`. Cylindrical-to-Cartesian uses the
/// `(r·sinθ, y, r·cosθ)` convention — θ = 0 lies on +z. Downstream
/// unroll/export tooling assumes exactly this mapping; do not reorder it.
///
/// Pure function of its arguments; called for every pixel every tick.
#[must_use]
pub fn sample_point(x: u32, y: u32, geo: &LayerGeometry, cylinder_world: &Mat4) -> Vec3 {
    let theta = x as f32 / geo.width as f32 * TAU;
    let y_local = (geo.height as f32 / 2.0 - y as f32) * geo.pixel_size;
    let local = Vec3::new(geo.radius * theta.sin(), y_local, geo.radius * theta.cos());
    cylinder_world.transform_point3(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerDescriptor;

    fn geo(width: u32, height: u32, pixel_size: f32) -> LayerGeometry {
        LayerGeometry::new(
            &LayerDescriptor {
                id: "t".into(),
                width,
                height,
                gap: 0,
            },
            pixel_size,
        )
    }

    #[test]
    fn origin_pixel_is_theta_zero_top() {
        for (w, h, ps) in [(128, 80, 0.05), (64, 80, 0.05), (17, 3, 0.25), (256, 1, 0.01)] {
            let g = geo(w, h, ps);
            let p = sample_point(0, 0, &g, &Mat4::IDENTITY);
            // θ = 0 -> on the +z side, x = 0.
            assert!(p.x.abs() < 1e-6, "w={w}");
            assert!((p.z - g.radius).abs() < 1e-6);
            assert!((p.y - g.world_height / 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn rows_descend_from_the_top() {
        let g = geo(128, 80, 0.05);
        let top = sample_point(0, 0, &g, &Mat4::IDENTITY);
        let below = sample_point(0, 1, &g, &Mat4::IDENTITY);
        assert!((top.y - below.y - 0.05).abs() < 1e-6);
        let bottom = sample_point(0, 79, &g, &Mat4::IDENTITY);
        assert!((bottom.y - (-g.world_height / 2.0 + 0.05)).abs() < 1e-5);
    }

    #[test]
    fn quarter_turn_column_lands_on_plus_x() {
        let g = geo(128, 80, 0.05);
        let p = sample_point(32, 40, &g, &Mat4::IDENTITY);
        assert!((p.x - g.radius).abs() < 1e-5);
        assert!(p.z.abs() < 1e-5);
    }

    #[test]
    fn cylinder_world_matrix_is_applied() {
        let g = geo(128, 80, 0.05);
        let m = Mat4::from_translation(Vec3::new(3.0, -1.0, 0.5));
        let p = sample_point(0, 0, &g, &m);
        assert!((p.x - 3.0).abs() < 1e-6);
        assert!((p.y - (g.world_height / 2.0 - 1.0)).abs() < 1e-6);
        assert!((p.z - (g.radius + 0.5)).abs() < 1e-6);
    }

    #[test]
    fn all_columns_stay_on_the_radius() {
        let g = geo(100, 10, 0.05);
        for x in 0..100 {
            let p = sample_point(x, 5, &g, &Mat4::IDENTITY);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - g.radius).abs() < 1e-5);
        }
    }
}
