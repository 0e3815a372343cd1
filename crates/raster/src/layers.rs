//! Layer descriptor set and derived cylinder geometry.

use serde::Deserialize;
use std::f32::consts::TAU;

/// World units per pixel, shared by every layer. Matches the printed
/// template scale the layer widths were designed around.
pub const DEFAULT_PIXEL_SIZE: f32 = 0.05;

/// Static configuration for one cylindrical layer.
///
/// Immutable after construction; the descriptor set is fixed for the
/// process lifetime. `gap` is the horizontal spacing inserted after this
/// layer's block in the composite image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayerDescriptor {
    pub id: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub gap: u32,
}

/// Cylinder dimensions derived from a descriptor.
///
/// The circumference equals the unrolled pixel row width, so
/// `radius = W * pixel_size / 2π` and one pixel column spans exactly one
/// angular step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerGeometry {
    pub width: u32,
    pub height: u32,
    pub pixel_size: f32,
    pub radius: f32,
    pub world_height: f32,
}

impl LayerGeometry {
    #[must_use]
    pub fn new(desc: &LayerDescriptor, pixel_size: f32) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            pixel_size,
            radius: desc.width as f32 * pixel_size / TAU,
            world_height: desc.height as f32 * pixel_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(width: u32, height: u32) -> LayerDescriptor {
        LayerDescriptor {
            id: "test".into(),
            width,
            height,
            gap: 0,
        }
    }

    #[test]
    fn radius_matches_circumference() {
        let geo = LayerGeometry::new(&desc(128, 80), 0.05);
        assert!((geo.radius * TAU - 6.4).abs() < 1e-5);
        assert!((geo.world_height - 4.0).abs() < 1e-6);
    }

    #[test]
    fn descriptor_gap_defaults_to_zero() {
        let d: LayerDescriptor =
            serde_json::from_str(r#"{"id":"a","width":64,"height":80}"#).unwrap();
        assert_eq!(d.gap, 0);
    }
}
