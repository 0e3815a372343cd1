//! Run configuration, loaded from a JSON file or defaulted.

use anyhow::{Context, Result};
use glam::Vec3;
use raster::{LayerDescriptor, TickConfig, DEFAULT_PIXEL_SIZE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Cylinder descriptor set, left to right.
    pub layers: Vec<LayerDescriptor>,
    pub pixel_size: f32,
    /// Model file to wrap; a built-in box when absent.
    pub model: Option<PathBuf>,
    pub position: [f32; 3],
    /// Base rotation in XYZ euler radians.
    pub rotation: [f32; 3],
    pub scale: f32,
    pub auto_rotate: bool,
    pub rotation_speed: [f32; 3],
    /// Number of ticks to run before the final snapshot.
    pub ticks: u64,
    /// Record every tick as a PNG frame sequence.
    pub capture: bool,
    pub output_dir: PathBuf,
    /// Presentation-only knobs a viewer would honor; the headless run
    /// logs and ignores them.
    pub layer_opacity: Option<f32>,
    pub layers_visible: Option<bool>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            pixel_size: DEFAULT_PIXEL_SIZE,
            model: None,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: 1.0,
            auto_rotate: true,
            rotation_speed: [0.5, 0.3, 0.0],
            ticks: 240,
            capture: false,
            output_dir: PathBuf::from("."),
            layer_opacity: None,
            layers_visible: None,
        }
    }
}

fn default_layers() -> Vec<LayerDescriptor> {
    vec![
        LayerDescriptor {
            id: "layer-0".into(),
            width: 128,
            height: 80,
            gap: 8,
        },
        LayerDescriptor {
            id: "layer-1".into(),
            width: 96,
            height: 80,
            gap: 8,
        },
        LayerDescriptor {
            id: "layer-2".into(),
            width: 64,
            height: 80,
            gap: 0,
        },
    ]
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.layers.is_empty(), "descriptor set is empty");
        for d in &self.layers {
            anyhow::ensure!(
                d.width > 0 && d.height > 0,
                "layer {:?} has a zero dimension",
                d.id
            );
        }
        anyhow::ensure!(self.pixel_size > 0.0, "pixel_size must be positive");
        anyhow::ensure!(self.scale > 0.0, "scale must be positive");
        Ok(())
    }

    #[must_use]
    pub fn tick_config(&self) -> TickConfig {
        TickConfig {
            position: Vec3::from_array(self.position),
            rotation: Vec3::from_array(self.rotation),
            scale: self.scale,
            auto_rotate: self.auto_rotate,
            rotation_speed: Vec3::from_array(self.rotation_speed),
        }
    }
}
