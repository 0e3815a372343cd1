#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::must_use_candidate
)]
//! # Cylindrical Wrap Rasterizer
//!
//! The point-in-solid core. Each configured layer is a cylindrical shell
//! with its own pixel grid; every tick, each pixel's (angle, height) cell
//! is mapped to a world-space sample point and classified against the
//! collision surface, producing a binary black/white wrap texture per
//! layer.
//!
//! Classification is two-stage: a cheap reject against the model's
//! expanded world AABB, then an even-odd ray-parity test for the
//! survivors. For a fixed surface, transform and grid the produced pixel
//! buffers are bit-identical run to run.
//!
//! [`Rig`] owns the per-tick orchestration; everything it reads from the
//! outside arrives as an immutable [`TickConfig`] snapshot.

pub mod engine;
pub mod layers;
pub mod rig;
pub mod sampler;
pub mod store;

pub use engine::{classify_layer, ClassifyStats};
pub use layers::{LayerDescriptor, LayerGeometry, DEFAULT_PIXEL_SIZE};
pub use rig::{LayerSlot, Rig, TickConfig, TickStats};
pub use sampler::sample_point;
pub use store::{Pixel, PixelStore};
