#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::many_single_char_names
)]
//! # Collision Surface
//!
//! The ray-queryable side of a loaded model: one merged triangle mesh under
//! a bounding-volume hierarchy, plus the world transform that keeps the
//! queried surface matched to the model as positioned each tick.
//!
//! The structure is rebuilt wholesale on model change and is read-only
//! between rebuilds; [`Surface::cast_ray_into`] is the only query the
//! classifier needs.

pub mod bvh;
pub mod ray;
pub mod surface;

pub use bvh::Bvh;
pub use ray::{intersect_triangle, Ray};
pub use surface::{RayScratch, Surface};
