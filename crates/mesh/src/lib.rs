#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! # Triangle-Mesh Data Model
//!
//! Plain triangle geometry shared by the collider and rasterizer, plus the
//! thin loaders that bring user models into that representation.
//!
//! A loaded model is a flat list of [`MeshPart`]s (mesh + node transform).
//! [`bake_parts`] collapses that list into one world-baked, re-centered
//! [`TriangleMesh`], which is the only form the rest of the system sees.

pub mod aabb;
pub mod error;
pub mod load;
pub mod obj;
pub mod primitives;
pub mod stl;
pub mod types;

pub use aabb::Aabb;
pub use error::LoadError;
pub use load::load_path;
pub use types::{bake_parts, MeshPart, Triangle, TriangleMesh};
