#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! # Composite & Export
//!
//! Stitches the committed layer buffers into one master image and ships
//! it out: a timestamped PNG snapshot on demand, or a continuous frame
//! stream into a [`FrameSink`] during a capture session. Encoding beyond
//! PNG frames is an external concern behind the sink trait.

pub mod capture;
pub mod composite;
pub mod error;
pub mod snapshot;

pub use capture::{CaptureSession, FrameSink, PngSequenceSink};
pub use composite::Composite;
pub use error::ExportError;
pub use snapshot::save_snapshot;
