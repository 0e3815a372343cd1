//! Still-image export.

use crate::composite::Composite;
use crate::error::ExportError;
use image::{ImageBuffer, Rgba};
use std::path::{Path, PathBuf};

/// Write the composite as `cylinder_layers_<timestamp>.png` under `dir`
/// and return the full path.
pub fn save_snapshot(composite: &Composite, dir: &Path) -> Result<PathBuf, ExportError> {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("cylinder_layers_{stamp}.png"));
    encode_png(composite, &path)?;
    tracing::info!(path = %path.display(), "snapshot saved");
    Ok(path)
}

pub(crate) fn encode_png(composite: &Composite, path: &Path) -> Result<(), ExportError> {
    let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_raw(
        composite.width(),
        composite.height(),
        composite.as_bytes().to_vec(),
    )
    .ok_or(ExportError::BadDimensions)?;
    img.save(path)?;
    Ok(())
}
