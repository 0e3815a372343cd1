//! Format dispatch for model files.

use crate::error::LoadError;
use crate::types::MeshPart;
use crate::{obj, stl};
use std::fs;
use std::path::Path;

/// Load a model file into mesh parts, picking the parser by extension.
///
/// OBJ and STL carry no scene hierarchy, so both come back as a single
/// part with an identity node transform.
pub fn load_path(path: &Path) -> Result<Vec<MeshPart>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let mesh = match ext.as_str() {
        "obj" => {
            let text = fs::read_to_string(path)?;
            obj::parse_obj(&text)?
        }
        "stl" => {
            let data = fs::read(path)?;
            stl::parse_stl(&data)?
        }
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    tracing::info!(
        path = %path.display(),
        triangles = mesh.triangles.len(),
        "loaded model"
    );
    Ok(vec![MeshPart::new(mesh)])
}
