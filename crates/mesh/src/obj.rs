//! Wavefront OBJ loader.
//!
//! Positions and faces only: `v` records and `f` records with fan
//! triangulation. Texture/normal references, groups and materials are
//! ignored — the classifier needs bare triangles.

use crate::error::LoadError;
use crate::types::{Triangle, TriangleMesh};
use glam::Vec3;

pub fn parse_obj(text: &str) -> Result<TriangleMesh, LoadError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => {
                let mut coord = |axis: &str| -> Result<f32, LoadError> {
                    fields
                        .next()
                        .and_then(|s| s.parse::<f32>().ok())
                        .ok_or_else(|| {
                            LoadError::malformed(
                                "OBJ",
                                format!("line {}: bad {axis} coordinate", lineno + 1),
                            )
                        })
                };
                let x = coord("x")?;
                let y = coord("y")?;
                let z = coord("z")?;
                positions.push(Vec3::new(x, y, z));
            }
            Some("f") => {
                let mut corners: Vec<Vec3> = Vec::new();
                for field in fields {
                    let idx = resolve_index(field, positions.len()).ok_or_else(|| {
                        LoadError::malformed(
                            "OBJ",
                            format!("line {}: bad vertex reference {field:?}", lineno + 1),
                        )
                    })?;
                    corners.push(positions[idx]);
                }
                if corners.len() < 3 {
                    return Err(LoadError::malformed(
                        "OBJ",
                        format!("line {}: face with fewer than 3 vertices", lineno + 1),
                    ));
                }
                for i in 1..corners.len() - 1 {
                    triangles.push(Triangle::new(corners[0], corners[i], corners[i + 1]));
                }
            }
            _ => {}
        }
    }

    Ok(TriangleMesh::new(triangles))
}

/// `f` fields look like `7`, `7/1`, `7//3` or `7/1/3`; only the position
/// index matters here. OBJ indices are 1-based, negative counts from the
/// end of the position list.
fn resolve_index(field: &str, len: usize) -> Option<usize> {
    let first = field.split('/').next()?;
    let idx: i64 = first.parse().ok()?;
    let len = i64::try_from(len).ok()?;
    let resolved = if idx > 0 {
        idx - 1
    } else if idx < 0 {
        len + idx
    } else {
        return None;
    };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}
