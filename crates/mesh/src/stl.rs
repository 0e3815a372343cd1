//! STL loader, binary and ASCII.
//!
//! Binary detection cannot rely on the header alone: binary files may also
//! begin with `solid`, so a file only counts as ASCII when a `facet`
//! keyword shows up near the start.

use crate::error::LoadError;
use crate::types::{Triangle, TriangleMesh};
use glam::Vec3;

const BINARY_HEADER: usize = 80;
const BINARY_TRIANGLE: usize = 50; // normal (12) + vertices (36) + attribute (2)

pub fn parse_stl(data: &[u8]) -> Result<TriangleMesh, LoadError> {
    if is_ascii(data) {
        parse_ascii(data)
    } else {
        parse_binary(data)
    }
}

fn is_ascii(data: &[u8]) -> bool {
    if !data.starts_with(b"solid ") {
        return false;
    }
    let probe = &data[..data.len().min(1024)];
    probe.windows(5).any(|w| w == b"facet")
}

fn parse_binary(data: &[u8]) -> Result<TriangleMesh, LoadError> {
    if data.len() < BINARY_HEADER + 4 {
        return Err(LoadError::malformed("STL", "binary file too short"));
    }
    let count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
    let body = &data[BINARY_HEADER + 4..];
    if body.len() < count * BINARY_TRIANGLE {
        return Err(LoadError::malformed("STL", "binary file truncated"));
    }

    let mut triangles = Vec::with_capacity(count);
    for record in body.chunks_exact(BINARY_TRIANGLE).take(count) {
        // Skip the stored normal; windings define orientation.
        let v = &record[12..48];
        let read = |i: usize| {
            Vec3::new(
                f32::from_le_bytes([v[i], v[i + 1], v[i + 2], v[i + 3]]),
                f32::from_le_bytes([v[i + 4], v[i + 5], v[i + 6], v[i + 7]]),
                f32::from_le_bytes([v[i + 8], v[i + 9], v[i + 10], v[i + 11]]),
            )
        };
        triangles.push(Triangle::new(read(0), read(12), read(24)));
    }
    Ok(TriangleMesh::new(triangles))
}

fn parse_ascii(data: &[u8]) -> Result<TriangleMesh, LoadError> {
    let text = core::str::from_utf8(data)
        .map_err(|_| LoadError::malformed("STL", "ASCII file is not valid UTF-8"))?;

    let mut triangles = Vec::new();
    let mut pending: Vec<Vec3> = Vec::with_capacity(3);
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let Some(rest) = line.strip_prefix("vertex") else {
            continue;
        };
        let mut fields = rest.split_whitespace();
        let mut coord = || -> Result<f32, LoadError> {
            fields
                .next()
                .and_then(|s| s.parse::<f32>().ok())
                .ok_or_else(|| {
                    LoadError::malformed("STL", format!("line {}: bad vertex", lineno + 1))
                })
        };
        let p = Vec3::new(coord()?, coord()?, coord()?);
        pending.push(p);
        if pending.len() == 3 {
            triangles.push(Triangle::new(pending[0], pending[1], pending[2]));
            pending.clear();
        }
    }
    if !pending.is_empty() {
        return Err(LoadError::malformed("STL", "dangling vertex records"));
    }
    Ok(TriangleMesh::new(triangles))
}
