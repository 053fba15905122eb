//! # STL Codec
//!
//! Binary layout:
//! - 80 bytes: header
//! - 4 bytes: u32 LE triangle count
//! - Per triangle (50 bytes each):
//!   - 12 bytes: normal vector (3 × f32 LE)
//!   - 36 bytes: 3 vertices (3 × 3 × f32 LE)
//!   - 2 bytes: attribute byte count (0u16)
//!
//! Readers return a welded solid so that shared corners become shared
//! indices again.

use super::ExportError;
use crate::repair::weld;
use crate::solid::Solid;
use glam::DVec3;
use std::fmt::Write as _;

const HEADER: &[u8] = b"solid-mesh binary STL";

/// Unit normal of a face, or zero for a degenerate one.
fn facet_normal(solid: &Solid, face: usize) -> DVec3 {
    solid.face_normal(face).normalize_or_zero()
}

/// Encodes a solid as binary STL.
pub fn to_binary(solid: &Solid) -> Vec<u8> {
    let tri_count = solid.face_count();
    let mut buf = Vec::with_capacity(84 + tri_count * 50);

    buf.extend_from_slice(HEADER);
    buf.resize(80, 0u8);
    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for face in 0..tri_count {
        let normal = facet_normal(solid, face);
        for c in normal.to_array() {
            buf.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for v in solid.face_corners(face) {
            for c in v.to_array() {
                buf.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }
    buf
}

/// Encodes a solid as ASCII STL.
pub fn to_ascii(solid: &Solid, name: &str) -> String {
    let mut out = String::with_capacity(64 + solid.face_count() * 256);
    // Writing to a String cannot fail
    let _ = writeln!(out, "solid {name}");
    for face in 0..solid.face_count() {
        let n = facet_normal(solid, face);
        let _ = writeln!(out, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z);
        let _ = writeln!(out, "    outer loop");
        for v in solid.face_corners(face) {
            let _ = writeln!(out, "      vertex {:e} {:e} {:e}", v.x as f32, v.y as f32, v.z as f32);
        }
        let _ = writeln!(out, "    endloop");
        let _ = writeln!(out, "  endfacet");
    }
    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Decodes binary or ASCII STL.
///
/// A buffer whose length matches the binary layout for its declared
/// triangle count is read as binary even if the header starts with `solid`.
pub fn from_bytes(bytes: &[u8], weld_epsilon: f64) -> Result<Solid, ExportError> {
    let soup = if is_binary(bytes) {
        parse_binary(bytes)?
    } else {
        let text = std::str::from_utf8(bytes).map_err(|_| ExportError::Parse {
            line: 0,
            message: "STL is neither binary nor UTF-8 text".into(),
        })?;
        parse_ascii(text)?
    };
    Ok(weld(&soup, weld_epsilon))
}

fn is_binary(bytes: &[u8]) -> bool {
    if bytes.len() < 84 {
        return false;
    }
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    bytes.len() == 84 + count * 50
}

fn read_f32(bytes: &[u8], offset: usize) -> f64 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]) as f64
}

fn parse_binary(bytes: &[u8]) -> Result<Solid, ExportError> {
    let count = (bytes.len() - 84) / 50;
    let mut solid = Solid::with_capacity(count * 3, count);
    for t in 0..count {
        // Skip the stored normal; winding is authoritative
        let base = 84 + t * 50 + 12;
        let first = solid.vertex_count() as u32;
        for corner in 0..3 {
            let o = base + corner * 12;
            solid.add_vertex(DVec3::new(
                read_f32(bytes, o),
                read_f32(bytes, o + 4),
                read_f32(bytes, o + 8),
            ));
        }
        solid.add_face(first, first + 1, first + 2);
    }
    solid.check_buffers()?;
    Ok(solid)
}

fn parse_ascii(text: &str) -> Result<Solid, ExportError> {
    let mut solid = Solid::new();
    let mut pending: Vec<u32> = Vec::with_capacity(3);

    for (number, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("vertex") => {
                let coords: Vec<f64> = tokens
                    .map(str::parse::<f64>)
                    .collect::<Result<_, _>>()
                    .map_err(|e| ExportError::Parse {
                        line: number + 1,
                        message: e.to_string(),
                    })?;
                let [x, y, z] = coords[..] else {
                    return Err(ExportError::Parse {
                        line: number + 1,
                        message: format!("expected 3 coordinates, found {}", coords.len()),
                    });
                };
                pending.push(solid.add_vertex(DVec3::new(x, y, z)));
            }
            Some("endloop") => {
                let [a, b, c] = pending[..] else {
                    return Err(ExportError::Parse {
                        line: number + 1,
                        message: format!("facet has {} vertices", pending.len()),
                    });
                };
                solid.add_face(a, b, c);
                pending.clear();
            }
            _ => {}
        }
    }
    solid.check_buffers()?;
    Ok(solid)
}
