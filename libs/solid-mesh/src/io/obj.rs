//! # Wavefront OBJ Codec
//!
//! Vertices and triangular faces only (`v` and `f` records, 1-based).

use super::ExportError;
use crate::solid::Solid;
use glam::DVec3;
use std::fmt::Write as _;

/// Encodes a solid as OBJ text.
pub fn to_obj(solid: &Solid, name: &str) -> String {
    let mut out = String::with_capacity(32 + solid.vertex_count() * 48 + solid.face_count() * 24);
    // Writing to a String cannot fail
    let _ = writeln!(out, "o {name}");
    for v in solid.vertices() {
        let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
    }
    for [a, b, c] in solid.faces() {
        let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
    }
    out
}

/// Parses the vertex index of an `f` token (`7`, `7/1`, `7//3`, or negative).
fn face_index(token: &str, vertex_count: usize, line: usize) -> Result<u32, ExportError> {
    let raw = token.split('/').next().unwrap_or(token);
    let value: i64 = raw.parse().map_err(|_| ExportError::Parse {
        line,
        message: format!("bad face index '{token}'"),
    })?;
    let index = if value < 0 {
        vertex_count as i64 + value
    } else {
        value - 1
    };
    if index < 0 || index as usize >= vertex_count {
        return Err(ExportError::Parse {
            line,
            message: format!("face index {value} out of range"),
        });
    }
    Ok(index as u32)
}

/// Decodes OBJ text; polygons with more than three corners are fanned.
pub fn from_obj(text: &str) -> Result<Solid, ExportError> {
    let mut solid = Solid::new();
    for (number, line) in text.lines().enumerate() {
        let line_no = number + 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let coords: Vec<f64> = tokens
                    .take(3)
                    .map(str::parse::<f64>)
                    .collect::<Result<_, _>>()
                    .map_err(|e| ExportError::Parse {
                        line: line_no,
                        message: e.to_string(),
                    })?;
                let [x, y, z] = coords[..] else {
                    return Err(ExportError::Parse {
                        line: line_no,
                        message: "vertex needs 3 coordinates".into(),
                    });
                };
                solid.add_vertex(DVec3::new(x, y, z));
            }
            Some("f") => {
                let count = solid.vertex_count();
                let corners = tokens
                    .map(|t| face_index(t, count, line_no))
                    .collect::<Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(ExportError::Parse {
                        line: line_no,
                        message: "face needs at least 3 corners".into(),
                    });
                }
                for i in 1..corners.len() - 1 {
                    solid.add_face(corners[0], corners[i], corners[i + 1]);
                }
            }
            _ => {}
        }
    }
    solid.check_buffers()?;
    Ok(solid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cylinder;

    #[test]
    fn test_obj_round_trip_is_exact() {
        let cylinder = create_cylinder(1.5, 2.0, 12).unwrap();
        let back = from_obj(&to_obj(&cylinder, "cyl")).unwrap();
        assert_eq!(back, cylinder);
    }

    #[test]
    fn test_obj_quads_and_slashes() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1/1 2/2 3/3 4/4\nf -4//1 -2//1 -1//1\n";
        let solid = from_obj(text).unwrap();
        assert_eq!(solid.face_count(), 3);
        assert_eq!(solid.faces()[2], [0, 2, 3]);
    }

    #[test]
    fn test_obj_index_out_of_range() {
        let text = "v 0 0 0\nf 1 2 3\n";
        assert!(matches!(from_obj(text), Err(ExportError::Parse { line: 2, .. })));
    }
}
