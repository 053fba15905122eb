//! # PLY Codec
//!
//! ASCII PLY with vertex positions and polygon lists. Binary PLY is not
//! read.

use super::ExportError;
use crate::solid::Solid;
use glam::DVec3;
use std::fmt::Write as _;

/// Encodes a solid as ASCII PLY.
pub fn to_ply(solid: &Solid) -> String {
    let mut out = String::with_capacity(256 + solid.vertex_count() * 48 + solid.face_count() * 24);
    // Writing to a String cannot fail
    let _ = writeln!(out, "ply");
    let _ = writeln!(out, "format ascii 1.0");
    let _ = writeln!(out, "comment solid-mesh");
    let _ = writeln!(out, "element vertex {}", solid.vertex_count());
    let _ = writeln!(out, "property double x");
    let _ = writeln!(out, "property double y");
    let _ = writeln!(out, "property double z");
    let _ = writeln!(out, "element face {}", solid.face_count());
    let _ = writeln!(out, "property list uchar uint vertex_indices");
    let _ = writeln!(out, "end_header");
    for v in solid.vertices() {
        let _ = writeln!(out, "{} {} {}", v.x, v.y, v.z);
    }
    for [a, b, c] in solid.faces() {
        let _ = writeln!(out, "3 {a} {b} {c}");
    }
    out
}

fn parse_error(line: usize, message: impl Into<String>) -> ExportError {
    ExportError::Parse {
        line,
        message: message.into(),
    }
}

/// Header fields needed to read the body.
#[derive(Debug, Default)]
struct PlyHeader {
    vertex_count: usize,
    face_count: usize,
    /// Column of x, y and z among the vertex properties
    xyz: [Option<usize>; 3],
    vertex_properties: usize,
}

/// Decodes ASCII PLY text; polygons with more than three corners are fanned.
///
/// Vertex properties other than `x`, `y` and `z` are skipped.
pub fn from_ply(text: &str) -> Result<Solid, ExportError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    match lines.next() {
        Some((_, "ply")) => {}
        _ => return Err(parse_error(1, "missing 'ply' magic")),
    }

    let mut header = PlyHeader::default();
    let mut current = "";
    loop {
        let Some((line_no, line)) = lines.next() else {
            return Err(parse_error(0, "missing end_header"));
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["end_header"] => break,
            ["format", "ascii", _] => {}
            ["format", other, ..] => {
                return Err(parse_error(line_no, format!("unsupported PLY format '{other}'")));
            }
            ["comment", ..] | ["obj_info", ..] | [] => {}
            ["element", name, count] => {
                let count = count
                    .parse::<usize>()
                    .map_err(|e| parse_error(line_no, e.to_string()))?;
                current = match *name {
                    "vertex" => {
                        header.vertex_count = count;
                        "vertex"
                    }
                    "face" => {
                        header.face_count = count;
                        "face"
                    }
                    _ if count == 0 => "",
                    other => {
                        return Err(parse_error(line_no, format!("unsupported element '{other}'")));
                    }
                };
            }
            ["property", "list", ..] => {}
            ["property", _, name] if current == "vertex" => {
                let column = header.vertex_properties;
                match *name {
                    "x" => header.xyz[0] = Some(column),
                    "y" => header.xyz[1] = Some(column),
                    "z" => header.xyz[2] = Some(column),
                    _ => {}
                }
                header.vertex_properties += 1;
            }
            ["property", ..] => {}
            _ => return Err(parse_error(line_no, format!("unexpected header line '{line}'"))),
        }
    }

    let [Some(cx), Some(cy), Some(cz)] = header.xyz else {
        return Err(parse_error(0, "vertex element needs x, y and z"));
    };

    let mut solid = Solid::with_capacity(header.vertex_count, header.face_count);
    for _ in 0..header.vertex_count {
        let Some((line_no, line)) = lines.next() else {
            return Err(parse_error(0, "file ends inside the vertex list"));
        };
        let values = line
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| parse_error(line_no, e.to_string()))?;
        if values.len() < header.vertex_properties {
            return Err(parse_error(line_no, "vertex has too few properties"));
        }
        solid.add_vertex(DVec3::new(values[cx], values[cy], values[cz]));
    }

    for _ in 0..header.face_count {
        let Some((line_no, line)) = lines.next() else {
            return Err(parse_error(0, "file ends inside the face list"));
        };
        let values = line
            .split_whitespace()
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| parse_error(line_no, e.to_string()))?;
        let Some((&count, corners)) = values.split_first() else {
            return Err(parse_error(line_no, "empty face"));
        };
        if count < 3 || corners.len() != count as usize {
            return Err(parse_error(line_no, format!("face declares {count} corners")));
        }
        for i in 1..corners.len() - 1 {
            solid.add_face(corners[0], corners[i], corners[i + 1]);
        }
    }

    solid.check_buffers()?;
    Ok(solid)
}
