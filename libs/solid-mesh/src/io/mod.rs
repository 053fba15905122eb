//! # Mesh I/O
//!
//! Writers for handing a finished solid to a slicer or viewer, plus STL and
//! OBJ readers used to check that an export survives a round trip.
//!
//! ## Example
//!
//! ```rust,no_run
//! use solid_mesh::io::{export, ExportFormat};
//! use solid_mesh::primitives::create_box;
//! use glam::DVec3;
//!
//! let cube = create_box(DVec3::splat(10.0)).unwrap();
//! let path = export(&cube, "out/cube", ExportFormat::Stl).unwrap();
//! assert_eq!(path.extension().unwrap(), "stl");
//! ```

pub mod obj;
pub mod ply;
pub mod stl;

use crate::error::MeshError;
use crate::solid::Solid;
use config::constants::WELD_EPSILON;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Errors raised while reading or writing mesh files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Format name that no codec handles
    #[error("Unsupported format '{format}' (expected one of: stl, stl-ascii, obj, ply)")]
    UnsupportedFormat { format: String },

    /// Malformed input file
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Decoded buffers do not form a valid solid
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Binary STL
    Stl,
    /// ASCII STL
    StlAscii,
    /// Wavefront OBJ
    Obj,
    /// ASCII PLY
    Ply,
}

impl ExportFormat {
    /// Every supported format.
    pub const ALL: [ExportFormat; 4] = [Self::Stl, Self::StlAscii, Self::Obj, Self::Ply];

    /// File extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Stl | Self::StlAscii => "stl",
            Self::Obj => "obj",
            Self::Ply => "ply",
        }
    }

    /// Encodes a solid; `name` labels the object where the format allows it.
    pub fn encode(self, solid: &Solid, name: &str) -> Vec<u8> {
        match self {
            Self::Stl => stl::to_binary(solid),
            Self::StlAscii => stl::to_ascii(solid, name).into_bytes(),
            Self::Obj => obj::to_obj(solid, name).into_bytes(),
            Self::Ply => ply::to_ply(solid).into_bytes(),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stl => "stl",
            Self::StlAscii => "stl-ascii",
            Self::Obj => "obj",
            Self::Ply => "ply",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stl" => Ok(Self::Stl),
            "stl-ascii" | "stla" => Ok(Self::StlAscii),
            "obj" => Ok(Self::Obj),
            "ply" => Ok(Self::Ply),
            other => Err(ExportError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Writes `solid` to `path` with the format's extension.
///
/// Missing parent directories are created. Returns the path written.
pub fn export(
    solid: &Solid,
    path: impl AsRef<Path>,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let path = path.as_ref().with_extension(format.extension());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("solid");
    fs::write(&path, format.encode(solid, name))?;
    info!(path = %path.display(), %format, faces = solid.face_count(), "exported");
    Ok(path)
}

/// Reads a binary or ASCII STL file and welds coincident corners.
pub fn import_stl(path: impl AsRef<Path>) -> Result<Solid, ExportError> {
    let bytes = fs::read(path)?;
    stl::from_bytes(&bytes, WELD_EPSILON)
}

/// Reads an OBJ file.
pub fn import_obj(path: impl AsRef<Path>) -> Result<Solid, ExportError> {
    let text = fs::read_to_string(path)?;
    obj::from_obj(&text)
}

/// Reads an ASCII PLY file.
pub fn import_ply(path: impl AsRef<Path>) -> Result<Solid, ExportError> {
    let text = fs::read_to_string(path)?;
    ply::from_ply(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("stl".parse::<ExportFormat>().unwrap(), ExportFormat::Stl);
        assert_eq!("STL-ASCII".parse::<ExportFormat>().unwrap(), ExportFormat::StlAscii);
        assert_eq!("obj".parse::<ExportFormat>().unwrap(), ExportFormat::Obj);
        assert_eq!("ply".parse::<ExportFormat>().unwrap(), ExportFormat::Ply);
    }

    #[test]
    fn test_format_rejects_unsupported() {
        for name in ["glb", "gltf", "step", "off", ""] {
            assert!(matches!(
                name.parse::<ExportFormat>(),
                Err(ExportError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn test_format_display_round_trip() {
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
        }
    }
}
