use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors produced while reading a map and its dependencies from disk.
///
/// Compiling an already loaded [`Map`](crate::Map) never fails; these only
/// come out of the file-loading path and the renderer upload.
#[derive(Debug)]
pub enum MapError {
    /// A map, tileset or image file could not be read.
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A map or tileset file is not valid Tiled JSON.
    Json {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// An atlas image could not be decoded.
    Image {
        /// File that failed.
        path: PathBuf,
        /// Underlying decode error.
        source: image::ImageError,
    },
    /// The map is structurally valid JSON but cannot be used.
    InvalidMap(String),
    /// Only orthogonal maps are supported.
    UnsupportedOrientation(String),
    /// A custom property declared a type this crate does not know.
    UnsupportedPropertyType {
        /// Property name.
        name: String,
        /// Declared Tiled type.
        kind: String,
    },
    /// A tile layer references a GID no tileset covers.
    InvalidTileGid {
        /// Layer holding the GID.
        layer: String,
        /// GID with the flip flags removed.
        gid: u32,
        /// Highest GID covered by the map's tilesets.
        max_gid: u32,
    },
    /// The renderer could not build a GPU resource.
    Render(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            MapError::Json { path, source } => {
                write!(f, "JSON parse error in {}: {}", path.display(), source)
            }
            MapError::Image { path, source } => {
                write!(f, "Failed to decode image {}: {}", path.display(), source)
            }
            MapError::InvalidMap(msg) => write!(f, "Invalid map: {}", msg),
            MapError::UnsupportedOrientation(o) => {
                write!(f, "Unsupported map orientation '{}': only orthogonal maps can be compiled", o)
            }
            MapError::UnsupportedPropertyType { name, kind } => {
                write!(f, "Property '{}' has unsupported type '{}'", name, kind)
            }
            MapError::InvalidTileGid { layer, gid, max_gid } => write!(
                f,
                "Layer '{}' references GID {} but tilesets only cover GIDs up to {}",
                layer, gid, max_gid
            ),
            MapError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            MapError::Json { source, .. } => Some(source),
            MapError::Image { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_error_keeps_path_and_source() {
        let err = MapError::Io {
            path: PathBuf::from("maps/level.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("maps/level.json"));
        assert!(msg.contains("gone"));
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_map_has_no_source() {
        let err = MapError::InvalidMap("infinite maps".into());
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Invalid map: infinite maps");
    }
}
