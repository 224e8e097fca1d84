use super::json_loader::{decode_map_file, resolve_external_tilesets};
use crate::config::Config;
use crate::error::MapError;
use crate::map::Map;
use crate::mesh::compile::{compile, AtlasImages, LayerBatches};
use image::{DynamicImage, ImageError, RgbaImage};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Decodes an image and normalizes it to RGBA8.
pub fn decode_atlas(bytes: &[u8]) -> Result<RgbaImage, ImageError> {
    Ok(match image::load_from_memory(bytes)? {
        DynamicImage::ImageRgba8(rgba) => rgba,
        other => other.to_rgba8(),
    })
}

/// Reads and decodes the atlas of every tileset, keyed by image file name.
///
/// Image paths are resolved against `base_dir`. Any missing or undecodable
/// image fails the whole call.
pub fn load_atlas_images(map: &Map, base_dir: &Path) -> Result<AtlasImages, MapError> {
    let mut images = AtlasImages::new();
    for ts in &map.tilesets {
        let Some(image) = ts.image.as_ref() else {
            continue;
        };
        let name = image.file_name();
        if images.contains_key(name) {
            continue;
        }

        let path = base_dir.join(&image.source);
        let bytes = std::fs::read(&path).map_err(|source| MapError::Io {
            path: path.clone(),
            source,
        })?;
        let rgba = decode_atlas(&bytes).map_err(|source| MapError::Image {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), width = rgba.width(), height = rgba.height(), "loaded atlas");
        images.insert(name.to_owned(), Arc::new(rgba));
    }
    Ok(images)
}

/// Loads a map, its external tilesets and atlas images from disk, then
/// compiles it.
///
/// Unlike [`compile`], nothing is tolerated here: the first I/O, parse or
/// decode failure is returned and no batches are produced.
pub fn load_file(
    path: impl AsRef<Path>,
    config: Option<&Config>,
) -> Result<(Map, LayerBatches), MapError> {
    let (mut map, map_dir) = decode_map_file(path)?;
    resolve_external_tilesets(&mut map, &map_dir)?;
    map.validate_gids()?;

    let images = load_atlas_images(&map, &map_dir)?;
    let layers = compile(&map, config, &images);
    Ok((map, layers))
}
