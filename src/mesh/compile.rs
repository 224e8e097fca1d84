use super::atlas::{self, Inset};
use super::batch::{AtlasTexture, MeshBatch};
use super::flip::FlipTable;
use super::quad::emit_quad;
use crate::config::Config;
use crate::map::{Layer, Map, TileCoord};
use image::RgbaImage;
use macroquad::math::{dvec3, DMat4};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Decoded atlas images keyed by file name (no directories).
pub type AtlasImages = HashMap<String, Arc<RgbaImage>>;

/// Batches of one layer, keyed by atlas file name.
pub type LayerMeshes = HashMap<String, MeshBatch>;

/// Compiled map: layer name -> atlas file name -> batch.
pub type LayerBatches = HashMap<String, LayerMeshes>;

/// Turns maps into mesh batches. Holds nothing but immutable settings, so
/// one compiler can be reused for any number of maps.
#[derive(Debug, Clone)]
pub struct Compiler {
    config: Config,
    flips: FlipTable,
}

impl Compiler {
    /// Compiler with the given offsets and inset mode.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            flips: FlipTable::new(),
        }
    }

    /// Settings this compiler was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn inset(&self) -> Inset {
        if self.config.legacy_vertical_inset {
            Inset::TexelLegacy
        } else {
            Inset::Texel
        }
    }

    /// Builds one batch per (layer, atlas) pair.
    ///
    /// Tiles whose atlas is missing from `images` are left out. Later layers
    /// sit `layer_offset` below earlier ones; within a layer every placed
    /// tile sits `tile_offset` below the one placed before it.
    pub fn compile(&self, map: &Map, images: &AtlasImages) -> LayerBatches {
        let mut layers = LayerBatches::with_capacity(map.layers.len());
        let mut layer_offset = 0.0f64;

        for layer in &map.layers {
            let batches = self.compile_layer(map, layer, layer_offset, images);
            debug!(
                layer = %layer.name,
                batches = batches.len(),
                tiles = batches.values().map(MeshBatch::tile_count).sum::<usize>(),
                "compiled layer"
            );
            if layers.insert(layer.name.clone(), batches).is_some() {
                warn!(layer = %layer.name, "duplicate layer name, earlier layer replaced");
            }
            layer_offset -= self.config.layer_offset;
        }

        layers
    }

    fn compile_layer(
        &self,
        map: &Map,
        layer: &Layer,
        layer_offset: f64,
        images: &AtlasImages,
    ) -> LayerMeshes {
        let mut batches = LayerMeshes::new();
        let mut tile_offset = 0.0f64;
        let tile_w = map.tile_width as f64;
        let tile_h = map.tile_height as f64;

        // Column-major; the tile offset depends on this order.
        for x in 0..map.width {
            for y in 0..map.height {
                let Some(gid) = layer.tiles.get(&TileCoord::new(x, y)) else {
                    continue;
                };
                let tile = gid.decode();
                if tile.base == 0 {
                    continue;
                }

                let Some(tileset) = map.find_tileset(tile.base) else {
                    warn!(layer = %layer.name, x, y, gid = tile.base, "no tileset owns gid");
                    continue;
                };
                let Some(image_ref) = tileset.image.as_ref() else {
                    trace!(layer = %layer.name, x, y, "tileset has no image");
                    continue;
                };
                let name = image_ref.file_name();
                let Some(atlas) = images.get(name) else {
                    trace!(layer = %layer.name, x, y, atlas = name, "atlas not supplied, tile omitted");
                    continue;
                };

                let (atlas_w, atlas_h) = atlas.dimensions();
                let local = tile.base - tileset.first_gid;
                let Some(rect) = atlas::tile_rect(tileset, atlas_w, atlas_h, local) else {
                    warn!(
                        layer = %layer.name, x, y, atlas = name, index = local,
                        "tile index outside atlas, tile omitted"
                    );
                    continue;
                };
                let uv = atlas::uv_rect(rect, atlas_w, atlas_h, self.inset());

                let batch = batches
                    .entry(name.to_owned())
                    .or_insert_with(|| MeshBatch::new(AtlasTexture::new(name, Arc::clone(atlas))));

                let half_w = tileset.tile_width as f64 / 2.0;
                let half_h = tileset.tile_height as f64 / 2.0;
                let card = emit_quad(&mut batch.vertices, half_w as f32, half_h as f32, 0.0, uv);

                let orientation = self.flips.orientation(tile.flips);
                let translation = DMat4::from_translation(dvec3(
                    x as f64 * tile_w + half_w,
                    layer_offset + tile_offset,
                    (map.height - y) as f64 * tile_h - half_h,
                ));
                tile_offset -= self.config.tile_offset;

                batch.vertices.transform(card, &(translation * *orientation));
            }
        }

        batches
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Compiles `map` with `config` (or the default offsets) against `images`.
///
/// Pure: no file access. See [`Compiler::compile`].
pub fn compile(map: &Map, config: Option<&Config>, images: &AtlasImages) -> LayerBatches {
    Compiler::new(config.copied().unwrap_or_default()).compile(map, images)
}
