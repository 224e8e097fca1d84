use crate::gid::Gid;
use crate::object::ObjectGroup;
use crate::properties::Properties;
use crate::error::MapError;
use std::collections::HashMap;
use std::path::Path;

/// Tiled map orientation. Only [`Orientation::Orthogonal`] can be compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Square grid.
    #[default]
    Orthogonal,
    /// Diamond grid.
    Isometric,
    /// Staggered isometric grid.
    Staggered,
    /// Hex grid.
    Hexagonal,
}

impl Orientation {
    /// Parses Tiled's `orientation` string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "orthogonal" => Some(Orientation::Orthogonal),
            "isometric" => Some(Orientation::Isometric),
            "staggered" => Some(Orientation::Staggered),
            "hexagonal" => Some(Orientation::Hexagonal),
            _ => None,
        }
    }
}

/// Grid cell position, in tiles. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl TileCoord {
    /// Cell at column `x`, row `y`.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// The atlas image a tileset cuts its tiles from.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesetImage {
    /// Path as written in the map or tileset file.
    pub source: String,
    /// Declared pixel width; 0 when the file did not say.
    pub width: u32,
    /// Declared pixel height; 0 when unknown.
    pub height: u32,
}

impl TilesetImage {
    /// File name used to key atlas images, `tiles/grass.png` -> `grass.png`.
    pub fn file_name(&self) -> &str {
        Path::new(&self.source)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.source)
    }
}

/// A tileset: a grid of tiles cut from one atlas image.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    /// GID of the tileset's first tile.
    pub first_gid: u32,
    /// Name from the tileset file.
    pub name: String,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    /// Pixels around the outer edge of the atlas.
    pub margin: u32,
    /// Pixels between neighbouring tiles.
    pub spacing: u32,
    /// 0 when unknown.
    pub tile_count: u32,
    /// Tiles per atlas row as declared; 0 when unknown.
    pub columns: u32,
    /// `None` until an external tileset has been resolved.
    pub image: Option<TilesetImage>,
    /// Path of the external tileset file, if the tileset is not inline.
    pub source: Option<String>,
    /// Custom properties.
    pub properties: Properties,
}

impl Tileset {
    /// An inline tileset cutting `tile_width x tile_height` tiles from `image`.
    pub fn new(first_gid: u32, tile_width: u32, tile_height: u32, image: &str) -> Self {
        Self {
            first_gid,
            name: String::new(),
            tile_width,
            tile_height,
            margin: 0,
            spacing: 0,
            tile_count: 0,
            columns: 0,
            image: Some(TilesetImage {
                source: image.to_owned(),
                width: 0,
                height: 0,
            }),
            source: None,
            properties: Properties::new(),
        }
    }

    /// External tilesets still waiting for their definition file.
    pub fn is_unresolved(&self) -> bool {
        self.source.is_some() && self.image.is_none()
    }

    /// Last GID this tileset owns, when its tile count is known.
    pub fn last_gid(&self) -> Option<u32> {
        if self.tile_count == 0 {
            return None;
        }
        Some(self.first_gid.saturating_add(self.tile_count - 1))
    }
}

/// A tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name, also the key of its compiled batches.
    pub name: String,
    /// Occupied cells only; empty cells are absent.
    pub tiles: HashMap<TileCoord, Gid>,
    /// Drawn by [`MapRenderer`](crate::MapRenderer) only when set.
    pub visible: bool,
    /// Opacity from 0 to 1.
    pub opacity: f32,
    /// Custom properties.
    pub properties: Properties,
}

impl Layer {
    /// Empty, visible layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tiles: HashMap::new(),
            visible: true,
            opacity: 1.0,
            properties: Properties::new(),
        }
    }

    /// Builds the sparse cell map from Tiled's row-major `data` array.
    pub fn from_row_major(name: impl Into<String>, width: u32, data: &[u32]) -> Self {
        let mut layer = Self::new(name);
        if width == 0 {
            return layer;
        }
        for (idx, &raw) in data.iter().enumerate() {
            let gid = Gid(raw);
            if gid.is_empty() {
                continue;
            }
            let idx = idx as u32;
            layer.tiles.insert(TileCoord::new(idx % width, idx / width), gid);
        }
        layer
    }

    /// Stores `gid` at a cell; an empty id clears it.
    pub fn set(&mut self, x: u32, y: u32, gid: impl Into<Gid>) {
        let gid = gid.into();
        if gid.is_empty() {
            self.tiles.remove(&TileCoord::new(x, y));
        } else {
            self.tiles.insert(TileCoord::new(x, y), gid);
        }
    }

    /// Id at a cell, [`Gid::EMPTY`] when unoccupied.
    pub fn get(&self, x: u32, y: u32) -> Gid {
        self.tiles.get(&TileCoord::new(x, y)).copied().unwrap_or(Gid::EMPTY)
    }
}

/// Canonical map handed to the compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Grid cell width in pixels.
    pub tile_width: u32,
    /// Grid cell height in pixels.
    pub tile_height: u32,
    /// Grid orientation.
    pub orientation: Orientation,
    /// Draw order: array order.
    pub layers: Vec<Layer>,
    /// Tilesets sorted by `first_gid`.
    pub tilesets: Vec<Tileset>,
    /// Object layers in file order.
    pub object_groups: Vec<ObjectGroup>,
    /// Custom properties.
    pub properties: Properties,
}

impl Map {
    /// Empty orthogonal map.
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            width,
            height,
            tile_width,
            tile_height,
            orientation: Orientation::Orthogonal,
            layers: Vec::new(),
            tilesets: Vec::new(),
            object_groups: Vec::new(),
            properties: Properties::new(),
        }
    }

    /// The tileset owning `base`: the greatest `first_gid` not above it.
    ///
    /// `base` must already have its flip flags removed.
    pub fn find_tileset(&self, base: u32) -> Option<&Tileset> {
        self.tilesets
            .iter()
            .filter(|ts| ts.first_gid <= base)
            .max_by_key(|ts| ts.first_gid)
    }

    /// First tile layer called `name`.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Highest GID covered by tilesets with a known tile count.
    pub fn max_gid(&self) -> u32 {
        self.tilesets.iter().filter_map(Tileset::last_gid).max().unwrap_or(0)
    }

    /// Rejects tile layers pointing past the last tileset.
    ///
    /// Skipped when any tileset has an unknown tile count, since its range
    /// cannot be bounded.
    pub fn validate_gids(&self) -> Result<(), MapError> {
        if self.tilesets.iter().any(|ts| ts.tile_count == 0) {
            return Ok(());
        }
        let max_gid = self.max_gid();
        for layer in &self.layers {
            for gid in layer.tiles.values() {
                let gid = gid.clean();
                if gid > max_gid {
                    return Err(MapError::InvalidTileGid {
                        layer: layer.name.clone(),
                        gid,
                        max_gid,
                    });
                }
            }
        }
        Ok(())
    }
}
