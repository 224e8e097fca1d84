#![warn(missing_docs)]

//! Compile orthogonal Tiled maps into textured 3D mesh batches for Macroquad.
//!
//! Every tile becomes a two-triangle card lying in the X/Z plane. Cards are
//! grouped into one [`MeshBatch`] per (layer, atlas image) pair, and
//! layers and tiles are nudged apart along Y so nothing z-fights.
//!
//! [`load_file`] does all the file work (map, external tilesets, images);
//! [`compile`] is the pure core for callers that bring their own images.

mod config;
mod error;
mod gid;
mod map;
mod object;
mod properties;
mod loader {
    pub mod files;
    pub mod json_loader;
}
mod mesh {
    pub mod atlas;
    pub mod batch;
    pub mod compile;
    pub mod flip;
    pub mod quad;
}
mod render {
    pub mod material;
    pub mod upload;
}

pub use config::Config;
pub use error::MapError;
pub use gid::{DecodedGid, FlipFlags, Gid, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
pub use loader::files::{decode_atlas, load_atlas_images, load_file};
pub use loader::json_loader::{
    decode_map_file, decode_map_str, decode_tileset_str, resolve_external_tilesets,
};
pub use map::{Layer, Map, Orientation, TileCoord, Tileset, TilesetImage};
pub use mesh::atlas::{grid_size, tile_rect, uv_rect, Inset, PixelRect, UvRect};
pub use mesh::batch::{AlphaMode, AtlasTexture, FaceCulling, MeshBatch, RenderState, VertexBuffer};
pub use mesh::compile::{compile, AtlasImages, Compiler, LayerBatches, LayerMeshes};
pub use mesh::flip::{FlipPrimitives, FlipTable};
pub use mesh::quad::{emit_quad, QUAD_VERTICES};
pub use object::{parse_hex_color, parse_points, Object, ObjectGroup, ObjectShape, DEFAULT_GROUP_COLOR};
pub use properties::{Properties, PropertyValue};
pub use render::material::{tile_material, FRAGMENT_SHADER, VERTEX_SHADER};
pub use render::upload::{batch_meshes, MapRenderer, MAX_MESH_VERTICES};
