use super::material::tile_material;
use crate::error::MapError;
use crate::map::Map;
use crate::mesh::batch::{MeshBatch, RenderState};
use crate::mesh::compile::LayerBatches;
use crate::mesh::quad::QUAD_VERTICES;
use macroquad::color::WHITE;
use macroquad::material::{gl_use_default_material, gl_use_material, Material};
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::texture::Texture2D;
use std::collections::HashMap;
use tracing::debug;

/// Largest vertex count per [`Mesh`] that keeps whole quads and fits `u16` indices.
pub const MAX_MESH_VERTICES: usize = (u16::MAX as usize + 1) / QUAD_VERTICES * QUAD_VERTICES;

/// Splits a batch into macroquad meshes sharing `texture`.
pub fn batch_meshes(batch: &MeshBatch, texture: Option<Texture2D>) -> Vec<Mesh> {
    let positions = batch.positions().chunks(MAX_MESH_VERTICES);
    let uvs = batch.uvs().chunks(MAX_MESH_VERTICES);
    positions
        .zip(uvs)
        .map(|(ps, ts)| Mesh {
            vertices: ps
                .iter()
                .zip(ts)
                .map(|(p, t)| Vertex::new(p.x, p.y, p.z, t.x, t.y, WHITE))
                .collect(),
            indices: (0..ps.len() as u16).collect(),
            texture: texture.clone(),
        })
        .collect()
}

fn upload_texture(batch: &MeshBatch) -> Result<Texture2D, MapError> {
    let image = &batch.texture.image;
    let (w, h) = image.dimensions();
    let (Ok(w), Ok(h)) = (u16::try_from(w), u16::try_from(h)) else {
        return Err(MapError::Render(format!(
            "atlas {} is {}x{}, larger than a texture can hold",
            batch.texture.name, w, h
        )));
    };
    let texture = Texture2D::from_rgba8(w, h, image.as_raw());
    texture.set_filter(batch.texture.filter);
    Ok(texture)
}

struct RenderLayer {
    visible: bool,
    meshes: Vec<Mesh>,
}

/// GPU-side copy of a compiled map.
pub struct MapRenderer {
    layers: Vec<RenderLayer>,
    material: Material,
}

impl MapRenderer {
    /// Uploads every batch; each atlas becomes one texture shared by all
    /// layers. Needs a live macroquad context.
    pub fn new(map: &Map, batches: &LayerBatches) -> Result<Self, MapError> {
        let mut textures: HashMap<&str, Texture2D> = HashMap::new();
        let mut layers = Vec::with_capacity(map.layers.len());

        for layer in &map.layers {
            let Some(layer_batches) = batches.get(&layer.name) else {
                continue;
            };
            let mut names: Vec<&String> = layer_batches.keys().collect();
            names.sort();

            let mut meshes = Vec::new();
            for name in names {
                let batch = &layer_batches[name];
                let texture = match textures.get(name.as_str()) {
                    Some(t) => t.clone(),
                    None => {
                        let t = upload_texture(batch)?;
                        textures.insert(name.as_str(), t.clone());
                        t
                    }
                };
                meshes.extend(batch_meshes(batch, Some(texture)));
            }
            debug!(layer = %layer.name, meshes = meshes.len(), "uploaded layer");
            layers.push(RenderLayer {
                visible: layer.visible,
                meshes,
            });
        }

        let state = batches
            .values()
            .flat_map(|l| l.values())
            .map(|b| b.state)
            .next()
            .unwrap_or_else(RenderState::tile_cards);

        Ok(Self {
            layers,
            material: tile_material(&state)?,
        })
    }

    /// Draws visible layers in map order with the current camera.
    pub fn draw(&self) {
        gl_use_material(&self.material);
        for layer in self.layers.iter().filter(|l| l.visible) {
            for mesh in &layer.meshes {
                draw_mesh(mesh);
            }
        }
        gl_use_default_material();
    }
}
