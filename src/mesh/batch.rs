use image::RgbaImage;
use macroquad::math::{DMat4, Vec2, Vec3};
use macroquad::prelude::FilterMode;
use std::ops::Range;
use std::sync::Arc;

/// Which faces the consumer should cull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceCulling {
    /// Draw both sides.
    Disabled,
    /// Cull back faces.
    Back,
    /// Cull front faces.
    Front,
}

/// How the consumer should treat texture alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlphaMode {
    /// Ignore alpha.
    Opaque,
    /// Blend with what is already drawn.
    Blend,
    /// Discard fragments whose alpha is below `cutoff`.
    Test {
        /// Alpha threshold, 0 to 1.
        cutoff: f32,
    },
}

/// Fixed-function state a batch expects from its renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Face culling mode.
    pub face_culling: FaceCulling,
    /// Alpha handling.
    pub alpha: AlphaMode,
}

impl RenderState {
    /// Alpha below which tile texels are discarded.
    pub const ALPHA_CUTOFF: f32 = 0.5;

    /// Flipped tiles face away from the camera, so culling must be off.
    pub fn tile_cards() -> Self {
        Self {
            face_culling: FaceCulling::Disabled,
            alpha: AlphaMode::Test { cutoff: Self::ALPHA_CUTOFF },
        }
    }
}

/// The atlas a batch samples from.
#[derive(Debug, Clone)]
pub struct AtlasTexture {
    /// Atlas file name, also the batch key.
    pub name: String,
    /// Decoded RGBA8 pixels, shared by every batch of this atlas.
    pub image: Arc<RgbaImage>,
    /// Sampling filter for the uploaded texture.
    pub filter: FilterMode,
}

impl AtlasTexture {
    /// Linearly filtered atlas.
    pub fn new(name: impl Into<String>, image: Arc<RgbaImage>) -> Self {
        Self {
            name: name.into(),
            image,
            filter: FilterMode::Linear,
        }
    }
}

/// Non-indexed triangle list: every 3 vertices form a triangle and
/// `uvs[i]` belongs to `positions[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffer {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Texture coordinates, one per position.
    pub uvs: Vec<Vec2>,
}

impl VertexBuffer {
    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no vertex was pushed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Appends one vertex.
    pub fn push(&mut self, position: Vec3, uv: Vec2) {
        self.positions.push(position);
        self.uvs.push(uv);
    }

    /// Transforms the positions in `range` in place, leaving the rest alone.
    pub fn transform(&mut self, range: Range<usize>, m: &DMat4) {
        for p in &mut self.positions[range] {
            *p = m.transform_point3(p.as_dvec3()).as_vec3();
        }
    }
}

/// Geometry for one (layer, atlas image) pair, sharing a single texture.
#[derive(Debug, Clone)]
pub struct MeshBatch {
    /// Atlas sampled by every vertex.
    pub texture: AtlasTexture,
    /// Triangle list.
    pub vertices: VertexBuffer,
    /// Render state to draw with.
    pub state: RenderState,
}

impl MeshBatch {
    /// Empty batch with the tile card state.
    pub fn new(texture: AtlasTexture) -> Self {
        Self {
            texture,
            vertices: VertexBuffer::default(),
            state: RenderState::tile_cards(),
        }
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.vertices.positions
    }

    /// Texture coordinates.
    pub fn uvs(&self) -> &[Vec2] {
        &self.vertices.uvs
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of tiles emitted into this batch.
    pub fn tile_count(&self) -> usize {
        self.vertices.len() / super::quad::QUAD_VERTICES
    }
}
