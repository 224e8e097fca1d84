use crate::error::MapError;
use crate::mesh::batch::{AlphaMode, FaceCulling, RenderState};
use macroquad::material::{load_material, Material, MaterialParams};
use macroquad::miniquad::{
    Comparison, CullFace, PipelineParams, ShaderSource, UniformDesc, UniformType,
};

/// Vertex stage of [`tile_material`].
pub const VERTEX_SHADER: &str = r#"#version 100
attribute vec3 position;
attribute vec2 texcoord;

varying lowp vec2 uv;

uniform mat4 Model;
uniform mat4 Projection;

void main() {
    gl_Position = Projection * Model * vec4(position, 1.0);
    uv = texcoord;
}
"#;

/// Fragment stage of [`tile_material`]; discards texels under `AlphaCutoff`.
pub const FRAGMENT_SHADER: &str = r#"#version 100
varying lowp vec2 uv;

uniform sampler2D Texture;
uniform lowp float AlphaCutoff;

void main() {
    lowp vec4 color = texture2D(Texture, uv);
    if (color.a < AlphaCutoff) {
        discard;
    }
    gl_FragColor = color;
}
"#;

pub(crate) fn cull_face(state: &RenderState) -> CullFace {
    match state.face_culling {
        FaceCulling::Disabled => CullFace::Nothing,
        FaceCulling::Back => CullFace::Back,
        FaceCulling::Front => CullFace::Front,
    }
}

/// Alpha cutoff uploaded to the shader; 0 keeps every fragment.
pub(crate) fn alpha_cutoff(state: &RenderState) -> f32 {
    match state.alpha {
        AlphaMode::Test { cutoff } => cutoff,
        AlphaMode::Opaque | AlphaMode::Blend => 0.0,
    }
}

/// Builds the depth-tested, alpha-tested material batches are drawn with.
///
/// Needs a live macroquad context.
pub fn tile_material(state: &RenderState) -> Result<Material, MapError> {
    let material = load_material(
        ShaderSource::Glsl {
            vertex: VERTEX_SHADER,
            fragment: FRAGMENT_SHADER,
        },
        MaterialParams {
            pipeline_params: PipelineParams {
                cull_face: cull_face(state),
                depth_test: Comparison::LessOrEqual,
                depth_write: true,
                ..Default::default()
            },
            uniforms: vec![UniformDesc::new("AlphaCutoff", UniformType::Float1)],
            ..Default::default()
        },
    )
    .map_err(|e| MapError::Render(format!("tile material: {e:?}")))?;

    material.set_uniform("AlphaCutoff", alpha_cutoff(state));
    Ok(material)
}
