use super::atlas::UvRect;
use super::batch::VertexBuffer;
use macroquad::math::{vec2, vec3};
use std::ops::Range;

/// Vertices emitted per tile: two triangles, no index sharing.
pub const QUAD_VERTICES: usize = 6;

/// Appends a `2*half_w x 2*half_h` card centered on the origin, lying in the
/// X/Z plane at height `depth`, and returns the range of the new vertices.
///
/// Both triangles wind the same way; a mirror applied later turns the whole
/// card over, which is why batches are drawn without face culling.
pub fn emit_quad(
    buf: &mut VertexBuffer,
    half_w: f32,
    half_h: f32,
    depth: f32,
    uv: UvRect,
) -> Range<usize> {
    let (l, r, b, t) = (-half_w, half_w, -half_h, half_h);
    let start = buf.len();

    let corners = [
        // left triangle
        (l, t, uv.u0, uv.v0),
        (l, b, uv.u0, uv.v1),
        (r, b, uv.u1, uv.v1),
        // right triangle
        (l, t, uv.u0, uv.v0),
        (r, b, uv.u1, uv.v1),
        (r, t, uv.u1, uv.v0),
    ];
    for (x, y, u, v) in corners {
        buf.push(vec3(x, depth, y), vec2(u, v));
    }

    start..buf.len()
}
