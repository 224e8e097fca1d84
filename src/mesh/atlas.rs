//! Locating a tile inside its atlas image.

use crate::map::Tileset;

/// Pixel rectangle `[min_x, max_x) x [min_y, max_y)` inside an atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge.
    pub min_x: u32,
    /// Top edge.
    pub min_y: u32,
    /// Right edge, exclusive.
    pub max_x: u32,
    /// Bottom edge, exclusive.
    pub max_y: u32,
}

impl PixelRect {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }
}

/// Normalized texture coordinates, `v` growing downward like image rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// Left.
    pub u0: f32,
    /// Top.
    pub v0: f32,
    /// Right.
    pub u1: f32,
    /// Bottom.
    pub v1: f32,
}

/// How far UVs are pulled in from the tile's pixel edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inset {
    /// Exact pixel edges.
    None,
    /// One texel per edge, measured on each edge's own axis.
    #[default]
    Texel,
    /// One texel per edge, but the vertical texel is measured with the
    /// atlas width. Older maps were tuned against this.
    TexelLegacy,
}

/// Tiles per row and per column a tileset can cut from a `w x h` atlas.
pub fn grid_size(tileset: &Tileset, atlas_w: u32, atlas_h: u32) -> (u32, u32) {
    let fit = |extent: u32, tile: u32| -> u32 {
        let step = tile as i64 + tileset.spacing as i64;
        if tile == 0 || step <= 0 {
            return 0;
        }
        let avail = extent as i64 - 2 * tileset.margin as i64 + tileset.spacing as i64;
        (avail.max(0) / step) as u32
    };
    (
        fit(atlas_w, tileset.tile_width),
        fit(atlas_h, tileset.tile_height),
    )
}

/// Pixel rectangle of local tile `index` in a `w x h` atlas.
///
/// `None` when the index lies past the last tile the atlas holds; tiles are
/// never wrapped around to a different cell.
pub fn tile_rect(tileset: &Tileset, atlas_w: u32, atlas_h: u32, index: u32) -> Option<PixelRect> {
    let (columns, rows) = grid_size(tileset, atlas_w, atlas_h);
    if columns == 0 || rows == 0 || index as u64 >= columns as u64 * rows as u64 {
        return None;
    }
    let col = (index % columns) as u64;
    let row = (index / columns) as u64;
    let step_x = tileset.tile_width as u64 + tileset.spacing as u64;
    let step_y = tileset.tile_height as u64 + tileset.spacing as u64;
    let min_x = tileset.margin as u64 + col * step_x;
    let min_y = tileset.margin as u64 + row * step_y;
    // Edges must stay addressable as u32 pixels.
    Some(PixelRect {
        min_x: u32::try_from(min_x).ok()?,
        min_y: u32::try_from(min_y).ok()?,
        max_x: u32::try_from(min_x + tileset.tile_width as u64).ok()?,
        max_y: u32::try_from(min_y + tileset.tile_height as u64).ok()?,
    })
}

/// Converts a pixel rectangle to UVs, optionally inset to stop linear
/// filtering from pulling in the neighbouring atlas cell.
pub fn uv_rect(rect: PixelRect, atlas_w: u32, atlas_h: u32, inset: Inset) -> UvRect {
    let w = atlas_w as f32;
    let h = atlas_h as f32;
    let (dx, dy) = match inset {
        Inset::None => (0.0, 0.0),
        Inset::Texel => (1.0 / w, 1.0 / h),
        Inset::TexelLegacy => (1.0 / w, 1.0 / w),
    };
    UvRect {
        u0: rect.min_x as f32 / w + dx,
        u1: rect.max_x as f32 / w - dx,
        v0: rect.min_y as f32 / h + dy,
        v1: rect.max_y as f32 / h - dy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tileset(tile: u32, margin: u32, spacing: u32) -> Tileset {
        let mut ts = Tileset::new(1, tile, tile, "atlas.png");
        ts.margin = margin;
        ts.spacing = spacing;
        ts
    }

    #[test]
    fn plain_grid_is_row_major() {
        let ts = tileset(32, 0, 0);
        assert_eq!(grid_size(&ts, 64, 32), (2, 1));
        assert_eq!(
            tile_rect(&ts, 64, 32, 1),
            Some(PixelRect { min_x: 32, min_y: 0, max_x: 64, max_y: 32 })
        );
    }

    #[test]
    fn margin_and_spacing_shift_the_origin() {
        // 1 + 16 + 2 + 16 + 1
        let ts = tileset(16, 1, 2);
        assert_eq!(grid_size(&ts, 36, 36), (2, 2));
        let r = tile_rect(&ts, 36, 36, 3).expect("last tile");
        assert_eq!(r, PixelRect { min_x: 19, min_y: 19, max_x: 35, max_y: 35 });
        assert_eq!((r.width(), r.height()), (16, 16));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let ts = tileset(16, 1, 2);
        assert!(tile_rect(&ts, 36, 36, 4).is_none());
        assert!(tile_rect(&ts, 8, 8, 0).is_none());
        assert!(tile_rect(&tileset(0, 0, 0), 64, 64, 0).is_none());
    }

    #[test]
    fn huge_spacing_keeps_only_the_first_tile() {
        let ts = tileset(16, 0, u32::MAX - 5);
        assert_eq!(grid_size(&ts, 64, 64), (1, 1));
        assert_eq!(
            tile_rect(&ts, 64, 64, 0),
            Some(PixelRect { min_x: 0, min_y: 0, max_x: 16, max_y: 16 })
        );
        assert!(tile_rect(&ts, 64, 64, 1).is_none());
    }

    #[test]
    fn full_width_tile_edges_fit_in_u32() {
        let mut ts = tileset(16, 0, 0);
        ts.tile_width = u32::MAX;
        ts.tile_height = u32::MAX;
        let r = tile_rect(&ts, u32::MAX, u32::MAX, 0).expect("single tile");
        assert_eq!((r.max_x, r.max_y), (u32::MAX, u32::MAX));
    }

    #[test]
    fn margin_wider_than_atlas_yields_no_tiles() {
        let ts = tileset(16, 40, 0);
        assert_eq!(grid_size(&ts, 64, 64), (0, 0));
    }

    #[test]
    fn texel_inset_moves_each_edge_by_one_texel() {
        let ts = tileset(16, 0, 0);
        let (w, h) = (64, 32);
        for index in 0..8 {
            let rect = tile_rect(&ts, w, h, index).expect("in range");
            let naive = uv_rect(rect, w, h, Inset::None);
            let inset = uv_rect(rect, w, h, Inset::Texel);

            let tx = 1.0 / w as f32;
            let ty = 1.0 / h as f32;
            assert!((inset.u0 - (naive.u0 + tx)).abs() < 1e-6);
            assert!((inset.u1 - (naive.u1 - tx)).abs() < 1e-6);
            assert!((inset.v0 - (naive.v0 + ty)).abs() < 1e-6);
            assert!((inset.v1 - (naive.v1 - ty)).abs() < 1e-6);

            for c in [inset.u0, inset.u1, inset.v0, inset.v1] {
                assert!(c > 0.0 && c < 1.0, "uv {c} outside the unit square");
            }
            assert!(inset.u0 < inset.u1 && inset.v0 < inset.v1);
        }
    }

    #[test]
    fn legacy_inset_uses_width_for_both_axes() {
        let ts = tileset(16, 0, 0);
        let rect = tile_rect(&ts, 64, 32, 0).expect("in range");
        let uv = uv_rect(rect, 64, 32, Inset::TexelLegacy);
        assert!((uv.v0 - 1.0 / 64.0).abs() < 1e-6);
        assert!((uv.v1 - (0.5 - 1.0 / 64.0)).abs() < 1e-6);
    }
}
