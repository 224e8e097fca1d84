use crate::gid::FlipFlags;
use macroquad::math::DMat4;

/// The primitive rigid transforms tile orientations are built from.
///
/// Quads lie in the X/Z plane with Y up, so the rotations turn about Y and
/// the mirrors are half turns about the in-plane axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipPrimitives {
    /// +90 degrees about Y: `(x, y, z) -> (z, y, -x)`.
    pub rot_90: DMat4,
    /// -90 degrees about Y: `(x, y, z) -> (-z, y, x)`.
    pub rot_neg_90: DMat4,
    /// Half turn about Z, mirrors X.
    pub horizontal: DMat4,
    /// Half turn about X, mirrors Z.
    pub vertical: DMat4,
}

impl FlipPrimitives {
    /// The four primitives with exact entries.
    pub fn new() -> Self {
        // Exact entries keep repeated loads bit-identical.
        #[rustfmt::skip]
        let rot_90 = DMat4::from_cols_array(&[
            0.0, 0.0, -1.0, 0.0,
            0.0, 1.0,  0.0, 0.0,
            1.0, 0.0,  0.0, 0.0,
            0.0, 0.0,  0.0, 1.0,
        ]);
        #[rustfmt::skip]
        let rot_neg_90 = DMat4::from_cols_array(&[
             0.0, 0.0, 1.0, 0.0,
             0.0, 1.0, 0.0, 0.0,
            -1.0, 0.0, 0.0, 0.0,
             0.0, 0.0, 0.0, 1.0,
        ]);
        #[rustfmt::skip]
        let horizontal = DMat4::from_cols_array(&[
            -1.0,  0.0, 0.0, 0.0,
             0.0, -1.0, 0.0, 0.0,
             0.0,  0.0, 1.0, 0.0,
             0.0,  0.0, 0.0, 1.0,
        ]);
        #[rustfmt::skip]
        let vertical = DMat4::from_cols_array(&[
            1.0,  0.0,  0.0, 0.0,
            0.0, -1.0,  0.0, 0.0,
            0.0,  0.0, -1.0, 0.0,
            0.0,  0.0,  0.0, 1.0,
        ]);
        Self { rot_90, rot_neg_90, horizontal, vertical }
    }
}

impl Default for FlipPrimitives {
    fn default() -> Self {
        Self::new()
    }
}

/// Orientation transform for each of the 8 flag combinations, indexed by
/// [`FlipFlags::table_index`].
///
/// `a * b` applies `b` first, so the primitive written last touches the raw
/// quad first.
#[derive(Debug, Clone, PartialEq)]
pub struct FlipTable {
    entries: [DMat4; 8],
}

impl FlipTable {
    /// Table built from [`FlipPrimitives::new`].
    pub fn new() -> Self {
        Self::from_primitives(&FlipPrimitives::new())
    }

    /// Composes the 8 entries from `p`.
    pub fn from_primitives(p: &FlipPrimitives) -> Self {
        let entries = [
            // d h v
            DMat4::IDENTITY,             // 0 0 0
            p.vertical,                  // 0 0 1
            p.horizontal,                // 0 1 0
            p.horizontal * p.vertical,   // 0 1 1
            p.horizontal * p.rot_90,     // 1 0 0
            p.rot_neg_90,                // 1 0 1
            p.rot_90,                    // 1 1 0
            p.rot_90 * p.horizontal,     // 1 1 1
        ];
        Self { entries }
    }

    /// Transform for `flags`, to apply before translating.
    #[inline]
    pub fn orientation(&self, flags: FlipFlags) -> &DMat4 {
        &self.entries[flags.table_index()]
    }
}

impl Default for FlipTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::{dvec3, DVec3};

    /// Where the in-plane point `(x, z)` lands for each table entry.
    fn expected(i: usize, x: f64, z: f64) -> (f64, f64) {
        match i {
            0 => (x, z),
            1 => (x, -z),
            2 => (-x, z),
            3 => (-x, -z),
            4 => (-z, -x),
            5 => (-z, x),
            6 => (z, -x),
            7 => (z, x),
            _ => unreachable!(),
        }
    }

    #[test]
    fn unit_quad_corners_follow_the_case_table() {
        let table = FlipTable::new();
        let corners = [(-0.5, 0.5), (-0.5, -0.5), (0.5, -0.5), (0.5, 0.5)];
        for i in 0..8 {
            let m = table.orientation(FlipFlags::from_table_index(i));
            for &(x, z) in &corners {
                let p = m.transform_point3(dvec3(x, 0.0, z));
                let (ex, ez) = expected(i, x, z);
                assert_eq!(p, dvec3(ex, 0.0, ez), "entry {i}, corner ({x}, {z})");
            }
        }
    }

    #[test]
    fn all_eight_orientations_are_distinct() {
        let table = FlipTable::new();
        let point = dvec3(1.0, 0.0, 2.0);
        let images: Vec<DVec3> = (0..8)
            .map(|i| table.orientation(FlipFlags::from_table_index(i)).transform_point3(point))
            .collect();
        for a in 0..8 {
            for b in (a + 1)..8 {
                assert_ne!(images[a], images[b], "entries {a} and {b} coincide");
            }
        }
    }

    #[test]
    fn applying_an_orientation_twice_is_its_square() {
        let table = FlipTable::new();
        // mirrors are involutions, quarter turns square to a half turn
        for i in [1usize, 2, 4, 7] {
            let m = *table.orientation(FlipFlags::from_table_index(i));
            let p = (m * m).transform_point3(dvec3(3.0, 0.0, -1.0));
            assert_eq!(p, dvec3(3.0, 0.0, -1.0), "entry {i}");
        }
        for i in [5usize, 6] {
            let m = *table.orientation(FlipFlags::from_table_index(i));
            let p = (m * m).transform_point3(dvec3(3.0, 0.0, -1.0));
            assert_eq!(p, dvec3(-3.0, 0.0, 1.0), "entry {i}");
        }
    }

    #[test]
    fn rotations_match_glam_axis_angle() {
        let p = FlipPrimitives::new();
        let glam_rot = DMat4::from_rotation_y(std::f64::consts::FRAC_PI_2);
        assert!(p.rot_90.abs_diff_eq(glam_rot, 1e-12));
        assert!(p.rot_neg_90.abs_diff_eq(glam_rot.inverse(), 1e-12));
    }
}
