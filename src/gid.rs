/// Vertical flip flag, bit 31.
pub const FLIP_V: u32 = 0x8000_0000;
/// Horizontal flip flag, bit 30.
pub const FLIP_H: u32 = 0x4000_0000;
/// Diagonal flip flag, bit 29.
pub const FLIP_D: u32 = 0x2000_0000;
/// Bits 0-28, the base index.
pub const GID_MASK: u32 = 0x1FFF_FFFF;

/// A packed global tile id as stored in a layer: base index plus flip flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Gid(pub u32);

/// The three orientation flags carried by a [`Gid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlipFlags {
    /// Swap the x and y axes.
    pub diagonal: bool,
    /// Mirror left to right.
    pub horizontal: bool,
    /// Mirror top to bottom.
    pub vertical: bool,
}

impl FlipFlags {
    /// Index into an 8 entry table, `d << 2 | h << 1 | v`.
    #[inline]
    pub fn table_index(self) -> usize {
        (self.diagonal as usize) << 2 | (self.horizontal as usize) << 1 | self.vertical as usize
    }

    /// Inverse of [`FlipFlags::table_index`].
    pub fn from_table_index(i: usize) -> Self {
        FlipFlags {
            diagonal: i & 0b100 != 0,
            horizontal: i & 0b010 != 0,
            vertical: i & 0b001 != 0,
        }
    }
}

/// A [`Gid`] split into its base index and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedGid {
    /// Global index with the flags removed; 0 means empty.
    pub base: u32,
    /// Orientation flags.
    pub flips: FlipFlags,
}

impl Gid {
    /// The empty cell.
    pub const EMPTY: Gid = Gid(0);

    /// Stored value, flags included.
    #[inline] pub fn raw(self) -> u32 { self.0 }
    /// Base index with the flags masked off.
    #[inline] pub fn clean(self) -> u32 { self.0 & GID_MASK }
    /// Diagonal flag set.
    #[inline] pub fn flip_d(self) -> bool { (self.0 & FLIP_D) != 0 }
    /// Horizontal flag set.
    #[inline] pub fn flip_h(self) -> bool { (self.0 & FLIP_H) != 0 }
    /// Vertical flag set.
    #[inline] pub fn flip_v(self) -> bool { (self.0 & FLIP_V) != 0 }

    /// True when the cell holds no tile. Flags on a zero base still count as empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.clean() == 0
    }

    /// Splits the id into base index and flags.
    pub fn decode(self) -> DecodedGid {
        DecodedGid {
            base: self.clean(),
            flips: FlipFlags {
                diagonal: self.flip_d(),
                horizontal: self.flip_h(),
                vertical: self.flip_v(),
            },
        }
    }
}

impl From<u32> for Gid {
    fn from(raw: u32) -> Self {
        Gid(raw)
    }
}
