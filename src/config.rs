use serde::Deserialize;

/// Vertical offsets used to keep tiles and layers from z-fighting.
///
/// Both offsets are applied along the up (Y) axis and are subtracted, so
/// later layers and later tiles sit slightly lower than earlier ones. The
/// defaults are small enough to be invisible and large enough to stay
/// distinct in a 24-bit depth buffer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Distance between two consecutive layers.
    pub layer_offset: f64,
    /// Distance between two consecutive tiles of the same layer.
    pub tile_offset: f64,
    /// Compute the vertical UV inset from the atlas width instead of its
    /// height, matching maps authored against the older renderer.
    pub legacy_vertical_inset: bool,
}

impl Config {
    /// Default offset between layers.
    pub const DEFAULT_LAYER_OFFSET: f64 = 0.001;
    /// Default offset between tiles of one layer.
    pub const DEFAULT_TILE_OFFSET: f64 = 0.000001;

    /// Parses a config from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layer_offset: Self::DEFAULT_LAYER_OFFSET,
            tile_offset: Self::DEFAULT_TILE_OFFSET,
            legacy_vertical_inset: false,
        }
    }
}
