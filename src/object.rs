use crate::gid::Gid;
use crate::properties::Properties;
use macroquad::color::Color;
use macroquad::math::{vec2, Vec2};
use std::fmt;

/// Geometry carried by an [`Object`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectShape {
    /// Axis-aligned box of `width x height`.
    Rectangle,
    /// Ellipse inscribed in the object's box.
    Ellipse,
    /// A single position.
    Point,
    /// Closed outline, points relative to the object's position.
    Polygon(Vec<Vec2>),
    /// Open outline, points relative to the object's position.
    Polyline(Vec<Vec2>),
    /// The object is drawn with the image of this tile.
    Tile {
        /// Raw GID, flip flags included.
        gid: u32,
    },
}

/// A single object of an object group, usually collision or spawn data.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// Unique id within the map.
    pub id: u32,
    /// Object name.
    pub name: String,
    /// Tiled's `class` (or legacy `type`) string.
    pub kind: String,
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Degrees, clockwise.
    pub rotation: f32,
    /// Shown in the editor.
    pub visible: bool,
    /// Geometry.
    pub shape: ObjectShape,
    /// Custom properties.
    pub properties: Properties,
}

impl Object {
    /// Tile drawn for this object, flags included. `None` unless the shape is
    /// [`ObjectShape::Tile`].
    pub fn gid(&self) -> Option<Gid> {
        match self.shape {
            ObjectShape::Tile { gid } => Some(Gid(gid)),
            _ => None,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Object(Name={:?}, X={}, Y={}, Width={}, Height={})",
            self.name, self.x, self.y, self.width, self.height
        )
    }
}

/// A named group of objects.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectGroup {
    /// Layer name.
    pub name: String,
    /// Editor color, [`DEFAULT_GROUP_COLOR`] when absent or invalid.
    pub color: Color,
    /// Opacity from 0 to 1.
    pub opacity: f32,
    /// Shown in the editor.
    pub visible: bool,
    /// Custom properties.
    pub properties: Properties,
    /// Objects in file order.
    pub objects: Vec<Object>,
}

impl fmt::Display for ObjectGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectGroup(Name={:?}, {} objects)", self.name, self.objects.len())
    }
}

/// Tiled's default object group color.
pub const DEFAULT_GROUP_COLOR: Color = Color::new(0.627, 0.627, 0.643, 1.0);

/// Parses `#RRGGBB` or `#AARRGGBB` (the `#` is optional).
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim().trim_start_matches('#');
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Color::from_rgba(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
        _ => None,
    }
}

/// Parses a packed point list such as `"0,0 16,0 16,8"`.
///
/// Pairs that are not two numbers are skipped; the rest of the list is kept.
pub fn parse_points(data: &str) -> Vec<Vec2> {
    data.split_whitespace()
        .filter_map(|pair| {
            let (x, y) = pair.split_once(',')?;
            let x = x.trim().parse::<f32>().ok()?;
            let y = y.trim().parse::<f32>().ok()?;
            Some(vec2(x, y))
        })
        .collect()
}
