// src/loader/json_loader.rs
use crate::error::MapError;
use crate::map::{Layer, Map, Orientation, Tileset, TilesetImage};
use crate::object::{parse_hex_color, parse_points, Object, ObjectGroup, ObjectShape, DEFAULT_GROUP_COLOR};
use crate::properties::{Properties, PropertyValue};
use macroquad::math::{vec2, Vec2};
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize)]
struct JsonMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    orientation: Option<String>,
    #[serde(default)]
    infinite: bool,
    #[serde(default)]
    layers: Vec<JsonLayer>,
    #[serde(default)]
    tilesets: Vec<JsonTileset>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" when absent
    #[serde(default)]
    data: Option<JsonLayerData>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default = "one")]
    opacity: f32,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
    #[serde(default)]
    objects: Vec<JsonObject>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonLayerData {
    Gids(Vec<u32>),
    Encoded(IgnoredAny),
}

fn default_true() -> bool {
    true
}
fn one() -> f32 {
    1.0
}

/// Either an inline tileset, a `{firstgid, source}` reference, or the body of
/// an external tileset file (which has no `firstgid`).
#[derive(Deserialize)]
struct JsonTileset {
    #[serde(default)]
    firstgid: u32,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    tilewidth: u32,
    #[serde(default)]
    tileheight: u32,
    #[serde(default)]
    tilecount: u32,
    #[serde(default)]
    columns: u32,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    imagewidth: u32,
    #[serde(default)]
    imageheight: u32,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonProperty {
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    value: JsonValue,
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    rotation: f32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    point: bool,
    #[serde(default)]
    ellipse: bool,
    #[serde(default)]
    polygon: Option<JsonPoints>,
    #[serde(default)]
    polyline: Option<JsonPoints>,
    #[serde(default)]
    gid: Option<u32>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

/// Point lists come as `[{"x":..,"y":..}]` or packed `"x,y x,y"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPoints {
    List(Vec<JsonValue>),
    Packed(String),
}

impl JsonPoints {
    /// Points with a non-numeric coordinate are dropped.
    fn into_points(self) -> Vec<Vec2> {
        match self {
            JsonPoints::List(values) => values
                .iter()
                .filter_map(|p| {
                    let x = p.get("x")?.as_f64()?;
                    let y = p.get("y")?.as_f64()?;
                    Some(vec2(x as f32, y as f32))
                })
                .collect(),
            JsonPoints::Packed(data) => parse_points(&data),
        }
    }
}

fn json_property(prop: JsonProperty) -> Result<Option<(String, PropertyValue)>, MapError> {
    let JsonProperty { name, kind, value } = prop;

    let parsed = match kind.as_deref() {
        Some("bool") => value.as_bool().map(PropertyValue::Bool),
        Some("int") | Some("object") => value.as_i64().map(PropertyValue::I64),
        Some("float") => value.as_f64().map(|n| PropertyValue::F32(n as f32)),
        Some("string") | Some("file") | Some("color") | Some("class") => {
            value.as_str().map(|s| PropertyValue::String(s.to_owned()))
        }
        Some(other) => {
            return Err(MapError::UnsupportedPropertyType {
                name,
                kind: other.to_owned(),
            });
        }
        None => match &value {
            JsonValue::Bool(v) => Some(PropertyValue::Bool(*v)),
            JsonValue::Number(n) => n
                .as_i64()
                .map(PropertyValue::I64)
                .or_else(|| n.as_f64().map(|f| PropertyValue::F32(f as f32))),
            JsonValue::String(s) => Some(PropertyValue::String(s.clone())),
            _ => None,
        },
    };

    Ok(parsed.map(|value| (name, value)))
}

fn properties_from_json(props: Vec<JsonProperty>) -> Result<Properties, MapError> {
    let mut out = Properties::new();
    for p in props {
        if let Some((name, value)) = json_property(p)? {
            out.insert(name, value);
        }
    }
    Ok(out)
}

fn object_from_json(obj: JsonObject) -> Result<Object, MapError> {
    let shape = if let Some(gid) = obj.gid {
        ObjectShape::Tile { gid }
    } else if obj.point {
        ObjectShape::Point
    } else if obj.ellipse {
        ObjectShape::Ellipse
    } else if let Some(points) = obj.polygon {
        ObjectShape::Polygon(points.into_points())
    } else if let Some(points) = obj.polyline {
        ObjectShape::Polyline(points.into_points())
    } else {
        ObjectShape::Rectangle
    };

    let kind = if !obj.class.is_empty() { obj.class } else { obj.kind };

    Ok(Object {
        id: obj.id,
        name: obj.name,
        kind,
        x: obj.x,
        y: obj.y,
        width: obj.width,
        height: obj.height,
        rotation: obj.rotation,
        visible: obj.visible,
        shape,
        properties: properties_from_json(obj.properties)?,
    })
}

fn tileset_from_json(ts: JsonTileset, first_gid: u32) -> Result<Tileset, MapError> {
    let image = ts.image.map(|source| TilesetImage {
        source,
        width: ts.imagewidth,
        height: ts.imageheight,
    });
    Ok(Tileset {
        first_gid,
        name: ts.name,
        tile_width: ts.tilewidth,
        tile_height: ts.tileheight,
        margin: ts.margin,
        spacing: ts.spacing,
        tile_count: ts.tilecount,
        columns: ts.columns,
        image,
        source: ts.source,
        properties: properties_from_json(ts.properties)?,
    })
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| allowed.contains(&e))
}

/// Decodes a Tiled JSON map. `path` is only used for error reports.
///
/// External tilesets are kept as unresolved references (`image == None`,
/// `source == Some(..)`); see [`decode_tileset_str`].
pub fn decode_map_str(txt: &str, path: &Path) -> Result<Map, MapError> {
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let orientation = j.orientation.as_deref().unwrap_or("orthogonal");
    match Orientation::parse(orientation) {
        Some(Orientation::Orthogonal) => {}
        _ => return Err(MapError::UnsupportedOrientation(orientation.to_owned())),
    }
    if j.infinite {
        return Err(MapError::InvalidMap(format!(
            "infinite (chunked) maps are not supported: {}",
            path.display()
        )));
    }

    let mut tilesets = Vec::with_capacity(j.tilesets.len());
    for ts in j.tilesets {
        let first_gid = ts.firstgid;
        if first_gid == 0 {
            return Err(MapError::InvalidMap(format!(
                "tileset '{}' has no firstgid",
                ts.source.as_deref().unwrap_or(&ts.name)
            )));
        }
        tilesets.push(tileset_from_json(ts, first_gid)?);
    }
    tilesets.sort_by_key(|t| t.first_gid);

    let mut layers = Vec::new();
    let mut object_groups = Vec::new();
    for l in j.layers {
        let properties = properties_from_json(l.properties)?;
        match l.kind.as_deref().unwrap_or("tilelayer") {
            "tilelayer" => {
                if let Some(enc) = l.encoding.as_deref().filter(|e| *e != "csv") {
                    return Err(MapError::InvalidMap(format!(
                        "layer '{}' uses unsupported '{}' encoding",
                        l.name, enc
                    )));
                }
                let data = match l.data {
                    Some(JsonLayerData::Gids(gids)) => gids,
                    Some(JsonLayerData::Encoded(_)) => {
                        return Err(MapError::InvalidMap(format!(
                            "layer '{}' has encoded data",
                            l.name
                        )))
                    }
                    None => Vec::new(),
                };
                let width = l.width.unwrap_or(j.width);
                let mut layer = Layer::from_row_major(l.name, width, &data);
                layer.visible = l.visible;
                layer.opacity = l.opacity;
                layer.properties = properties;
                layers.push(layer);
            }
            "objectgroup" => {
                let color = l
                    .color
                    .as_deref()
                    .and_then(parse_hex_color)
                    .unwrap_or(DEFAULT_GROUP_COLOR);
                object_groups.push(ObjectGroup {
                    name: l.name,
                    color,
                    opacity: l.opacity,
                    visible: l.visible,
                    properties,
                    objects: l
                        .objects
                        .into_iter()
                        .map(object_from_json)
                        .collect::<Result<Vec<_>, _>>()?,
                });
            }
            other => debug!(layer = %l.name, kind = other, "skipping unsupported layer type"),
        }
    }

    Ok(Map {
        width: j.width,
        height: j.height,
        tile_width: j.tilewidth,
        tile_height: j.tileheight,
        orientation: Orientation::Orthogonal,
        layers,
        tilesets,
        object_groups,
        properties: properties_from_json(j.properties)?,
    })
}

/// Decodes the body of an external tileset file and assigns it `first_gid`.
pub fn decode_tileset_str(txt: &str, path: &Path, first_gid: u32) -> Result<Tileset, MapError> {
    let ts: JsonTileset = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let mut tileset = tileset_from_json(ts, first_gid)?;
    tileset.source = Some(path.to_string_lossy().into_owned());
    Ok(tileset)
}

pub(crate) fn read_file(path: &Path) -> Result<String, MapError> {
    std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and decodes a map file, returning it with the directory relative
/// paths resolve against.
pub fn decode_map_file(path: impl AsRef<Path>) -> Result<(Map, PathBuf), MapError> {
    let p = path.as_ref();
    if !has_extension(p, &["json", "tmj"]) {
        return Err(MapError::InvalidMap(format!(
            "Map file must be a JSON file: {}",
            p.display()
        )));
    }

    let txt = read_file(p)?;
    let map = decode_map_str(&txt, p)?;

    let map_dir = p
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));

    debug!(path = %p.display(), layers = map.layers.len(), tilesets = map.tilesets.len(), "decoded map");
    Ok((map, map_dir))
}

/// Reads every external tileset of `map`, relative to `map_dir`.
///
/// Image paths of resolved tilesets are rewritten relative to `map_dir`.
pub fn resolve_external_tilesets(map: &mut Map, map_dir: &Path) -> Result<(), MapError> {
    for ts in map.tilesets.iter_mut().filter(|t| t.is_unresolved()) {
        let Some(source) = ts.source.clone() else {
            continue;
        };
        let rel = Path::new(&source);
        if !has_extension(rel, &["json", "tsj"]) {
            return Err(MapError::InvalidMap(format!(
                "External tileset must be JSON: {}",
                source
            )));
        }
        let ts_path = map_dir.join(rel);
        let txt = read_file(&ts_path)?;
        let mut resolved = decode_tileset_str(&txt, &ts_path, ts.first_gid)?;

        let ts_dir = rel.parent().unwrap_or_else(|| Path::new(""));
        if let Some(image) = resolved.image.as_mut() {
            image.source = ts_dir.join(&image.source).to_string_lossy().into_owned();
        }
        resolved.source = Some(source);
        debug!(tileset = %ts_path.display(), first_gid = ts.first_gid, "resolved external tileset");
        *ts = resolved;
    }
    Ok(())
}
