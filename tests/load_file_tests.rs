// tests/load_file_tests.rs

use image::{Rgba, RgbaImage};
use macroquad_tiled_mesh::{load_file, Config, MapError};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("mq_tiled_mesh_{tag}_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

const MAP_JSON: &str = r#"{
  "width": 2, "height": 1, "tilewidth": 32, "tileheight": 32,
  "orientation": "orthogonal",
  "layers": [
    { "type":"tilelayer", "name":"ground", "width":2, "height":1, "data":[1,0] },
    { "type":"tilelayer", "name":"decor", "width":2, "height":1, "data":[0,2] },
    { "type":"objectgroup", "name":"spawns", "objects":[ {"id":1, "name":"start", "point":true} ] }
  ],
  "tilesets": [ {"firstgid": 1, "source": "tiles.json"} ]
}"#;

const TILESET_JSON: &str = r#"{
  "name":"tiles", "tilewidth":32, "tileheight":32, "tilecount":2, "columns":2,
  "image":"img/atlas.png", "imagewidth":64, "imageheight":32
}"#;

fn write_fixture(dir: &PathBuf) -> PathBuf {
    let map_path = dir.join("map.json");
    fs::write(&map_path, MAP_JSON).expect("write map");
    fs::write(dir.join("tiles.json"), TILESET_JSON).expect("write tileset");
    fs::create_dir_all(dir.join("img")).expect("mkdir img");
    RgbaImage::from_pixel(64, 32, Rgba([255, 0, 0, 255]))
        .save(dir.join("img/atlas.png"))
        .expect("write atlas");
    map_path
}

#[test]
fn loads_map_tilesets_and_atlas_from_disk() {
    let dir = temp_dir("ok");
    let map_path = write_fixture(&dir);

    let (map, layers) = load_file(&map_path, None).expect("load");

    assert_eq!(map.layers.len(), 2);
    assert_eq!(map.object_groups.len(), 1);
    assert_eq!(map.tilesets[0].tile_count, 2);

    assert_eq!(layers.len(), 2);
    let ground = &layers["ground"]["atlas.png"];
    assert_eq!(ground.vertex_count(), 6);
    assert_eq!(ground.texture.image.dimensions(), (64, 32));
    assert_eq!(ground.texture.image.get_pixel(0, 0).0, [255, 0, 0, 255]);

    let decor = &layers["decor"]["atlas.png"];
    assert_eq!(decor.tile_count(), 1);
    // second layer sits one layer offset lower
    assert!((decor.positions()[0].y as f64 + Config::DEFAULT_LAYER_OFFSET).abs() < 1e-9);
}

#[test]
fn custom_config_changes_layer_spacing() {
    let dir = temp_dir("config");
    let map_path = write_fixture(&dir);

    let config = Config { layer_offset: 1.0, ..Config::default() };
    let (_, layers) = load_file(&map_path, Some(&config)).expect("load");
    assert_eq!(layers["decor"]["atlas.png"].positions()[0].y, -1.0);
}

#[test]
fn missing_atlas_image_aborts_the_load() {
    let dir = temp_dir("noimg");
    let map_path = write_fixture(&dir);
    fs::remove_file(dir.join("img/atlas.png")).expect("remove atlas");

    let err = load_file(&map_path, None).expect_err("missing image");
    match err {
        MapError::Io { path, .. } => assert!(path.ends_with("img/atlas.png")),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn corrupt_atlas_image_is_a_decode_error() {
    let dir = temp_dir("badimg");
    let map_path = write_fixture(&dir);
    fs::write(dir.join("img/atlas.png"), b"not an image").expect("overwrite atlas");

    let err = load_file(&map_path, None).expect_err("bad image");
    assert!(matches!(err, MapError::Image { .. }));
}

#[test]
fn malformed_tileset_is_a_parse_error() {
    let dir = temp_dir("badts");
    let map_path = write_fixture(&dir);
    fs::write(dir.join("tiles.json"), "{ \"tilewidth\": ").expect("overwrite tileset");

    let err = load_file(&map_path, None).expect_err("bad tileset");
    assert!(matches!(err, MapError::Json { .. }));
}

#[test]
fn gid_past_last_tileset_is_rejected() {
    let dir = temp_dir("badgid");
    let map_path = write_fixture(&dir);
    fs::write(&map_path, MAP_JSON.replace("\"data\":[1,0]", "\"data\":[1,9]")).expect("rewrite map");

    let err = load_file(&map_path, None).expect_err("bad gid");
    assert!(matches!(err, MapError::InvalidTileGid { gid: 9, max_gid: 2, .. }));
}

#[test]
fn missing_map_file_is_an_io_error() {
    let err = load_file("definitely/not/here.json", None).expect_err("missing map");
    assert!(matches!(err, MapError::Io { .. }));
}
