// tests/compile_tests.rs

use image::RgbaImage;
use macroquad_tiled_mesh::{compile, AtlasImages, Layer, Map, Tileset, FLIP_D, FLIP_H};
use std::sync::Arc;

fn images(names: &[(&str, u32, u32)]) -> AtlasImages {
    names
        .iter()
        .map(|&(n, w, h)| (n.to_owned(), Arc::new(RgbaImage::new(w, h))))
        .collect()
}

#[test]
fn batches_split_by_layer_and_atlas() {
    let mut map = Map::new(4, 4, 16, 16);
    map.tilesets.push(Tileset::new(1, 16, 16, "grass.png"));
    map.tilesets.push(Tileset::new(5, 16, 16, "water.png"));

    let mut ground = Layer::new("ground");
    ground.set(0, 0, 1u32);
    ground.set(1, 0, 5u32);
    ground.set(2, 0, 6u32 | FLIP_D);
    let mut top = Layer::new("top");
    top.set(3, 3, 2u32 | FLIP_H);
    map.layers.push(ground);
    map.layers.push(top);

    let result = compile(&map, None, &images(&[("grass.png", 32, 32), ("water.png", 32, 32)]));

    assert_eq!(result["ground"].len(), 2);
    assert_eq!(result["ground"]["grass.png"].tile_count(), 1);
    assert_eq!(result["ground"]["water.png"].tile_count(), 2);
    assert_eq!(result["top"].len(), 1);
    assert_eq!(result["top"]["grass.png"].tile_count(), 1);

    // both layers share one decoded atlas
    assert!(Arc::ptr_eq(
        &result["ground"]["grass.png"].texture.image,
        &result["top"]["grass.png"].texture.image
    ));
}

#[test]
fn larger_tileset_tiles_are_centered_on_their_own_size() {
    // 64x64 tiles on a 32x32 grid, like tall trees over a ground layer
    let mut map = Map::new(2, 2, 32, 32);
    map.tilesets.push(Tileset::new(1, 64, 64, "trees.png"));
    let mut layer = Layer::new("trees");
    layer.set(0, 1, 1u32);
    map.layers.push(layer);

    let result = compile(&map, None, &images(&[("trees.png", 64, 64)]));
    let ps = result["trees"]["trees.png"].positions();
    let min_x = ps.iter().map(|p| p.x).fold(f32::MAX, f32::min);
    let max_x = ps.iter().map(|p| p.x).fold(f32::MIN, f32::max);
    let min_z = ps.iter().map(|p| p.z).fold(f32::MAX, f32::min);
    let max_z = ps.iter().map(|p| p.z).fold(f32::MIN, f32::max);

    // top-left corner pinned to the cell, the rest hangs right and down
    assert_eq!((min_x, max_x), (0.0, 64.0));
    assert_eq!((min_z, max_z), (-32.0, 32.0));
}
