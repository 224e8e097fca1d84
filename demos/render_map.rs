use anyhow::Context;
use macroquad::prelude::*;
use macroquad_tiled_mesh::{load_file, MapRenderer};
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    Conf {
        window_title: "Tiled Mesh".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        tracing::error!("{err:#}");
    }
}

async fn run() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/map.json".to_owned());

    let (map, batches) =
        load_file(&path, None).with_context(|| format!("Loading map {}", path))?;
    let renderer = MapRenderer::new(&map, &batches).context("Uploading map meshes")?;

    let size = vec2(
        (map.width * map.tile_width) as f32,
        (map.height * map.tile_height) as f32,
    );
    let center = vec3(size.x / 2.0, 0.0, size.y / 2.0);
    let mut height = size.max_element().max(1.0);

    loop {
        clear_background(BLACK);

        if is_key_down(KeyCode::Up) {
            height *= 0.98;
        }
        if is_key_down(KeyCode::Down) {
            height *= 1.02;
        }

        // layers step toward -Y, so view from below with +Z as screen up
        set_camera(&Camera3D {
            position: center - vec3(0.0, height, 0.0),
            target: center,
            up: vec3(0.0, 0.0, 1.0),
            ..Default::default()
        });
        renderer.draw();

        set_default_camera();
        draw_text(&format!("FPS: {}", get_fps()), 20.0, 30.0, 30.0, RED);

        next_frame().await;
    }
}
