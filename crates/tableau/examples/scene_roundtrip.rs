//! Scene round-trip — build a small deal programmatically, encode it, and
//! decode it back.
//!
//! Run with: `cargo run -p tableau --example scene_roundtrip`

use tableau::prelude::*;

fn main() {
    env_logger::init();

    let registry = ComponentRegistry::builtin();
    let mut scene = Scene::new("Demo");

    // A row of foundation cards.
    let cards = [
        (0x3f9a_0001u64, "Ace", -206.5, "textures/Cards/Card3.png"),
        (0x3f9a_0002, "King", -147.5, "textures/Cards/Card49.png"),
        (0x3f9a_0003, "Queen", -88.5, "textures/Cards/Card48.png"),
    ];
    for (id, tag, x, texture) in cards {
        let entity = scene.entities.create(id).expect("fresh id");
        scene.entities.attach(entity, Tag::new(tag));
        scene.entities.attach(entity, Transform::from_xy(x, 23.0));
        scene
            .entities
            .attach(entity, SpriteRenderer::with_texture(texture));
        scene.entities.attach(entity, BoxArea2D::default());
    }

    // A pixel-perfect orthographic camera.
    let camera = scene.entities.create(0x3f9a_00ff).expect("fresh id");
    scene.entities.attach(camera, Tag::new("Camera"));
    scene.entities.attach(camera, Transform::default());
    scene.entities.attach(
        camera,
        Camera {
            camera: CameraSpec {
                orthographic_size: 440.0,
                pixel_perfect: true,
                ..CameraSpec::default()
            },
            ..Camera::default()
        },
    );

    let text = scene.encode(&registry).expect("encode");
    println!("{text}");

    let reloaded = Scene::decode(&text, &registry).expect("decode");
    println!(
        "reloaded `{}` with {} entities",
        reloaded.name,
        reloaded.entities.len()
    );
}
