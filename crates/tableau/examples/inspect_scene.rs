//! Inspect a scene file — print each entity's tag, position, and components.
//!
//! Run with: `cargo run -p tableau --example inspect_scene -- path/to/scene`

use tableau::prelude::*;

fn main() {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: inspect_scene <scene file>");
        std::process::exit(2);
    };

    let registry = ComponentRegistry::builtin();
    let scene = match Scene::load(&path, &registry) {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("failed to load {path}: {err}");
            std::process::exit(1);
        }
    };

    println!("Scene: {} ({} entities)", scene.name, scene.entities.len());
    for entity in scene.entities.iter() {
        let id = scene.entities.id_of(entity).unwrap_or(0);
        let tag = scene
            .entities
            .get::<Tag>(entity)
            .map(|t| t.tag.as_str())
            .unwrap_or("<untagged>");
        print!("  {id:>20}  {tag:<12}");

        if let Some(transform) = scene.entities.get::<Transform>(entity) {
            print!(" at {:?}", transform.position);
        }
        if let Some(sprite) = scene.entities.get::<SpriteRenderer>(entity) {
            if let Some(texture) = &sprite.texture {
                print!("  sprite={texture}");
            }
        }
        if scene.entities.has::<BoxArea2D>(entity) {
            print!("  [area]");
        }
        if scene.entities.has::<Camera>(entity) {
            print!("  [camera]");
        }
        println!();
    }
}
