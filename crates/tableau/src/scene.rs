//! # Scene — The Unit of Save/Load
//!
//! A [`Scene`] is a name plus an [`EntityStore`]. The codec here is the
//! typed half of serialization: [`Scene::decode`] walks the document tree
//! produced by [`crate::document::parse`], creating entities and dispatching
//! each component sub-block through the [`ComponentRegistry`];
//! [`Scene::encode`] is the inverse, emitting entities in insertion order
//! and components in the registry's canonical order.
//!
//! Decode is all-or-nothing: any error (structure, unknown type, schema,
//! duplicate id) fails the whole call and no scene is produced — a malformed
//! file is never partially loaded and presented as valid.
//!
//! ```no_run
//! use tableau::prelude::*;
//!
//! let registry = ComponentRegistry::builtin();
//! let scene = Scene::load("assets/scenes/Main.scene", &registry)?;
//! for entity in scene.entities.iter() {
//!     if let Some(tag) = scene.entities.get::<Tag>(entity) {
//!         println!("{}", tag.tag);
//!     }
//! }
//! # Ok::<(), tableau::error::SceneError>(())
//! ```

use std::fmt;
use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::document;
use crate::entity::EntityStore;
use crate::error::SceneError;
use crate::registry::ComponentRegistry;

/// A named, ordered collection of entities.
pub struct Scene {
    pub name: String,
    pub entities: EntityStore,
}

impl Scene {
    /// An empty scene with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: EntityStore::new(),
        }
    }

    // ── Decode ───────────────────────────────────────────────────────

    /// Decode a scene from its textual form.
    ///
    /// The caller provides the already-read text; file access is a separate
    /// concern (see [`Scene::load`]).
    pub fn decode(source: &str, registry: &ComponentRegistry) -> Result<Scene, SceneError> {
        let root = document::parse(source)?;

        let name = match root.get("Scene") {
            Some(Value::String(name)) => name.clone(),
            _ => {
                return Err(SceneError::MalformedDocument {
                    line: 1,
                    detail: "missing `Scene` name".into(),
                });
            }
        };

        let mut scene = Scene::new(name);
        match root.get("Entities") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for item in items {
                    decode_entity(&mut scene.entities, item, registry)?;
                }
            }
            Some(_) => {
                return Err(SceneError::MalformedDocument {
                    line: 1,
                    detail: "`Entities` must be a sequence".into(),
                });
            }
        }

        log::debug!(
            "decoded scene `{}` ({} entities)",
            scene.name,
            scene.entities.len()
        );
        Ok(scene)
    }

    // ── Encode ───────────────────────────────────────────────────────

    /// Encode the scene to its textual form.
    ///
    /// Entities appear in insertion order; each entity's components appear
    /// in the registry's canonical order. Components of unregistered types
    /// are not serialized. `decode(encode(scene))` yields a semantically
    /// equal scene (32-bit float precision; byte equality is not promised).
    pub fn encode(&self, registry: &ComponentRegistry) -> Result<String, SceneError> {
        let mut root = Map::new();
        root.insert("Scene".to_string(), Value::String(self.name.clone()));

        let mut items = Vec::with_capacity(self.entities.len());
        for entity in self.entities.iter() {
            let Some(id) = self.entities.id_of(entity) else {
                continue;
            };
            let mut fields = Map::new();
            fields.insert("Entity".to_string(), Value::Number(Number::from(id)));

            for schema in registry.schemas() {
                if let Some(component) = self.entities.get_boxed(entity, schema.type_id) {
                    let block = registry
                        .encode(schema, component)
                        .map_err(|err| err.with_entity(id))?;
                    fields.insert(schema.name.clone(), block);
                }
            }
            items.push(Value::Object(fields));
        }
        root.insert("Entities".to_string(), Value::Array(items));

        log::debug!(
            "encoded scene `{}` ({} entities)",
            self.name,
            self.entities.len()
        );
        Ok(document::write(&Value::Object(root)))
    }

    // ── File helpers ─────────────────────────────────────────────────

    /// Read and decode a scene file.
    pub fn load(path: impl AsRef<Path>, registry: &ComponentRegistry) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        log::info!("loading scene from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Scene::decode(&source, registry)
    }

    /// Encode and write a scene file.
    pub fn save(
        &self,
        path: impl AsRef<Path>,
        registry: &ComponentRegistry,
    ) -> Result<(), SceneError> {
        let path = path.as_ref();
        log::info!("saving scene `{}` to {}", self.name, path.display());
        let text = self.encode(registry)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

// Component data is type-erased, so only the name and entity count print.
impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("entities", &self.entities.len())
            .finish()
    }
}

fn decode_entity(
    store: &mut EntityStore,
    item: &Value,
    registry: &ComponentRegistry,
) -> Result<(), SceneError> {
    let Value::Object(fields) = item else {
        return Err(SceneError::MalformedDocument {
            line: 1,
            detail: "entity item must be a mapping".into(),
        });
    };
    let id = fields
        .get("Entity")
        .and_then(Value::as_u64)
        .ok_or_else(|| SceneError::MalformedDocument {
            line: 1,
            detail: "entity block missing its `Entity` id".into(),
        })?;

    let entity = store.create(id)?;
    for (name, block) in fields {
        if name == "Entity" {
            continue;
        }
        let component = registry
            .decode(name, block)
            .map_err(|err| err.with_entity(id))?;
        store.attach_boxed(entity, component);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BoxArea2D, Camera, SpriteRenderer, Tag, Transform};

    fn registry() -> ComponentRegistry {
        ComponentRegistry::builtin()
    }

    #[test]
    fn decodes_a_minimal_scene() {
        let source = "Scene: Main\n\
                      Entities:\n\
                      \x20 - Entity: 7\n\
                      \x20   TagComponent:\n\
                      \x20     Tag: Ace\n\
                      \x20   TransformComponent:\n\
                      \x20     Position: [-206.5, 23, 0]\n\
                      \x20     Rotation: [0, -0, 0]\n\
                      \x20     Scale: [1, 1, 1]\n";
        let scene = Scene::decode(source, &registry()).unwrap();
        assert_eq!(scene.name, "Main");
        assert_eq!(scene.entities.len(), 1);

        let entity = scene.entities.find(7).unwrap();
        assert_eq!(scene.entities.get::<Tag>(entity).unwrap().tag, "Ace");
        let transform = scene.entities.get::<Transform>(entity).unwrap();
        assert_eq!(transform.position.x, -206.5);
        assert_eq!(transform.position.y, 23.0);
    }

    #[test]
    fn debug_prints_name_and_entity_count() {
        let mut scene = Scene::new("Main");
        scene.entities.create(7).unwrap();
        assert_eq!(
            format!("{scene:?}"),
            r#"Scene { name: "Main", entities: 1 }"#
        );

        // `unwrap_err` on a decode result needs this impl on the Ok side.
        let err = Scene::decode("Entities:\n", &ComponentRegistry::builtin()).unwrap_err();
        assert!(matches!(err, SceneError::MalformedDocument { .. }));
    }

    #[test]
    fn missing_scene_name_is_malformed() {
        let err = Scene::decode("Entities:\n", &registry()).unwrap_err();
        assert!(matches!(err, SceneError::MalformedDocument { .. }));
    }

    #[test]
    fn missing_entities_key_is_an_empty_scene() {
        let scene = Scene::decode("Scene: Empty\n", &registry()).unwrap();
        assert_eq!(scene.name, "Empty");
        assert!(scene.entities.is_empty());
    }

    #[test]
    fn duplicate_entity_ids_fail() {
        let source = "Scene: Main\n\
                      Entities:\n\
                      \x20 - Entity: 7\n\
                      \x20 - Entity: 7\n";
        let err = Scene::decode(source, &registry()).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateId(7)));
    }

    #[test]
    fn unknown_component_type_fails_with_entity_context() {
        let source = "Scene: Main\n\
                      Entities:\n\
                      \x20 - Entity: 7\n\
                      \x20   GhostComponent:\n\
                      \x20     Boo: 1\n";
        let err = Scene::decode(source, &registry()).unwrap_err();
        match err {
            SceneError::UnknownComponentType { name, entity } => {
                assert_eq!(name, "GhostComponent");
                assert_eq!(entity, Some(7));
            }
            other => panic!("expected UnknownComponentType, got {other}"),
        }
    }

    #[test]
    fn entity_block_without_id_is_malformed() {
        let source = "Scene: Main\n\
                      Entities:\n\
                      \x20 - TagComponent:\n\
                      \x20     Tag: Ace\n";
        let err = Scene::decode(source, &registry()).unwrap_err();
        assert!(matches!(err, SceneError::MalformedDocument { .. }));
    }

    #[test]
    fn encode_orders_components_canonically() {
        let registry = registry();
        let mut scene = Scene::new("Main");
        let entity = scene.entities.create(1).unwrap();
        // Attach in reverse of the canonical order.
        scene.entities.attach(entity, Camera::default());
        scene.entities.attach(entity, BoxArea2D::default());
        scene
            .entities
            .attach(entity, SpriteRenderer::with_texture("textures\\Background.png"));
        scene.entities.attach(entity, Transform::default());
        scene.entities.attach(entity, Tag::new("Background"));

        let text = scene.encode(&registry).unwrap();
        let tag_at = text.find("TagComponent").unwrap();
        let transform_at = text.find("TransformComponent").unwrap();
        let sprite_at = text.find("SpriteRendererComponent").unwrap();
        let area_at = text.find("BoxArea2DComponent").unwrap();
        let camera_at = text.find("CameraComponent").unwrap();
        assert!(tag_at < transform_at);
        assert!(transform_at < sprite_at);
        assert!(sprite_at < area_at);
        assert!(area_at < camera_at);
    }

    #[test]
    fn encode_preserves_entity_insertion_order() {
        let registry = registry();
        let mut scene = Scene::new("Main");
        for id in [30u64, 10, 20] {
            let entity = scene.entities.create(id).unwrap();
            scene.entities.attach(entity, Tag::new(format!("e{id}")));
        }

        let text = scene.encode(&registry).unwrap();
        let at_30 = text.find("Entity: 30").unwrap();
        let at_10 = text.find("Entity: 10").unwrap();
        let at_20 = text.find("Entity: 20").unwrap();
        assert!(at_30 < at_10);
        assert!(at_10 < at_20);
    }

    #[test]
    fn unregistered_components_are_not_serialized() {
        struct Runtime;

        let registry = registry();
        let mut scene = Scene::new("Main");
        let entity = scene.entities.create(1).unwrap();
        scene.entities.attach(entity, Tag::new("Ace"));
        scene.entities.attach(entity, Runtime);

        let text = scene.encode(&registry).unwrap();
        assert!(text.contains("TagComponent"));
        assert!(!text.contains("Runtime"));

        // The encoded form still decodes cleanly.
        let reloaded = Scene::decode(&text, &registry).unwrap();
        assert_eq!(reloaded.entities.len(), 1);
    }

    #[test]
    fn failed_decode_produces_nothing() {
        // Second entity is broken; the first must not leak out as a partial
        // scene — decode returns an error and no Scene at all.
        let source = "Scene: Main\n\
                      Entities:\n\
                      \x20 - Entity: 1\n\
                      \x20   TagComponent:\n\
                      \x20     Tag: Ace\n\
                      \x20 - Entity: 2\n\
                      \x20   TransformComponent:\n\
                      \x20     Position: [0, 0, 0]\n";
        let result = Scene::decode(source, &registry());
        assert!(result.is_err());
    }
}
