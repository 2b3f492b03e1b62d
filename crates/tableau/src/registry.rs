//! # ComponentRegistry — Type-Erased Encode/Decode Dispatch
//!
//! The scene codec doesn't know component types at compile time — a scene
//! file is an open-ended mapping from component-type names to field blocks.
//! The registry closes that gap: each registered type contributes a pair of
//! function pointers translating between `&dyn Any` and a
//! [`serde_json::Value`] block, keyed both by on-disk name and by [`TypeId`].
//!
//! Registration happens once at startup (usually via [`ComponentRegistry::builtin`])
//! and the registry is treated as immutable afterwards; codec paths take
//! `&ComponentRegistry`. Registration order is the canonical component
//! ordering used when encoding an entity.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::components::{BoxArea2D, Camera, SpriteRenderer, Tag, Transform};
use crate::error::SceneError;

type EncodeFn = fn(&dyn Any) -> Result<Value, String>;
type DecodeFn = fn(&Value) -> Result<Box<dyn Any + Send + Sync>, String>;

/// One registered component type: its on-disk name and codec functions.
pub(crate) struct ComponentSchema {
    pub(crate) name: String,
    pub(crate) type_id: TypeId,
    encode: EncodeFn,
    decode: DecodeFn,
}

/// Maps component type names to schemas describing how to encode and decode
/// values of that type.
pub struct ComponentRegistry {
    /// Registration order — the canonical serialization order.
    schemas: Vec<ComponentSchema>,
    by_name: HashMap<String, usize>,
    by_type_id: HashMap<TypeId, usize>,
}

impl ComponentRegistry {
    /// An empty registry. Most callers want [`ComponentRegistry::builtin`].
    pub fn new() -> Self {
        Self {
            schemas: Vec::new(),
            by_name: HashMap::new(),
            by_type_id: HashMap::new(),
        }
    }

    /// A registry pre-loaded with the built-in components, in the canonical
    /// order: Tag, Transform, SpriteRenderer, BoxArea2D, Camera.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register::<Tag>("TagComponent");
        registry.register::<Transform>("TransformComponent");
        registry.register::<SpriteRenderer>("SpriteRendererComponent");
        registry.register::<BoxArea2D>("BoxArea2DComponent");
        registry.register::<Camera>("CameraComponent");
        registry
    }

    /// Register a component type under its on-disk name.
    ///
    /// # Panics
    ///
    /// Panics if the name or the type is already registered — registration is
    /// a startup-time concern and a collision is a programming error.
    pub fn register<T>(&mut self, name: &str)
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        if self.by_name.contains_key(name) {
            panic!("Component name `{name}` is already registered");
        }
        let type_id = TypeId::of::<T>();
        if self.by_type_id.contains_key(&type_id) {
            panic!(
                "Component type `{}` is already registered",
                std::any::type_name::<T>()
            );
        }

        let schema = ComponentSchema {
            name: name.to_string(),
            type_id,
            encode: |any| {
                let component = any
                    .downcast_ref::<T>()
                    .ok_or_else(|| "component value has the wrong runtime type".to_string())?;
                serde_json::to_value(component).map_err(|e| e.to_string())
            },
            decode: |block| {
                T::deserialize(block)
                    .map(|component| Box::new(component) as Box<dyn Any + Send + Sync>)
                    .map_err(|e| e.to_string())
            },
        };

        let index = self.schemas.len();
        self.schemas.push(schema);
        self.by_name.insert(name.to_string(), index);
        self.by_type_id.insert(type_id, index);
    }

    /// Whether a component type name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All registered component names, in canonical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|schema| schema.name.as_str())
    }

    /// Number of registered component types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Decode a named field block into a boxed component instance.
    ///
    /// Fails with [`SceneError::UnknownComponentType`] if the name was never
    /// registered, or [`SceneError::SchemaMismatch`] if a required field is
    /// missing or mistyped. The error carries no entity id — the scene codec
    /// fills that in where one is in scope.
    pub fn decode(
        &self,
        name: &str,
        block: &Value,
    ) -> Result<Box<dyn Any + Send + Sync>, SceneError> {
        let index = *self
            .by_name
            .get(name)
            .ok_or_else(|| SceneError::UnknownComponentType {
                name: name.to_string(),
                entity: None,
            })?;
        let schema = &self.schemas[index];
        (schema.decode)(block).map_err(|detail| SceneError::SchemaMismatch {
            component: name.to_string(),
            entity: None,
            detail,
        })
    }

    /// Encode a component instance into its named field block.
    ///
    /// Fails with [`SceneError::UnknownComponentType`] if the instance's
    /// runtime type was never registered, or [`SceneError::SchemaMismatch`]
    /// rather than producing a malformed block.
    pub fn encode_component(&self, component: &dyn Any) -> Result<(&str, Value), SceneError> {
        let index = *self.by_type_id.get(&component.type_id()).ok_or_else(|| {
            SceneError::UnknownComponentType {
                name: "<unregistered type>".to_string(),
                entity: None,
            }
        })?;
        let schema = &self.schemas[index];
        let block = self.encode(schema, component)?;
        Ok((schema.name.as_str(), block))
    }

    /// Encode a component instance into its field block.
    ///
    /// Fails with [`SceneError::SchemaMismatch`] rather than producing a
    /// malformed block.
    pub(crate) fn encode(
        &self,
        schema: &ComponentSchema,
        component: &dyn Any,
    ) -> Result<Value, SceneError> {
        (schema.encode)(component).map_err(|detail| SceneError::SchemaMismatch {
            component: schema.name.clone(),
            entity: None,
            detail,
        })
    }

    /// Schemas in canonical (registration) order.
    pub(crate) fn schemas(&self) -> impl Iterator<Item = &ComponentSchema> {
        self.schemas.iter()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_registers_canonical_order() {
        let registry = ComponentRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "TagComponent",
                "TransformComponent",
                "SpriteRendererComponent",
                "BoxArea2DComponent",
                "CameraComponent",
            ]
        );
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn decode_round_trips_a_tag() {
        let registry = ComponentRegistry::builtin();
        let boxed = registry
            .decode("TagComponent", &json!({ "Tag": "Ace" }))
            .unwrap();
        let tag = boxed.downcast_ref::<Tag>().unwrap();
        assert_eq!(tag.tag, "Ace");
    }

    #[test]
    fn unknown_name_fails() {
        let registry = ComponentRegistry::builtin();
        let err = registry.decode("GhostComponent", &json!({})).unwrap_err();
        assert!(matches!(
            err,
            SceneError::UnknownComponentType { ref name, entity: None } if name == "GhostComponent"
        ));
    }

    #[test]
    fn missing_field_names_the_field() {
        let registry = ComponentRegistry::builtin();
        let block = json!({
            "Position": [0.0, 0.0, 0.0],
            "Rotation": [0.0, 0.0, 0.0],
        });
        let err = registry.decode("TransformComponent", &block).unwrap_err();
        match err {
            SceneError::SchemaMismatch { component, detail, .. } => {
                assert_eq!(component, "TransformComponent");
                assert!(detail.contains("Scale"), "{detail}");
            }
            other => panic!("expected SchemaMismatch, got {other}"),
        }
    }

    #[test]
    fn mistyped_field_fails() {
        let registry = ComponentRegistry::builtin();
        let block = json!({ "Tag": [1, 2, 3] });
        let err = registry.decode("TagComponent", &block).unwrap_err();
        assert!(matches!(err, SceneError::SchemaMismatch { .. }));
    }

    #[test]
    fn encode_component_round_trips() {
        let registry = ComponentRegistry::builtin();
        let (name, block) = registry.encode_component(&Tag::new("Ace")).unwrap();
        assert_eq!(name, "TagComponent");
        assert_eq!(block, json!({ "Tag": "Ace" }));
    }

    #[test]
    fn encode_component_rejects_unregistered_types() {
        struct Runtime;
        let registry = ComponentRegistry::builtin();
        let err = registry.encode_component(&Runtime).unwrap_err();
        assert!(matches!(err, SceneError::UnknownComponentType { .. }));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_name_panics() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Tag>("TagComponent");
        registry.register::<Transform>("TagComponent");
    }
}
