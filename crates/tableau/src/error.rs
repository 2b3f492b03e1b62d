//! # SceneError — The Decode/Encode Error Taxonomy
//!
//! Every failure mode of the document parser, the component registry, and the
//! scene codec is one of four cases. Errors carry the entity id and component
//! name when one is in scope, so a bad block in a large scene file can be
//! located without a debugger. Nothing is silently recovered — a malformed
//! scene must never be partially loaded and presented as valid.

use thiserror::Error;

/// Errors produced while decoding or encoding a scene document.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Structural or syntax violation in the source text (missing required
    /// key, wrong nesting, bad indentation).
    #[error("malformed document (line {line}): {detail}")]
    MalformedDocument { line: usize, detail: String },

    /// A component block whose type name was never registered.
    #[error("unknown component type `{name}`{}", entity_note(.entity))]
    UnknownComponentType { name: String, entity: Option<u64> },

    /// A component block with a missing or mistyped field.
    #[error("schema mismatch in `{component}`{}: {detail}", entity_note(.entity))]
    SchemaMismatch {
        component: String,
        entity: Option<u64>,
        detail: String,
    },

    /// Two entities claimed the same 64-bit identity.
    #[error("duplicate entity id {0}")]
    DuplicateId(u64),

    /// Underlying file read/write failure from the load/save helpers.
    #[error("scene file i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SceneError {
    /// Fill in the entity id on registry errors raised without one in scope.
    pub(crate) fn with_entity(self, id: u64) -> Self {
        match self {
            SceneError::UnknownComponentType { name, entity: None } => {
                SceneError::UnknownComponentType {
                    name,
                    entity: Some(id),
                }
            }
            SceneError::SchemaMismatch {
                component,
                entity: None,
                detail,
            } => SceneError::SchemaMismatch {
                component,
                entity: Some(id),
                detail,
            },
            other => other,
        }
    }
}

fn entity_note(entity: &Option<u64>) -> String {
    match entity {
        Some(id) => format!(" on entity {id}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_context() {
        let err = SceneError::UnknownComponentType {
            name: "GhostComponent".into(),
            entity: Some(42),
        };
        assert_eq!(
            err.to_string(),
            "unknown component type `GhostComponent` on entity 42"
        );

        let err = SceneError::SchemaMismatch {
            component: "TransformComponent".into(),
            entity: None,
            detail: "missing field `Scale`".into(),
        };
        assert_eq!(
            err.to_string(),
            "schema mismatch in `TransformComponent`: missing field `Scale`"
        );
    }

    #[test]
    fn with_entity_only_fills_missing() {
        let err = SceneError::SchemaMismatch {
            component: "TagComponent".into(),
            entity: None,
            detail: "bad".into(),
        }
        .with_entity(7);
        assert!(err.to_string().contains("on entity 7"));

        let err = SceneError::DuplicateId(3).with_entity(7);
        assert_eq!(err.to_string(), "duplicate entity id 3");
    }
}
