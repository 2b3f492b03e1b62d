//! Convenience re-exports — `use tableau::prelude::*` for the common items.

pub use crate::components::{BoxArea2D, Camera, CameraSpec, ProjectionType, SpriteRenderer, Tag, Transform};
pub use crate::entity::{Entity, EntityStore};
pub use crate::error::SceneError;
pub use crate::math::{Vec2, Vec3, Vec4};
pub use crate::project::ProjectConfig;
pub use crate::registry::ComponentRegistry;
pub use crate::scene::Scene;
