//! # Built-In Components
//!
//! The component set the card-game scenes use: a human-readable tag, a
//! transform, a sprite, a 2D mouse-interaction area, and a camera. Field
//! names serialize in the PascalCase form the scene format uses on disk
//! (`Position`, `OrthographicSize`, ...).
//!
//! By convention every entity in a scene carries exactly one [`Tag`] and one
//! [`Transform`]; [`SpriteRenderer`], [`BoxArea2D`], and [`Camera`] are
//! optional. Neither the format nor the store enforces the convention.

use serde::{Deserialize, Serialize};

use crate::math::{Vec2, Vec3, Vec4};

/// Human-readable entity label (`TagComponent`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "Tag")]
    pub tag: String,
}

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

/// Position, rotation, and scale (`TransformComponent`).
///
/// Rotation is Euler angles in degrees — 2D scenes only ever touch the Z
/// axis, but all three are stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Create a transform at the given position.
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Self::default()
        }
    }

    /// Create a transform at the given 2D position (z = 0).
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self::from_xyz(x, y, 0.0)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// A textured, tinted quad (`SpriteRendererComponent`).
///
/// `color` components are in [0, 1]. `texture` is an opaque relative path
/// resolved by the engine's asset loader — the codec never normalizes or
/// reinterprets it, so backslash-separated paths survive round trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpriteRenderer {
    pub color: Vec4,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

impl SpriteRenderer {
    pub fn with_texture(path: impl Into<String>) -> Self {
        Self {
            texture: Some(path.into()),
            ..Self::default()
        }
    }
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            texture: None,
        }
    }
}

/// An axis-aligned mouse-interaction area (`BoxArea2DComponent`).
///
/// `offset` is relative to the entity's position; `size` is the half-extent
/// in each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoxArea2D {
    pub offset: Vec2,
    pub size: Vec2,
}

impl Default for BoxArea2D {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            size: Vec2::new(0.5, 0.5),
        }
    }
}

/// How a camera projects the scene, serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum ProjectionType {
    Orthographic,
    Perspective,
}

impl From<ProjectionType> for u32 {
    fn from(projection: ProjectionType) -> u32 {
        match projection {
            ProjectionType::Orthographic => 0,
            ProjectionType::Perspective => 1,
        }
    }
}

impl TryFrom<u32> for ProjectionType {
    type Error = String;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ProjectionType::Orthographic),
            1 => Ok(ProjectionType::Perspective),
            other => Err(format!("invalid projection type code {other}")),
        }
    }
}

/// Projection parameters, nested under `Camera:` in the component block.
///
/// Both projection parameter sets are always stored so switching projection
/// in an editor doesn't lose values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CameraSpec {
    pub projection_type: ProjectionType,
    /// Vertical field of view in radians.
    #[serde(rename = "PerspectiveFOV")]
    pub perspective_fov: f32,
    pub perspective_near: f32,
    pub perspective_far: f32,
    pub orthographic_size: f32,
    pub orthographic_near: f32,
    pub orthographic_far: f32,
    pub pixel_perfect: bool,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            projection_type: ProjectionType::Orthographic,
            perspective_fov: std::f32::consts::FRAC_PI_4,
            perspective_near: 0.01,
            perspective_far: 1000.0,
            orthographic_size: 10.0,
            orthographic_near: -1.0,
            orthographic_far: 1.0,
            pixel_perfect: false,
        }
    }
}

/// A scene camera (`CameraComponent`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Camera {
    pub camera: CameraSpec,
    pub primary: bool,
    pub fixed_aspect_ratio: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            camera: CameraSpec::default(),
            primary: true,
            fixed_aspect_ratio: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transform_field_names_are_pascal_case() {
        let value = serde_json::to_value(Transform::from_xyz(-206.5, 23.0, 0.0)).unwrap();
        assert_eq!(value["Position"], json!([-206.5, 23.0, 0.0]));
        assert_eq!(value["Rotation"], json!([0.0, 0.0, 0.0]));
        assert_eq!(value["Scale"], json!([1.0, 1.0, 1.0]));
    }

    #[test]
    fn sprite_without_texture_omits_the_field() {
        let value = serde_json::to_value(SpriteRenderer::default()).unwrap();
        assert!(value.get("Texture").is_none());

        let value =
            serde_json::to_value(SpriteRenderer::with_texture("textures\\Background.png"))
                .unwrap();
        assert_eq!(value["Texture"], json!("textures\\Background.png"));
    }

    #[test]
    fn projection_type_serializes_as_integer_code() {
        assert_eq!(
            serde_json::to_value(ProjectionType::Orthographic).unwrap(),
            json!(0)
        );
        assert_eq!(
            serde_json::to_value(ProjectionType::Perspective).unwrap(),
            json!(1)
        );
        let decoded: ProjectionType = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(decoded, ProjectionType::Perspective);
        assert!(serde_json::from_value::<ProjectionType>(json!(2)).is_err());
    }

    #[test]
    fn camera_uses_on_disk_field_names() {
        let value = serde_json::to_value(Camera::default()).unwrap();
        assert!(value["Camera"].get("PerspectiveFOV").is_some());
        assert!(value["Camera"].get("PixelPerfect").is_some());
        assert!(value.get("FixedAspectRatio").is_some());
        assert_eq!(value["Primary"], json!(true));
    }

    #[test]
    fn box_area_defaults_to_half_extent() {
        let area = BoxArea2D::default();
        assert_eq!(area.size, Vec2::new(0.5, 0.5));
        assert_eq!(area.offset, Vec2::ZERO);
    }
}
