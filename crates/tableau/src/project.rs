//! # ProjectConfig — The Project Description File
//!
//! A project file points the engine at its start scene and asset roots and
//! records the game's logical and window resolutions. It uses the same
//! line-oriented text form as scenes, under a top-level `Project:` map:
//!
//! ```text
//! Project:
//!   Name: Patience
//!   StartScene: scenes\Main.scene
//!   AssetDirectory: Assets
//!   ScriptDirectory: Scripts
//!   GameWidth: 640
//!   GameHeight: 480
//!   WindowWidth: 1280
//!   WindowHeight: 960
//! ```
//!
//! Directory and scene paths are opaque strings, resolved by the engine's
//! file-access layer.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document;
use crate::error::SceneError;

/// Engine project settings, the root document of a game folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectConfig {
    pub name: String,
    pub start_scene: String,
    pub asset_directory: String,
    pub script_directory: String,
    pub game_width: u32,
    pub game_height: u32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".into(),
            start_scene: String::new(),
            asset_directory: "Assets".into(),
            script_directory: "Scripts".into(),
            game_width: 640,
            game_height: 480,
            window_width: 1280,
            window_height: 960,
        }
    }
}

impl ProjectConfig {
    /// Decode a project file from its textual form.
    pub fn decode(source: &str) -> Result<Self, SceneError> {
        let root = document::parse(source)?;
        let block = root.get("Project").ok_or(SceneError::MalformedDocument {
            line: 1,
            detail: "missing `Project` block".into(),
        })?;
        Self::deserialize(block).map_err(|err| SceneError::SchemaMismatch {
            component: "Project".into(),
            entity: None,
            detail: err.to_string(),
        })
    }

    /// Encode the project to its textual form.
    pub fn encode(&self) -> Result<String, SceneError> {
        let block = serde_json::to_value(self).map_err(|err| SceneError::SchemaMismatch {
            component: "Project".into(),
            entity: None,
            detail: err.to_string(),
        })?;
        let mut root = Map::new();
        root.insert("Project".to_string(), block);
        Ok(document::write(&Value::Object(root)))
    }

    /// Read and decode a project file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        log::info!("loading project from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Self::decode(&source)
    }

    /// Encode and write a project file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        log::info!("saving project `{}` to {}", self.name, path.display());
        std::fs::write(path, self.encode()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let config = ProjectConfig {
            name: "Patience".into(),
            start_scene: "scenes\\Main.scene".into(),
            ..ProjectConfig::default()
        };
        let text = config.encode().unwrap();
        let reloaded = ProjectConfig::decode(&text).unwrap();
        assert_eq!(config, reloaded);
    }

    #[test]
    fn decodes_a_hand_written_file() {
        let source = "Project:\n\
                      \x20 Name: Patience\n\
                      \x20 StartScene: scenes\\Main.scene\n\
                      \x20 AssetDirectory: Assets\n\
                      \x20 ScriptDirectory: Scripts\n\
                      \x20 GameWidth: 480\n\
                      \x20 GameHeight: 270\n\
                      \x20 WindowWidth: 1920\n\
                      \x20 WindowHeight: 1080\n";
        let config = ProjectConfig::decode(source).unwrap();
        assert_eq!(config.name, "Patience");
        assert_eq!(config.start_scene, "scenes\\Main.scene");
        assert_eq!(config.game_width, 480);
        assert_eq!(config.window_height, 1080);
    }

    #[test]
    fn missing_field_is_a_schema_mismatch() {
        let source = "Project:\n\
                      \x20 Name: Patience\n";
        let err = ProjectConfig::decode(source).unwrap_err();
        match err {
            SceneError::SchemaMismatch { component, detail, .. } => {
                assert_eq!(component, "Project");
                assert!(detail.contains("missing field"), "{detail}");
            }
            other => panic!("expected SchemaMismatch, got {other}"),
        }
    }

    #[test]
    fn missing_project_block_is_malformed() {
        let err = ProjectConfig::decode("Name: Patience\n").unwrap_err();
        assert!(matches!(err, SceneError::MalformedDocument { .. }));
    }
}
