//! Scene catalog — the parsed scene and zone definitions, held read-only.

use crate::error::SceneCastError;
use crate::scene::Scene;
use crate::zone::ZoneDirectory;

/// Parsed scene and zone definitions; a data holder with no behavior beyond
/// lookup.
///
/// Built once by the loader at startup and shared read-only with inbound
/// adapters. Scene order is preserved from the source file.
#[derive(Debug, Clone)]
pub struct SceneCatalog {
    scenes: Vec<Scene>,
    zones: ZoneDirectory,
}

impl SceneCatalog {
    /// Assemble a catalog, validating every scene and zone.
    ///
    /// # Errors
    ///
    /// Returns [`SceneCastError::Validation`] for the first invalid scene or
    /// zone.
    pub fn new(scenes: Vec<Scene>, zones: ZoneDirectory) -> Result<Self, SceneCastError> {
        for scene in &scenes {
            scene.validate()?;
        }
        zones.validate()?;
        Ok(Self { scenes, zones })
    }

    /// Resolve a scene by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.name == name)
    }

    /// All scenes, in file order.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// All scene names, in file order.
    #[must_use]
    pub fn scene_names(&self) -> Vec<&str> {
        self.scenes.iter().map(|s| s.name.as_str()).collect()
    }

    /// The zone directory the scenes refer into.
    #[must_use]
    pub fn zones(&self) -> &ZoneDirectory {
        &self.zones
    }

    /// Number of scenes in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the catalog holds no scenes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
