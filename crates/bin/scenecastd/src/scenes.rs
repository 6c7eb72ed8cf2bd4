//! Scene file loading — JSON document holding scenes and zones.
//!
//! The file has two top-level objects: `scenes`, an ordered list of scene
//! definitions, and `zones`, a map from zone name to its lamps:
//!
//! ```json
//! {
//!   "scenes": [
//!     {"name": "Evening", "groups": [
//!       {"settings": {"on": true, "bri": 120}, "applyTo": ["living-room"]}
//!     ]}
//!   ],
//!   "zones": {
//!     "living-room": [{"id": "1"}, {"id": "2"}]
//!   }
//! }
//! ```

use serde::Deserialize;

use scenecast_domain::catalog::SceneCatalog;
use scenecast_domain::error::SceneCastError;
use scenecast_domain::scene::Scene;
use scenecast_domain::zone::ZoneDirectory;

/// On-disk representation of the scene file.
#[derive(Debug, Deserialize)]
struct SceneFile {
    scenes: Vec<Scene>,
    zones: ZoneDirectory,
}

/// Load and validate the scene catalog from a JSON file.
///
/// # Errors
///
/// Returns [`SceneFileError`] when the file is unreadable, malformed, or
/// contains invalid scene/zone definitions.
pub fn load(path: &str) -> Result<SceneCatalog, SceneFileError> {
    let content = std::fs::read_to_string(path).map_err(SceneFileError::Io)?;
    parse(&content)
}

fn parse(content: &str) -> Result<SceneCatalog, SceneFileError> {
    let file: SceneFile = serde_json::from_str(content)?;
    Ok(SceneCatalog::new(file.scenes, file.zones)?)
}

/// Scene file errors.
#[derive(Debug, thiserror::Error)]
pub enum SceneFileError {
    /// File I/O failure.
    #[error("failed to read scene file")]
    Io(#[source] std::io::Error),
    /// JSON parse failure.
    #[error("failed to parse scene file")]
    Parse(#[from] serde_json::Error),
    /// A scene or zone definition violates domain invariants.
    #[error("invalid scene file")]
    Invalid(#[from] SceneCastError),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "scenes": [
            {"name": "Evening", "groups": [
                {"settings": {"on": true, "bri": 120}, "applyTo": ["living-room", "den"]}
            ]},
            {"name": "All Off", "groups": [
                {"settings": {"on": false}, "applyTo": ["living-room"]},
                {"settings": {"on": false}, "applyTo": ["den"]}
            ]}
        ],
        "zones": {
            "living-room": [{"id": "1"}, {"id": "2"}, {"id": "3"}],
            "den": [{"id": "4"}]
        }
    }"#;

    #[test]
    fn should_parse_sample_scene_file() {
        let catalog = parse(SAMPLE).unwrap();
        assert_eq!(catalog.scene_names(), vec!["Evening", "All Off"]);
        assert_eq!(catalog.zones().len(), 2);
        assert_eq!(catalog.zones().get("living-room").unwrap().lamps.len(), 3);
    }

    #[test]
    fn should_reject_malformed_json() {
        assert!(matches!(
            parse("{not json"),
            Err(SceneFileError::Parse(_))
        ));
    }

    #[test]
    fn should_reject_scene_with_empty_name() {
        let content = r#"{
            "scenes": [{"name": "", "groups": []}],
            "zones": {}
        }"#;
        assert!(matches!(parse(content), Err(SceneFileError::Invalid(_))));
    }

    #[test]
    fn should_report_io_error_for_missing_file() {
        assert!(matches!(
            load("definitely-missing.json"),
            Err(SceneFileError::Io(_))
        ));
    }
}
