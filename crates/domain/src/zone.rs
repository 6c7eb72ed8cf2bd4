//! Zone — a named group of lamps, and the directory that resolves zone names.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SceneCastError, ValidationError};
use crate::id::LampId;

/// A single addressable light endpoint.
///
/// Immutable and sourced from the zone directory; the core never creates or
/// destroys lamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lamp {
    pub id: LampId,
}

impl Lamp {
    /// Wrap a bridge-assigned lamp identifier.
    #[must_use]
    pub fn new(id: impl Into<LampId>) -> Self {
        Self { id: id.into() }
    }
}

/// A named group of lamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub lamps: Vec<Lamp>,
}

impl Zone {
    /// Create a builder for constructing a [`Zone`].
    #[must_use]
    pub fn builder() -> ZoneBuilder {
        ZoneBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SceneCastError::Validation`] when `name` is empty. A zone
    /// with no lamps is valid — applying a scene to it is a no-op, not an
    /// error.
    pub fn validate(&self) -> Result<(), SceneCastError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Zone`].
#[derive(Debug, Default)]
pub struct ZoneBuilder {
    name: Option<String>,
    lamps: Vec<Lamp>,
}

impl ZoneBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn lamp(mut self, id: impl Into<LampId>) -> Self {
        self.lamps.push(Lamp::new(id));
        self
    }

    /// Consume the builder, validate, and return a [`Zone`].
    ///
    /// # Errors
    ///
    /// Returns [`SceneCastError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Zone, SceneCastError> {
        let zone = Zone {
            name: self.name.unwrap_or_default(),
            lamps: self.lamps,
        };
        zone.validate()?;
        Ok(zone)
    }
}

/// Lookup table from zone name to [`Zone`].
///
/// Owned by the caller of `apply` and read-only to the core. Deserializes
/// from the scene file's `zones` object (name → list of lamps).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "HashMap<String, Vec<Lamp>>", into = "HashMap<String, Vec<Lamp>>")]
pub struct ZoneDirectory {
    zones: HashMap<String, Zone>,
}

impl ZoneDirectory {
    /// Build a directory from zones, keyed by their names.
    #[must_use]
    pub fn new(zones: impl IntoIterator<Item = Zone>) -> Self {
        Self {
            zones: zones.into_iter().map(|z| (z.name.clone(), z)).collect(),
        }
    }

    /// Resolve a zone by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.zones.get(name)
    }

    /// Iterate over all zones.
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    /// Number of zones in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the directory holds no zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Check domain invariants of every contained zone.
    ///
    /// # Errors
    ///
    /// Returns [`SceneCastError::Validation`] for the first invalid zone.
    pub fn validate(&self) -> Result<(), SceneCastError> {
        for zone in self.zones.values() {
            zone.validate()?;
        }
        Ok(())
    }
}

impl From<HashMap<String, Vec<Lamp>>> for ZoneDirectory {
    fn from(map: HashMap<String, Vec<Lamp>>) -> Self {
        Self {
            zones: map
                .into_iter()
                .map(|(name, lamps)| {
                    let zone = Zone {
                        name: name.clone(),
                        lamps,
                    };
                    (name, zone)
                })
                .collect(),
        }
    }
}

impl From<ZoneDirectory> for HashMap<String, Vec<Lamp>> {
    fn from(directory: ZoneDirectory) -> Self {
        directory
            .zones
            .into_iter()
            .map(|(name, zone)| (name, zone.lamps))
            .collect()
    }
}
