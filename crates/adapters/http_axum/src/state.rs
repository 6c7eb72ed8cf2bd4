//! Shared application state for axum handlers.

use std::sync::Arc;

use scenecast_app::applier::SceneApplier;
use scenecast_app::ports::{LightChannel, LogSink};
use scenecast_domain::catalog::SceneCatalog;

/// Application state shared across all axum handlers.
///
/// Generic over the channel and log sink types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<C, S> {
    /// Scene applier (owns the scheduler).
    pub applier: Arc<SceneApplier<C, S>>,
    /// Read-only scene and zone definitions.
    pub catalog: Arc<SceneCatalog>,
}

impl<C, S> Clone for AppState<C, S> {
    fn clone(&self) -> Self {
        Self {
            applier: Arc::clone(&self.applier),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<C, S> AppState<C, S>
where
    C: LightChannel + 'static,
    S: LogSink + 'static,
{
    /// Create a new application state from owned instances.
    pub fn new(applier: SceneApplier<C, S>, catalog: SceneCatalog) -> Self {
        Self {
            applier: Arc::new(applier),
            catalog: Arc::new(catalog),
        }
    }

    /// Create a new application state from pre-wrapped `Arc`s.
    ///
    /// Use this when the applier needs to be shared with background tasks
    /// before constructing the HTTP state.
    pub fn from_arcs(applier: Arc<SceneApplier<C, S>>, catalog: Arc<SceneCatalog>) -> Self {
        Self { applier, catalog }
    }
}
