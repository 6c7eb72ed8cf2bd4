//! Scene applier — expands a scene into command jobs and queues them.

use std::sync::Arc;

use scenecast_domain::error::SceneCastError;
use scenecast_domain::job::CommandJob;
use scenecast_domain::scene::Scene;
use scenecast_domain::zone::ZoneDirectory;

use crate::ports::{LightChannel, LogSink};
use crate::scheduler::{Generation, Scheduler};

/// Orchestration entry point: scene → zones → lamps → command jobs.
pub struct SceneApplier<C, S> {
    scheduler: Scheduler<C, S>,
}

impl<C, S> SceneApplier<C, S>
where
    C: LightChannel + 'static,
    S: LogSink + 'static,
{
    /// Create an applier driving jobs through the given scheduler.
    pub fn new(scheduler: Scheduler<C, S>) -> Self {
        Self { scheduler }
    }

    /// The scheduler backing this applier.
    pub fn scheduler(&self) -> &Scheduler<C, S> {
        &self.scheduler
    }

    /// Queue one state-change command per lamp named by `scene`.
    ///
    /// Starts a fresh generation (superseding any previous application still
    /// in flight), then walks every setting-group and its target zones. A
    /// zone name missing from `zones` is reported to the log sink and
    /// skipped; the remaining zones of the group still apply.
    ///
    /// Returns once every job is *queued* — not once the lamps converge.
    /// Device convergence is eventually consistent with respect to this
    /// call's return; the returned generation handle is how interested
    /// callers observe progress.
    ///
    /// # Errors
    ///
    /// Returns [`SceneCastError::Validation`] only if the scheduler cannot
    /// install a fresh generation. Per-lamp dispatch failures never surface
    /// here; they are reported to the log sink (best-effort semantics).
    #[tracing::instrument(skip_all, fields(scene_name = %scene.name))]
    pub async fn apply(
        &self,
        scene: &Scene,
        zones: &ZoneDirectory,
    ) -> Result<Arc<Generation>, SceneCastError> {
        let generation = self.scheduler.start_generation().await?;

        for group in &scene.groups {
            for zone_name in &group.apply_to {
                let Some(zone) = zones.get(zone_name) else {
                    self.scheduler
                        .sink
                        .log(&format!("Error: zone \"{zone_name}\" not found"));
                    continue;
                };
                for lamp in &zone.lamps {
                    let job = CommandJob::new(&scene.name, lamp.id.clone(), group.settings.clone());
                    self.scheduler.route(&generation, job);
                }
            }
        }

        tracing::debug!(
            generation = %generation.id(),
            jobs = generation.job_count(),
            "scene expansion queued"
        );
        Ok(generation)
    }
}
