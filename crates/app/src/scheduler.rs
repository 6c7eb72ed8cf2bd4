//! Scheduler — owns the single live generation and performs the cutover.
//!
//! One generation corresponds to one "apply scene" invocation: it holds the
//! admission gate the batch is throttled through and the handles of its
//! in-flight jobs. Starting a new generation tears the previous gate down
//! (resolving its queued jobs as superseded) before the fresh gate is
//! installed, so the newest request is the sole consumer of the channel's
//! rate budget from that point on.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use scenecast_domain::error::SceneCastError;
use scenecast_domain::id::GenerationId;
use scenecast_domain::job::{CommandJob, FailureDisposition, JobOutcome};
use scenecast_domain::time::{Timestamp, now};

use crate::gate::{Admission, RateGate, RateLimit};
use crate::ports::{LightChannel, LogSink};

/// One scene-application invocation's scheduling context.
///
/// A command job belongs to exactly one generation for its entire lifetime.
pub struct Generation {
    id: GenerationId,
    started_at: Timestamp,
    gate: Arc<RateGate>,
    handles: StdMutex<Vec<JoinHandle<JobOutcome>>>,
}

impl Generation {
    fn new(id: GenerationId, gate: RateGate) -> Self {
        Self {
            id,
            started_at: now(),
            gate: Arc::new(gate),
            handles: StdMutex::new(Vec::new()),
        }
    }

    /// Sequence number of this generation; higher means newer.
    #[must_use]
    pub fn id(&self) -> GenerationId {
        self.id
    }

    /// When this generation was installed.
    #[must_use]
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// Number of jobs routed into this generation so far.
    #[must_use]
    pub fn job_count(&self) -> usize {
        self.lock_handles().len()
    }

    fn track(&self, handle: JoinHandle<JobOutcome>) {
        self.lock_handles().push(handle);
    }

    /// Wait for every routed job to reach a terminal outcome and collect the
    /// outcomes.
    ///
    /// Intended for tests and graceful shutdown; the applier itself never
    /// waits on job completion.
    pub async fn drain(&self) -> Vec<JobOutcome> {
        let handles = std::mem::take(&mut *self.lock_handles());
        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            if let Ok(outcome) = handle.await {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    async fn teardown(&self) {
        self.gate.teardown().await;
    }

    fn lock_handles(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<JobOutcome>>> {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Generation manager: at most one generation is actively admitting jobs at
/// any instant.
pub struct Scheduler<C, S> {
    pub(crate) channel: Arc<C>,
    pub(crate) sink: Arc<S>,
    limit: RateLimit,
    current: Mutex<Option<Arc<Generation>>>,
    next_id: AtomicU64,
}

impl<C, S> Scheduler<C, S>
where
    C: LightChannel + 'static,
    S: LogSink + 'static,
{
    /// Create a scheduler dispatching over `channel` with the given budget.
    ///
    /// # Errors
    ///
    /// Returns [`SceneCastError::Validation`] when the budget is invalid, so
    /// misconfiguration surfaces at boot rather than at the first apply.
    pub fn new(channel: Arc<C>, sink: Arc<S>, limit: RateLimit) -> Result<Self, SceneCastError> {
        limit.validate()?;
        Ok(Self {
            channel,
            sink,
            limit,
            current: Mutex::new(None),
            next_id: AtomicU64::new(1),
        })
    }

    /// Tear down the previous generation (if any) and install a fresh one.
    ///
    /// This is a synchronization point: the previous gate has resolved all of
    /// its waiting jobs as superseded before the new generation is returned.
    /// Commands already admitted against the old gate are left to finish;
    /// they cannot be recalled from the external channel.
    ///
    /// # Errors
    ///
    /// Returns [`SceneCastError::Validation`] if the gate rejects the budget
    /// (unreachable after a successful [`Scheduler::new`]).
    pub async fn start_generation(&self) -> Result<Arc<Generation>, SceneCastError> {
        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            previous.teardown().await;
            tracing::debug!(generation = %previous.id(), "superseded generation torn down");
        }
        let id = GenerationId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let generation = Arc::new(Generation::new(id, RateGate::new(self.limit)?));
        *current = Some(Arc::clone(&generation));
        tracing::debug!(generation = %id, "generation installed");
        Ok(generation)
    }

    /// The live generation, if a scene application has started one.
    pub async fn current_generation(&self) -> Option<Arc<Generation>> {
        self.current.lock().await.clone()
    }

    /// Launch one job's lifecycle against the given generation's gate.
    ///
    /// Callers route through the generation handle they were given at call
    /// time — never through a shared "current" reference — so a job expanded
    /// while a cutover happens lands in its own (now torn down) gate and
    /// resolves as superseded instead of leaking into the newer generation.
    pub fn route(&self, generation: &Generation, job: CommandJob) {
        let gate = Arc::clone(&generation.gate);
        let channel = Arc::clone(&self.channel);
        let sink = Arc::clone(&self.sink);
        generation.track(tokio::spawn(drive(job, gate, channel, sink)));
    }
}

/// Drive one command job through admission, execution, and the bounded retry.
async fn drive<C: LightChannel, S: LogSink>(
    mut job: CommandJob,
    gate: Arc<RateGate>,
    channel: Arc<C>,
    sink: Arc<S>,
) -> JobOutcome {
    loop {
        match gate.submit(&job.key).await {
            Admission::Admitted => {}
            // Superseded jobs are discarded silently; this is not a failure.
            Admission::Superseded => return JobOutcome::Superseded,
        }

        match channel.set_light_state(&job.lamp_id, &job.settings).await {
            Ok(()) => return JobOutcome::Succeeded,
            Err(err) => match job.on_failure() {
                FailureDisposition::Retry { delay } => {
                    sink.log(&format!("Retrying \"{key}\": {err}", key = job.key));
                    tokio::time::sleep(delay).await;
                }
                FailureDisposition::GiveUp => {
                    sink.log(&format!(
                        "Error: command \"{key}\" failed after retry: {err}",
                        key = job.key
                    ));
                    return JobOutcome::FailedFinal;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use serde_json::json;

    use scenecast_domain::error::ChannelError;
    use scenecast_domain::id::LampId;
    use scenecast_domain::job::RETRY_DELAY;

    // ── Fake channel ───────────────────────────────────────────────

    #[derive(Default)]
    struct FakeChannel {
        calls: StdMutex<Vec<LampId>>,
        failures: StdMutex<HashMap<LampId, u32>>,
        latency: Option<Duration>,
    }

    impl FakeChannel {
        fn failing(lamp: &str, times: u32) -> Self {
            let channel = Self::default();
            channel
                .failures
                .lock()
                .unwrap()
                .insert(LampId::new(lamp), times);
            channel
        }

        fn with_latency(latency: Duration) -> Self {
            Self {
                latency: Some(latency),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<LampId> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl LightChannel for FakeChannel {
        async fn set_light_state(
            &self,
            lamp_id: &LampId,
            _settings: &serde_json::Value,
        ) -> Result<(), ChannelError> {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            self.calls.lock().unwrap().push(lamp_id.clone());
            let should_fail = {
                let mut failures = self.failures.lock().unwrap();
                match failures.get_mut(lamp_id) {
                    Some(remaining) if *remaining > 0 => {
                        *remaining -= 1;
                        true
                    }
                    _ => false,
                }
            };
            if should_fail {
                Err(ChannelError::new("injected device failure"))
            } else {
                Ok(())
            }
        }
    }

    // ── Spy sink ───────────────────────────────────────────────────

    #[derive(Default)]
    struct SpySink {
        messages: StdMutex<Vec<String>>,
    }

    impl SpySink {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl LogSink for SpySink {
        fn log(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    // ── Helpers ────────────────────────────────────────────────────

    fn scheduler(
        channel: FakeChannel,
        limit: RateLimit,
    ) -> (Scheduler<FakeChannel, SpySink>, Arc<FakeChannel>, Arc<SpySink>) {
        let channel = Arc::new(channel);
        let sink = Arc::new(SpySink::default());
        let scheduler =
            Scheduler::new(Arc::clone(&channel), Arc::clone(&sink), limit).unwrap();
        (scheduler, channel, sink)
    }

    fn job(lamp: &str) -> CommandJob {
        CommandJob::new("Evening", LampId::new(lamp), json!({"bri": 120}))
    }

    // ── Tests ──────────────────────────────────────────────────────

    #[test]
    fn should_reject_invalid_budget_at_construction() {
        let channel = Arc::new(FakeChannel::default());
        let sink = Arc::new(SpySink::default());
        let result = Scheduler::new(
            channel,
            sink,
            RateLimit {
                reservoir: 0,
                window: Duration::from_millis(1000),
            },
        );
        assert!(matches!(result, Err(SceneCastError::Validation(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn should_assign_monotonically_increasing_generation_ids() {
        let (scheduler, _, _) = scheduler(FakeChannel::default(), RateLimit::default());
        let first = scheduler.start_generation().await.unwrap();
        let second = scheduler.start_generation().await.unwrap();
        assert!(second.id() > first.id());
        assert_eq!(
            scheduler.current_generation().await.unwrap().id(),
            second.id()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_execute_routed_jobs_through_the_channel() {
        let (scheduler, channel, sink) = scheduler(FakeChannel::default(), RateLimit::default());
        let generation = scheduler.start_generation().await.unwrap();
        for lamp in ["1", "2", "3"] {
            scheduler.route(&generation, job(lamp));
        }

        let outcomes = generation.drain().await;
        assert_eq!(outcomes, vec![JobOutcome::Succeeded; 3]);
        assert_eq!(channel.calls().len(), 3);
        assert!(sink.messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_supersede_queued_jobs_when_new_generation_starts() {
        let (scheduler, channel, _) = scheduler(FakeChannel::default(), RateLimit::per_second(1));
        let first = scheduler.start_generation().await.unwrap();
        for lamp in ["1", "2", "3"] {
            scheduler.route(&first, job(lamp));
        }

        // One token: exactly one job is admitted before the cutover.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(channel.calls().len(), 1);

        let _second = scheduler.start_generation().await.unwrap();

        let outcomes = first.drain().await;
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| **o == JobOutcome::Superseded)
                .count(),
            2
        );
        // The superseded jobs never reached the channel.
        assert_eq!(channel.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_let_admitted_commands_finish_across_cutover() {
        let (scheduler, channel, _) = scheduler(
            FakeChannel::with_latency(Duration::from_millis(50)),
            RateLimit::default(),
        );
        let first = scheduler.start_generation().await.unwrap();
        scheduler.route(&first, job("1"));

        // Let the job get admitted and start executing.
        tokio::time::sleep(Duration::from_millis(10)).await;

        let _second = scheduler.start_generation().await.unwrap();

        let outcomes = first.drain().await;
        assert_eq!(outcomes, vec![JobOutcome::Succeeded]);
        assert_eq!(channel.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_retry_failed_command_once_and_succeed() {
        let (scheduler, channel, sink) =
            scheduler(FakeChannel::failing("1", 1), RateLimit::default());
        let generation = scheduler.start_generation().await.unwrap();
        scheduler.route(&generation, job("1"));

        let outcomes = generation.drain().await;
        assert_eq!(outcomes, vec![JobOutcome::Succeeded]);
        assert_eq!(channel.calls().len(), 2);

        let messages = sink.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Retrying \"Evening // Light 1\""));
    }

    #[tokio::test(start_paused = true)]
    async fn should_space_the_retry_by_the_fixed_delay() {
        let (scheduler, channel, _) =
            scheduler(FakeChannel::failing("1", 1), RateLimit::default());
        let generation = scheduler.start_generation().await.unwrap();
        scheduler.route(&generation, job("1"));

        // First attempt fails immediately; the retry waits out the delay.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(channel.calls().len(), 1);
        tokio::time::sleep(RETRY_DELAY / 2).await;
        assert_eq!(channel.calls().len(), 1);
        tokio::time::sleep(RETRY_DELAY).await;
        assert_eq!(channel.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn should_abandon_job_after_second_failure() {
        let (scheduler, channel, sink) =
            scheduler(FakeChannel::failing("1", 2), RateLimit::default());
        let generation = scheduler.start_generation().await.unwrap();
        scheduler.route(&generation, job("1"));

        let outcomes = generation.drain().await;
        assert_eq!(outcomes, vec![JobOutcome::FailedFinal]);
        // No third attempt.
        assert_eq!(channel.calls().len(), 2);

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Retrying \"Evening // Light 1\""));
        assert!(
            messages[1].starts_with("Error: command \"Evening // Light 1\" failed after retry")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_discard_retry_silently_when_generation_is_superseded() {
        let (scheduler, channel, sink) =
            scheduler(FakeChannel::failing("1", 2), RateLimit::default());
        let first = scheduler.start_generation().await.unwrap();
        scheduler.route(&first, job("1"));

        // Let the first attempt fail and the job enter its retry delay.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(channel.calls().len(), 1);

        let _second = scheduler.start_generation().await.unwrap();

        let outcomes = first.drain().await;
        assert_eq!(outcomes, vec![JobOutcome::Superseded]);
        // The retry never reached the channel, and no terminal failure was
        // reported — superseded is not a failure.
        assert_eq!(channel.calls().len(), 1);
        let messages = sink.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Retrying"));
    }

    #[tokio::test(start_paused = true)]
    async fn should_report_no_generation_before_first_apply() {
        let (scheduler, _, _) = scheduler(FakeChannel::default(), RateLimit::default());
        assert!(scheduler.current_generation().await.is_none());
    }
}
