//! Command job — one (lamp, settings) dispatch and its bounded retry state.

use std::time::Duration;

use crate::id::LampId;

/// Maximum number of retries after the first failed attempt.
pub const MAX_RETRIES: u8 = 1;

/// Fixed delay before a failed job re-enters the admission queue.
pub const RETRY_DELAY: Duration = Duration::from_millis(1000);

/// One state-change command for a single lamp.
///
/// Created per (setting-group × lamp) pairing at scene-expansion time and
/// dropped once it reaches a terminal outcome or is superseded. The key is
/// derived deterministically from the scene name and lamp id, and doubles as
/// the admission-gate ticket and the log correlation handle.
#[derive(Debug, Clone)]
pub struct CommandJob {
    pub key: String,
    pub lamp_id: LampId,
    pub settings: serde_json::Value,
    retries_used: u8,
}

/// What to do after a failed dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureDisposition {
    /// Re-enter the admission queue after the given delay.
    Retry { delay: Duration },
    /// The retry budget is exhausted; the job is terminal.
    GiveUp,
}

/// Terminal result of driving one job to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The device channel accepted the command.
    Succeeded,
    /// The command failed and the single retry was already spent.
    FailedFinal,
    /// A newer generation started before this job was admitted; it never
    /// reached (or re-reached) the device channel. Distinct from a device
    /// failure and never logged as one.
    Superseded,
}

impl CommandJob {
    /// Create a job for one lamp of one scene application.
    #[must_use]
    pub fn new(scene_name: &str, lamp_id: LampId, settings: serde_json::Value) -> Self {
        Self {
            key: format!("{scene_name} // Light {lamp_id}"),
            lamp_id,
            settings,
            retries_used: 0,
        }
    }

    /// How many retries this job has consumed.
    #[must_use]
    pub fn retries_used(&self) -> u8 {
        self.retries_used
    }

    /// Record a failed attempt and decide what happens next.
    ///
    /// The first failure consumes the single retry and asks for re-entry
    /// after [`RETRY_DELAY`]; every later failure is terminal.
    pub fn on_failure(&mut self) -> FailureDisposition {
        if self.retries_used < MAX_RETRIES {
            self.retries_used += 1;
            FailureDisposition::Retry { delay: RETRY_DELAY }
        } else {
            FailureDisposition::GiveUp
        }
    }
}
