//! Simulated light channel backed by in-memory state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use scenecast_app::ports::LightChannel;
use scenecast_domain::error::ChannelError;
use scenecast_domain::id::LampId;

/// A dispatched command as the virtual channel saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub lamp_id: LampId,
    pub settings: serde_json::Value,
}

/// Simulated device-control channel.
///
/// Every accepted command is recorded in arrival order. Failure injection is
/// per lamp: the next `times` attempts for that lamp error out, after which
/// the lamp behaves normally again.
#[derive(Debug, Default)]
pub struct VirtualLightChannel {
    commands: Mutex<Vec<RecordedCommand>>,
    failures: Mutex<HashMap<LampId, u32>>,
}

impl VirtualLightChannel {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `times` attempts for `lamp_id` fail.
    pub fn fail_next(&self, lamp_id: impl Into<LampId>, times: u32) {
        self.lock_failures().insert(lamp_id.into(), times);
    }

    /// Every command accepted so far, in arrival order.
    #[must_use]
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.lock_commands().clone()
    }

    /// Number of commands accepted so far.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.lock_commands().len()
    }

    fn lock_commands(&self) -> MutexGuard<'_, Vec<RecordedCommand>> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_failures(&self) -> MutexGuard<'_, HashMap<LampId, u32>> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl LightChannel for VirtualLightChannel {
    async fn set_light_state(
        &self,
        lamp_id: &LampId,
        settings: &serde_json::Value,
    ) -> Result<(), ChannelError> {
        let should_fail = {
            let mut failures = self.lock_failures();
            match failures.get_mut(lamp_id) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    true
                }
                _ => false,
            }
        };
        if should_fail {
            return Err(ChannelError::new(format!(
                "virtual lamp {lamp_id} refused the command"
            )));
        }

        self.lock_commands().push(RecordedCommand {
            lamp_id: lamp_id.clone(),
            settings: settings.clone(),
        });
        Ok(())
    }
}
