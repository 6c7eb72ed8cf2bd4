//! Rate admission gate — bounds command dispatch to R admissions per window.
//!
//! A worker task owns the token reservoir and the FIFO queue of waiting
//! submissions. The reservoir starts full and is reset to its capacity on a
//! recurring window timer; it never accumulates beyond capacity. Tearing the
//! gate down resolves every still-waiting submission as superseded without
//! touching commands that were already admitted.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};

use scenecast_domain::error::ValidationError;

/// Refill ticks must sit on this internal clock alignment, so the window is
/// required to be a multiple of it.
pub const REFILL_ALIGNMENT: Duration = Duration::from_millis(250);

/// Admission budget: at most `reservoir` commands per `window`.
///
/// The defaults match the light-resource ceiling of roughly ten commands per
/// second. Coarser-grained targets get a stricter budget through
/// configuration alone, e.g. `RateLimit { reservoir: 1, window: 1s }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Tokens available per window.
    pub reservoir: u32,
    /// Window duration; reset to `reservoir` tokens at every boundary.
    pub window: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            reservoir: 10,
            window: Duration::from_millis(1000),
        }
    }
}

impl RateLimit {
    /// A budget of `reservoir` admissions per second.
    #[must_use]
    pub fn per_second(reservoir: u32) -> Self {
        Self {
            reservoir,
            window: Duration::from_secs(1),
        }
    }

    /// Check configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroReservoir`] for an empty reservoir and
    /// [`ValidationError::MisalignedWindow`] when the window is zero or not a
    /// multiple of [`REFILL_ALIGNMENT`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reservoir == 0 {
            return Err(ValidationError::ZeroReservoir);
        }
        if self.window.is_zero()
            || !self
                .window
                .as_millis()
                .is_multiple_of(REFILL_ALIGNMENT.as_millis())
        {
            return Err(ValidationError::MisalignedWindow);
        }
        Ok(())
    }
}

/// How a submission left the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A token was consumed; the caller may invoke the device channel now.
    Admitted,
    /// The gate was torn down before a token became available.
    Superseded,
}

struct Waiting {
    key: String,
    reply: oneshot::Sender<Admission>,
}

/// Token-reservoir gate admitting submissions in FIFO order.
///
/// One gate belongs to exactly one generation; a new scene application gets a
/// fresh gate and the old one is torn down.
pub struct RateGate {
    queue: mpsc::UnboundedSender<Waiting>,
    shutdown: watch::Sender<bool>,
    drained: Mutex<Option<oneshot::Receiver<()>>>,
}

impl RateGate {
    /// Spawn the gate worker with the given budget.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the budget fails
    /// [`RateLimit::validate`].
    pub fn new(limit: RateLimit) -> Result<Self, ValidationError> {
        limit.validate()?;
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (drained_tx, drained_rx) = oneshot::channel();
        tokio::spawn(run(queue_rx, shutdown_rx, drained_tx, limit));
        Ok(Self {
            queue: queue_tx,
            shutdown: shutdown_tx,
            drained: Mutex::new(Some(drained_rx)),
        })
    }

    /// Enqueue one submission and wait for its admission.
    ///
    /// Resolves `Admitted` once a token is consumed, in submission order, or
    /// `Superseded` if the gate is torn down first (including submissions
    /// that arrive after teardown — the landing path for jobs re-entering
    /// from their retry delay).
    pub async fn submit(&self, key: &str) -> Admission {
        let (reply_tx, reply_rx) = oneshot::channel();
        let waiting = Waiting {
            key: key.to_string(),
            reply: reply_tx,
        };
        if self.queue.send(waiting).is_err() {
            return Admission::Superseded;
        }
        reply_rx.await.unwrap_or(Admission::Superseded)
    }

    /// Resolve every waiting submission as superseded and wait until the
    /// queue is fully drained.
    ///
    /// Already-admitted commands are unaffected. Idempotent; later calls
    /// return immediately.
    pub async fn teardown(&self) {
        let _ = self.shutdown.send(true);
        let drained = self
            .drained
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(drained) = drained {
            let _ = drained.await;
        }
    }
}

async fn run(
    mut queue: mpsc::UnboundedReceiver<Waiting>,
    mut shutdown: watch::Receiver<bool>,
    drained: oneshot::Sender<()>,
    limit: RateLimit,
) {
    let mut refill = tokio::time::interval(limit.window);
    // The first tick completes immediately; the reservoir starts full.
    refill.tick().await;
    let mut tokens = limit.reservoir;

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = refill.tick() => {
                tokens = limit.reservoir;
            }
            waiting = queue.recv(), if tokens > 0 => match waiting {
                Some(waiting) => {
                    tokens -= 1;
                    tracing::trace!(key = %waiting.key, tokens_left = tokens, "command admitted");
                    let _ = waiting.reply.send(Admission::Admitted);
                }
                None => break,
            },
        }
    }

    queue.close();
    while let Ok(waiting) = queue.try_recv() {
        tracing::trace!(key = %waiting.key, "command superseded");
        let _ = waiting.reply.send(Admission::Superseded);
    }
    let _ = drained.send(());
}
