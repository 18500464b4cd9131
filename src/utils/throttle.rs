//! Leading/trailing throttle for async actions.
//!
//! The first call in a quiet period runs immediately. Calls that arrive before
//! the interval has elapsed since the last run are coalesced: only the newest
//! input survives, and it runs once when the interval is up. Inputs in between
//! are dropped.
//!
//! ```rust,no_run
//! use shelf_scout::utils::Throttler;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let throttler = Throttler::new(Duration::from_millis(200), |query: String| async move {
//!     println!("searching for {query}");
//! });
//!
//! throttler.schedule("d".to_string()); // runs now
//! throttler.schedule("du".to_string()); // dropped
//! throttler.schedule("dune".to_string()); // runs 200ms after "d"
//! # }
//! ```

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Default interval between throttled runs
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(200);

type Action<T> = dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync;

#[derive(Debug, Default)]
struct TimerState {
    /// When the action last started
    last_run: Option<Instant>,
    /// Pending trailing run
    pending: Option<JoinHandle<()>>,
    /// Bumped on every schedule so a superseded trailing timer never fires
    generation: u64,
}

/// Rate limiter running at most one action per interval
///
/// Runs are spawned on the tokio runtime and are never cancelled once started;
/// only a trailing run that is still waiting for its slot can be superseded.
/// `schedule` must be called from within a tokio runtime.
pub struct Throttler<T> {
    interval: Duration,
    action: Arc<Action<T>>,
    timer: Arc<Mutex<TimerState>>,
}

impl<T> Throttler<T>
where
    T: Send + 'static,
{
    /// Wrap `action` so that it runs at most once per `interval`
    pub fn new<F, Fut>(interval: Duration, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            interval,
            action: Arc::new(move |input| action(input).boxed()),
            timer: Arc::new(Mutex::new(TimerState::default())),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Request a run with `input`
    pub fn schedule(&self, input: T) {
        let now = Instant::now();
        let mut timer = lock(&self.timer);

        timer.generation = timer.generation.wrapping_add(1);
        if let Some(pending) = timer.pending.take() {
            pending.abort();
        }

        let since_last = timer.last_run.map(|last| now.duration_since(last));
        match since_last {
            Some(elapsed) if elapsed < self.interval => {
                let wait = self.interval - elapsed;
                let generation = timer.generation;
                let action = Arc::clone(&self.action);
                let timer_state = Arc::clone(&self.timer);

                timer.pending = Some(tokio::spawn(async move {
                    tokio::time::sleep(wait).await;

                    {
                        let mut timer = lock(&timer_state);
                        if timer.generation != generation {
                            return;
                        }
                        timer.last_run = Some(Instant::now());
                        timer.pending = None;
                    }

                    tokio::spawn(action(input));
                }));
            }
            _ => {
                timer.last_run = Some(now);
                tokio::spawn((self.action)(input));
            }
        }
    }

    /// Drop the pending trailing run, if any
    pub fn cancel_pending(&self) {
        let mut timer = lock(&self.timer);
        timer.generation = timer.generation.wrapping_add(1);
        if let Some(pending) = timer.pending.take() {
            pending.abort();
        }
    }

    /// Whether a trailing run is waiting for its slot
    pub fn has_pending(&self) -> bool {
        lock(&self.timer)
            .pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> std::fmt::Debug for Throttler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttler")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl<T> Drop for Throttler<T> {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.timer).pending.take() {
            pending.abort();
        }
    }
}

fn lock(timer: &Mutex<TimerState>) -> std::sync::MutexGuard<'_, TimerState> {
    timer.lock().unwrap_or_else(PoisonError::into_inner)
}
