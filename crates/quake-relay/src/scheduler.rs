//! Single-flight polling scheduler.
//!
//! A tick that arrives while the previous cycle is still running is dropped,
//! never queued, so a slow or hanging collaborator cannot build a backlog.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::cycle::{CycleError, CycleReport};

/// Configuration for the polling scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Time between ticks.
    pub interval: Duration,
    /// Fire the first cycle immediately instead of after one interval.
    pub run_on_start: bool,
    /// Abandon a cycle that runs longer than this. `None` means no deadline.
    pub cycle_timeout: Option<Duration>,
}

impl SchedulerConfig {
    /// Create a config with the given interval, first tick after one interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            run_on_start: false,
            cycle_timeout: None,
        }
    }

    /// Builder method to fire the first cycle immediately.
    pub fn with_run_on_start(mut self, run_on_start: bool) -> Self {
        self.run_on_start = run_on_start;
        self
    }

    /// Builder method to set a cycle deadline.
    pub fn with_cycle_timeout(mut self, cycle_timeout: Duration) -> Self {
        self.cycle_timeout = Some(cycle_timeout);
        self
    }
}

/// Counters describing what the scheduler has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Timer ticks observed.
    pub ticks: u64,
    /// Cycles started.
    pub started: u64,
    /// Ticks dropped because a cycle was in flight.
    pub dropped: u64,
    /// Cycles that finished, successfully or not.
    pub completed: u64,
    /// Cycles that returned an error or timed out.
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    ticks: AtomicU64,
    started: AtomicU64,
    dropped: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> SchedulerStats {
        SchedulerStats {
            ticks: self.ticks.load(Ordering::SeqCst),
            started: self.started.load(Ordering::SeqCst),
            dropped: self.dropped.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
        }
    }
}

/// Drives a cycle function on a fixed interval.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Start ticking with a fresh cancellation token.
    pub fn start<F, Fut>(&self, cycle: F) -> SchedulerHandle
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CycleReport, CycleError>> + Send + 'static,
    {
        self.start_with_token(cycle, CancellationToken::new())
    }

    /// Start ticking until `cancel` is cancelled.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_with_token<F, Fut>(&self, cycle: F, cancel: CancellationToken) -> SchedulerHandle
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CycleReport, CycleError>> + Send + 'static,
    {
        let counters = Arc::new(Counters::default());
        let task = tokio::spawn(run_loop(
            self.config.clone(),
            cycle,
            cancel.clone(),
            counters.clone(),
        ));

        SchedulerHandle {
            cancel,
            counters,
            task,
        }
    }
}

/// Handle to a running scheduler.
pub struct SchedulerHandle {
    cancel: CancellationToken,
    counters: Arc<Counters>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop emitting ticks. An in-flight cycle keeps running.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Current counters.
    pub fn stats(&self) -> SchedulerStats {
        self.counters.snapshot()
    }

    /// Cancel, wait for any in-flight cycle to finish, and return final counters.
    pub async fn shutdown(self) -> SchedulerStats {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            error!("Scheduler task ended abnormally: {}", e);
        }
        self.counters.snapshot()
    }
}

async fn run_loop<F, Fut>(
    config: SchedulerConfig,
    cycle: F,
    cancel: CancellationToken,
    counters: Arc<Counters>,
) where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<CycleReport, CycleError>> + Send + 'static,
{
    // interval_at panics on a zero period.
    let period = config.interval.max(Duration::from_millis(1));
    let first = if config.run_on_start {
        Instant::now()
    } else {
        Instant::now() + period
    };
    let mut ticker = interval_at(first, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(interval = ?period, run_on_start = config.run_on_start, "Starting scheduler");

    let mut in_flight: Option<JoinHandle<()>> = None;

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                info!("Shutdown signal received, stopping scheduler");
                break;
            }

            _ = ticker.tick() => {}
        }

        counters.ticks.fetch_add(1, Ordering::SeqCst);

        if in_flight.as_ref().is_some_and(|handle| !handle.is_finished()) {
            counters.dropped.fetch_add(1, Ordering::SeqCst);
            warn!("Previous cycle still running, dropping tick");
            continue;
        }

        counters.started.fetch_add(1, Ordering::SeqCst);
        let fut = cycle();
        let counters = counters.clone();
        let deadline = config.cycle_timeout;

        in_flight = Some(tokio::spawn(async move {
            let result = match deadline {
                Some(limit) => timeout(limit, fut)
                    .await
                    .unwrap_or(Err(CycleError::TimedOut(limit))),
                None => fut.await,
            };

            counters.completed.fetch_add(1, Ordering::SeqCst);
            match result {
                Ok(report) => {
                    debug!(
                        fetched = report.fetched,
                        in_range = report.in_range,
                        notified = report.notified,
                        "Cycle completed"
                    );
                }
                Err(e) => {
                    counters.failed.fetch_add(1, Ordering::SeqCst);
                    error!("Cycle failed: {}", e);
                }
            }
        }));
    }

    if let Some(handle) = in_flight {
        if !handle.is_finished() {
            info!("Waiting for in-flight cycle to finish");
        }
        if let Err(e) = handle.await {
            error!("Cycle task ended abnormally: {}", e);
        }
    }
}
