//! One fetch-evaluate-notify cycle.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use quake_core::{
    evaluate, format_alert, Clock, EventQuery, EventSource, FetchError, Notifier, NotifyError,
    SeismicEvent, SystemClock, TargetConfig,
};
use thiserror::Error;
use tracing::{debug, info};

/// Separator between alert blocks in one batched message.
const ALERT_SEPARATOR: &str = "\n\n";

/// Where a cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// Waiting for the next tick.
    Idle,
    /// Waiting on the event source.
    Fetching,
    /// Waiting on the notification channel.
    Notifying,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CyclePhase::Idle => "idle",
            CyclePhase::Fetching => "fetching",
            CyclePhase::Notifying => "notifying",
        };
        f.write_str(name)
    }
}

/// Errors that end a cycle early or are surfaced after it.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The event source failed; nothing was sent.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Delivery failed. The cycle still counts as complete.
    #[error("notify failed: {0}")]
    Notify(#[from] NotifyError),

    /// The cycle exceeded its deadline and was abandoned.
    #[error("cycle timed out after {0:?}")]
    TimedOut(Duration),
}

/// Summary of a completed cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Events returned by the source.
    pub fetched: usize,
    /// Events within the target radius.
    pub in_range: usize,
    /// Whether a message was delivered.
    pub notified: bool,
}

/// Render the batched alert message for the in-range events, in input order.
///
/// Returns the message and the number of alerts in it; the message is empty
/// when nothing is in range.
pub fn build_message(target: &TargetConfig, events: &[SeismicEvent]) -> (String, usize) {
    let alerts: Vec<String> = events
        .iter()
        .filter_map(|event| {
            let result = evaluate(target, event);
            debug!(
                id = %event.id,
                distance_km = result.distance_km,
                in_range = result.in_range,
                "Evaluated event"
            );
            result
                .in_range
                .then(|| format_alert(target, event, result.distance_km))
        })
        .collect();

    (alerts.join(ALERT_SEPARATOR), alerts.len())
}

/// Run one cycle: fetch the lookback window, evaluate, and notify if needed.
pub async fn run_cycle(
    target: &TargetConfig,
    source: &dyn EventSource,
    notifier: &dyn Notifier,
    clock: &dyn Clock,
) -> Result<CycleReport, CycleError> {
    let query = EventQuery::for_window(target, clock.now());

    debug!(phase = %CyclePhase::Fetching, source = source.name(), "Cycle started");
    let events = source.fetch(&query).await?;

    let (message, in_range) = build_message(target, &events);
    let mut report = CycleReport {
        fetched: events.len(),
        in_range,
        notified: false,
    };

    if message.is_empty() {
        debug!(phase = %CyclePhase::Idle, fetched = report.fetched, "No events in range");
        return Ok(report);
    }

    debug!(phase = %CyclePhase::Notifying, channel = notifier.name(), "Sending alerts");
    notifier.notify(&message).await?;
    report.notified = true;

    info!(
        fetched = report.fetched,
        in_range = report.in_range,
        "Alert delivered via {}",
        notifier.name()
    );
    debug!(phase = %CyclePhase::Idle, "Cycle finished");

    Ok(report)
}

/// The relay's collaborators bundled for repeated cycles.
#[derive(Clone)]
pub struct Relay {
    target: Arc<TargetConfig>,
    source: Arc<dyn EventSource>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl Relay {
    /// Create a relay using the system clock.
    pub fn new(
        target: TargetConfig,
        source: Arc<dyn EventSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            target: Arc::new(target),
            source,
            notifier,
            clock: Arc::new(SystemClock),
        }
    }

    /// Builder method to replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn target(&self) -> &TargetConfig {
        &self.target
    }

    /// Run one cycle with this relay's collaborators.
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        run_cycle(
            &self.target,
            self.source.as_ref(),
            self.notifier.as_ref(),
            self.clock.as_ref(),
        )
        .await
    }
}

impl fmt::Debug for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("target", &self.target)
            .field("source", &self.source.name())
            .field("notifier", &self.notifier.name())
            .finish()
    }
}
