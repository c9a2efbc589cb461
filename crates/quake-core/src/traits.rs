//! Collaborator traits at the edges of the polling cycle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{FetchError, NotifyError};
use crate::event::{EventQuery, SeismicEvent};

/// A source of recently reported seismic events.
///
/// Implementations enforce their own request timeouts.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch events matching the query, in the order the source returns them.
    async fn fetch(&self, query: &EventQuery) -> Result<Vec<SeismicEvent>, FetchError>;

    /// Get a human-readable name for this source.
    fn name(&self) -> &str;
}

/// A channel that delivers alert messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one text message. There is no partial delivery.
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;

    /// Get a human-readable name for this channel.
    fn name(&self) -> &str;
}

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
