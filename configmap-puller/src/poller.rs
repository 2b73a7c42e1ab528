//! The fetch, compare, write, sleep loop
use std::{convert::Infallible, time::Duration};

use tracing::{debug, info};

use crate::{ConfigSource, Result, Sink, WatchTarget};

/// Default time between two polls
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// What a single poll did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// The value differed from the last one seen and was written
    Written,
    /// The value matched the last one seen, nothing was touched
    Unchanged,
}

/// Mirrors one ConfigMap key into a [`Sink`]
///
/// Writes only happen when the fetched value differs from the last value
/// written. Before the first successful write nothing has been seen, so the
/// first poll always writes, even an empty value.
pub struct Poller<S, W> {
    target: WatchTarget,
    source: S,
    sink: W,
    interval: Duration,
    last_seen: Option<String>,
}

impl<S, W> Poller<S, W>
where
    S: ConfigSource,
    W: Sink,
{
    /// Create a poller with the [`DEFAULT_INTERVAL`]
    pub fn new(target: WatchTarget, source: S, sink: W) -> Self {
        Self {
            target,
            source,
            sink,
            interval: DEFAULT_INTERVAL,
            last_seen: None,
        }
    }

    /// Set the time slept between polls
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The value last written, if any
    pub fn last_seen(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }

    /// Fetch once and write if the value changed
    ///
    /// A key missing from the ConfigMap reads as the empty string.
    /// On error the last seen value is left as it was.
    pub async fn poll_once(&mut self) -> Result<PollOutcome> {
        let target = &self.target;
        let mut data = self.source.fetch(target).await?;
        info!(namespace = %target.namespace, name = %target.name, "found configmap");
        let value = data.remove(&target.key).unwrap_or_default();
        debug!(key = %target.key, data = %value, "extracted value");

        if self.last_seen.as_deref() == Some(value.as_str()) {
            info!("nothing changed - not writing file");
            return Ok(PollOutcome::Unchanged);
        }
        self.sink.write(&value).await?;
        info!(
            key = %target.key,
            path = %self.sink.location(),
            bytes = value.len(),
            "wrote data to file"
        );
        self.last_seen = Some(value);
        Ok(PollOutcome::Written)
    }

    /// Poll forever, sleeping the interval between polls
    ///
    /// Only returns on the first error. Nothing is retried.
    pub async fn run(mut self) -> Result<Infallible> {
        info!(
            watch = %self.target,
            interval_secs = self.interval.as_secs_f64(),
            "starting poller"
        );
        loop {
            self.poll_once().await?;
            tokio::time::sleep(self.interval).await;
        }
    }
}
