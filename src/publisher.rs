//! The refresh cycle and the published reading.
//!
//! [`ReadingPublisher`] owns the only shared state in the crate: the latest
//! [`Reading`]. It sits in a `watch` channel, so replacing it is a single send
//! and readers always observe one whole cycle's result. Refreshes are
//! serialized with a mutex taken via `try_lock`; a trigger arriving while a
//! cycle is running is coalesced into that cycle.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{watch, Mutex};

use crate::feed::{fetch_feed, parse_document, FeedError, FetchError};
use crate::weather::{Attributes, EntryError, Reading, ReadingParser};

/// Everything that can end a refresh cycle early.
///
/// Never escapes [`ReadingPublisher::refresh`]; it is logged and the previous
/// reading stays published.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Entry(#[from] EntryError),
    /// The blocking parse task panicked or was cancelled
    #[error("Feed parse task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// How a call to [`ReadingPublisher::refresh`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new reading was published
    Updated,
    /// The cycle failed; the previous reading (if any) is still published
    Retained,
    /// Another refresh was already in flight; this trigger was dropped
    Coalesced,
}

pub struct ReadingPublisher {
    name: String,
    url: String,
    client: reqwest::Client,
    parser: ReadingParser,
    current: watch::Sender<Option<Arc<Reading>>>,
    in_flight: Mutex<()>,
}

impl ReadingPublisher {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        client: reqwest::Client,
        parser: ReadingParser,
    ) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            name: name.into(),
            url: url.into(),
            client,
            parser,
            current,
            in_flight: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The most recently published reading, if any cycle has succeeded yet.
    pub fn current(&self) -> Option<Arc<Reading>> {
        self.current.borrow().clone()
    }

    /// The host-facing state value: the normalized condition.
    pub fn state(&self) -> Option<String> {
        self.current().and_then(|r| r.condition.clone())
    }

    /// Calls `f` with the attribute view of the current reading.
    pub fn with_attributes<R>(&self, f: impl FnOnce(Option<Attributes<'_>>) -> R) -> R {
        let current = self.current();
        f(current
            .as_deref()
            .map(|r| r.attributes(self.parser.pressure_unit())))
    }

    /// A receiver that sees every reading published from now on.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Reading>>> {
        self.current.subscribe()
    }

    /// Runs one fetch/parse/publish cycle.
    ///
    /// Failures are logged and swallowed; the next scheduled call is the retry.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::debug!(url = %self.url, "Refresh already in flight, coalescing trigger");
            return RefreshOutcome::Coalesced;
        };

        match self.run_cycle().await {
            Ok(reading) => {
                tracing::info!(
                    name = %self.name,
                    condition = reading.condition.as_deref().unwrap_or("-"),
                    temperature = reading.temperature.as_deref().unwrap_or("-"),
                    "Published new reading"
                );
                self.current.send_replace(Some(Arc::new(reading)));
                RefreshOutcome::Updated
            }
            Err(e) => {
                tracing::warn!(
                    name = %self.name,
                    url = %self.url,
                    error = %e,
                    "Refresh failed, keeping previous reading"
                );
                RefreshOutcome::Retained
            }
        }
    }

    async fn run_cycle(&self) -> Result<Reading, RefreshError> {
        let bytes = fetch_feed(&self.client, &self.url).await?;

        let entries = tokio::task::spawn_blocking(move || parse_document(&bytes)).await??;
        // parse_document guarantees at least one entry
        let entry = entries.into_iter().next().ok_or(FeedError::Empty)?;

        Ok(self.parser.parse(&entry)?)
    }
}

impl std::fmt::Debug for ReadingPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadingPublisher")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("current", &*self.current.borrow())
            .finish()
    }
}
