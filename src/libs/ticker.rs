//! Background ticker task for a running session.
//!
//! The ticker owns the session start time. On every cadence period it
//! republishes the elapsed time to the live display channel. It also
//! answers exactly one [`StopRequest`], after which it terminates.
//!
//! ## Stop Handoff
//!
//! ```text
//! ┌─────────────┐  StopRequest (mpsc, cap 1)   ┌─────────────┐
//! │   caller    │ ───────────────────────────▶ │   ticker    │
//! │ (recorder)  │ ◀─────────────────────────── │    task     │
//! └─────────────┘  RecordedDuration (oneshot)  └─────────────┘
//! ```
//!
//! Each session gets its own request channel and each stop attempt its own
//! reply slot, so neither is ever reused.

use super::formatter::format_elapsed;
use super::session::{RecordedDuration, TrackedItem};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant};

/// At most one stop request is ever in flight per session.
pub const STOP_CHANNEL_CAPACITY: usize = 1;

/// A request for the ticker to stop, carrying the slot for its final duration.
#[derive(Debug)]
pub struct StopRequest {
    reply: oneshot::Sender<RecordedDuration>,
}

impl StopRequest {
    /// Creates a request together with the receiving end of its result slot.
    pub fn new() -> (Self, oneshot::Receiver<RecordedDuration>) {
        let (reply, reply_rx) = oneshot::channel();
        (Self { reply }, reply_rx)
    }

    /// Fills the result slot. Consumes the request so it cannot be answered twice.
    fn fulfil(self, recorded: RecordedDuration) {
        if self.reply.send(recorded).is_err() {
            tracing::debug!("stop requester gave up before the ticker replied");
        }
    }
}

/// One timing run against a single item.
#[derive(Debug, Clone)]
pub struct Session {
    pub item: TrackedItem,
    started_at: Instant,
    started: DateTime<Local>,
}

impl Session {
    pub fn begin(item: TrackedItem) -> Self {
        Self {
            item,
            started_at: Instant::now(),
            started: Local::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    fn finish(self) -> RecordedDuration {
        let elapsed = self.elapsed();
        RecordedDuration {
            item: self.item,
            started: self.started,
            elapsed,
        }
    }
}

/// Runs the ticker loop until a stop request arrives or the channel closes.
///
/// Each cycle races the next stop request against the cadence timeout, so a
/// stop is answered within one cadence period at most.
pub async fn run(session: Session, mut stop_rx: mpsc::Receiver<StopRequest>, display: Arc<watch::Sender<String>>, cadence: Duration) {
    tracing::debug!(item = %session.item.key, "ticker started");

    loop {
        match time::timeout(cadence, stop_rx.recv()).await {
            Err(_) => {
                display.send_replace(format_elapsed(&session.elapsed()));
            }
            Ok(Some(request)) => {
                let recorded = session.finish();
                tracing::debug!(item = %recorded.item.key, elapsed_secs = recorded.elapsed.as_secs(), "ticker stopped");
                request.fulfil(recorded);
                return;
            }
            Ok(None) => {
                // Recorder dropped without stopping us.
                tracing::debug!(item = %session.item.key, "ticker channel closed");
                return;
            }
        }
    }
}
