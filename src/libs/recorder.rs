//! Time recorder: owns the single active timing session.
//!
//! The recorder is the entry point for timing work. It guarantees that at
//! most one ticker task is alive at a time and that every session ends in a
//! well-defined [`StopOutcome`], even when the ticker stops responding.
//!
//! ## Transition Model
//!
//! All transitions run under one async lock, so starts and stops are applied
//! one after another:
//!
//! ```text
//!            start(A)                    start(B)
//!   Idle ───────────────▶ Active(A) ───────────────▶ Active(B)
//!    ▲                        │    (stops A first)       │
//!    │         stop()         │                          │
//!    └────────────────────────┴──────────────────────────┘
//! ```
//!
//! ## Stopping
//!
//! Stopping hands a [`StopRequest`] to the ticker and waits for its reply for
//! at most `stop_deadline`. If the reply does not arrive in time the ticker is
//! aborted and the session's time is reported as lost
//! ([`StopOutcome::Unresponsive`]). The abort is awaited for up to one tick
//! before the display is reset. The lock is held while waiting, never while
//! the ticker is counting.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jtrack::libs::config::TimerConfig;
//! use jtrack::libs::recorder::TimeRecorder;
//! use jtrack::libs::session::TrackedItem;
//!
//! # async fn demo() {
//! let recorder = TimeRecorder::new(TimerConfig::default());
//! recorder.start(TrackedItem::new("PROJ-1", "Fix login")).await;
//! // ...
//! let outcome = recorder.stop().await;
//! # }
//! ```

use super::config::TimerConfig;
use super::formatter::ZERO_DISPLAY;
use super::session::{SessionState, StopOutcome, TrackedItem};
use super::ticker::{self, Session, StopRequest, STOP_CHANNEL_CAPACITY};
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time;

/// Handle to the running ticker task of the active session.
struct ActiveTicker {
    item: TrackedItem,
    stop_tx: mpsc::Sender<StopRequest>,
    handle: JoinHandle<()>,
}

/// Serializes session transitions and publishes the session state and live display.
pub struct TimeRecorder {
    config: TimerConfig,
    active: Mutex<Option<ActiveTicker>>,
    state: watch::Sender<SessionState>,
    display: Arc<watch::Sender<String>>,
}

impl TimeRecorder {
    pub fn new(config: TimerConfig) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        let (display, _) = watch::channel(ZERO_DISPLAY.to_string());
        Self {
            config,
            active: Mutex::new(None),
            state,
            display: Arc::new(display),
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Starts timing `item`.
    ///
    /// A session that is already running is stopped first and its outcome
    /// returned. The new session starts only after the previous one has been
    /// fully resolved.
    pub async fn start(&self, item: TrackedItem) -> StopOutcome {
        let mut active = self.active.lock().await;
        let previous = self.stop_active(&mut active).await;

        let (stop_tx, stop_rx) = mpsc::channel(STOP_CHANNEL_CAPACITY);
        let session = Session::begin(item.clone());
        let handle = tokio::spawn(ticker::run(session, stop_rx, Arc::clone(&self.display), self.config.cadence()));

        tracing::debug!(item = %item.key, "session started");
        *active = Some(ActiveTicker {
            item: item.clone(),
            stop_tx,
            handle,
        });
        self.state.send_replace(SessionState::Active(item));

        previous
    }

    /// Stops the active session, if any.
    ///
    /// Calling this with nothing running returns [`StopOutcome::NoActiveSession`].
    pub async fn stop(&self) -> StopOutcome {
        let mut active = self.active.lock().await;
        self.stop_active(&mut active).await
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Current live display value.
    pub fn display(&self) -> String {
        self.display.borrow().clone()
    }

    pub fn subscribe_display(&self) -> watch::Receiver<String> {
        self.display.subscribe()
    }

    /// Stop protocol. Must be called with the session lock held.
    async fn stop_active(&self, active: &mut Option<ActiveTicker>) -> StopOutcome {
        let Some(mut ticker) = active.take() else {
            self.display.send_replace(ZERO_DISPLAY.to_string());
            self.state.send_if_modified(|state| {
                let changed = state.is_active();
                *state = SessionState::Idle;
                changed
            });
            return StopOutcome::NoActiveSession;
        };

        let (request, reply_rx) = StopRequest::new();
        let handoff = async {
            ticker.stop_tx.send(request).await.ok()?;
            reply_rx.await.ok()
        };

        let reply = time::timeout(self.config.deadline(), handoff).await;
        let outcome = match reply {
            Ok(Some(recorded)) => StopOutcome::Recorded(recorded),
            Ok(None) => {
                tracing::warn!(item = %ticker.item.key, "ticker exited without answering the stop request");
                self.abort_ticker(&mut ticker.handle).await;
                StopOutcome::Unresponsive
            }
            Err(_) => {
                tracing::warn!(
                    item = %ticker.item.key,
                    deadline_ms = self.config.stop_deadline,
                    "ticker did not acknowledge stop in time, aborting it"
                );
                self.abort_ticker(&mut ticker.handle).await;
                StopOutcome::Unresponsive
            }
        };

        self.display.send_replace(ZERO_DISPLAY.to_string());
        self.state.send_replace(SessionState::Idle);
        outcome
    }

    /// Aborts a ticker and waits, for at most one tick, until the task is gone.
    ///
    /// Abort only lands at the task's next yield point. Waiting here keeps a
    /// ticker that is mid-poll on another worker from publishing after the
    /// display has been reset. A task that does not finish within the grace
    /// period is left to the runtime.
    async fn abort_ticker(&self, handle: &mut JoinHandle<()>) {
        handle.abort();
        if time::timeout(self.config.cadence(), handle).await.is_err() {
            tracing::warn!("aborted ticker did not finish within one tick");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;
    use tokio::time::Instant;

    /// Installs a ticker that holds its request channel but never reads it.
    ///
    /// The returned receiver resolves with an error once the task is dropped.
    async fn install_stalled_ticker(recorder: &TimeRecorder, item: TrackedItem) -> oneshot::Receiver<()> {
        let (stop_tx, stop_rx) = mpsc::channel(STOP_CHANNEL_CAPACITY);
        let (alive_tx, alive_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _stop_rx = stop_rx;
            let _alive = alive_tx;
            std::future::pending::<()>().await;
        });

        *recorder.active.lock().await = Some(ActiveTicker {
            item: item.clone(),
            stop_tx,
            handle,
        });
        recorder.state.send_replace(SessionState::Active(item));
        alive_rx
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_ticker_is_aborted_after_deadline() {
        let recorder = TimeRecorder::new(TimerConfig::default());
        let mut alive = install_stalled_ticker(&recorder, TrackedItem::new("JT-1", "Stalled")).await;

        let started = Instant::now();
        let outcome = recorder.stop().await;
        let waited = started.elapsed();

        assert_eq!(outcome, StopOutcome::Unresponsive);
        assert!(waited >= Duration::from_millis(2000), "returned early: {:?}", waited);
        assert!(waited <= Duration::from_millis(2200), "returned late: {:?}", waited);
        assert_eq!(recorder.state(), SessionState::Idle);
        assert_eq!(recorder.display(), ZERO_DISPLAY);

        // The aborted task is already gone, together with everything it owned.
        assert!(matches!(alive.try_recv(), Err(oneshot::error::TryRecvError::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_stop_request_is_unresponsive() {
        let recorder = TimeRecorder::new(TimerConfig::default());
        let item = TrackedItem::new("JT-4", "Drops requests");
        let (stop_tx, mut stop_rx) = mpsc::channel::<StopRequest>(STOP_CHANNEL_CAPACITY);
        let (alive_tx, mut alive_rx) = oneshot::channel::<()>();
        let display = Arc::clone(&recorder.display);
        let handle = tokio::spawn(async move {
            let _alive = alive_tx;
            display.send_replace("00:00:07".to_string());
            // Take the request and let its reply slot go unanswered.
            drop(stop_rx.recv().await);
            std::future::pending::<()>().await;
        });
        *recorder.active.lock().await = Some(ActiveTicker {
            item: item.clone(),
            stop_tx,
            handle,
        });
        recorder.state.send_replace(SessionState::Active(item));
        tokio::task::yield_now().await;

        let started = Instant::now();
        let outcome = recorder.stop().await;
        let waited = started.elapsed();

        assert_eq!(outcome, StopOutcome::Unresponsive);
        assert!(waited < Duration::from_millis(100), "waited for the deadline: {:?}", waited);
        assert_eq!(recorder.state(), SessionState::Idle);
        assert_eq!(recorder.display(), ZERO_DISPLAY);
        assert!(matches!(alive_rx.try_recv(), Err(oneshot::error::TryRecvError::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_publishes_idle_once() {
        let recorder = TimeRecorder::new(TimerConfig::default());
        let mut state = recorder.subscribe_state();
        state.borrow_and_update();

        recorder.stop().await;
        assert!(!state.has_changed().unwrap(), "idle stop notified observers");

        recorder.start(TrackedItem::new("JT-5", "")).await;
        state.borrow_and_update();
        recorder.stop().await;
        assert!(state.has_changed().unwrap());
        assert_eq!(*state.borrow_and_update(), SessionState::Idle);

        recorder.stop().await;
        assert!(!state.has_changed().unwrap(), "second stop notified observers");
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_replaces_stalled_ticker() {
        let recorder = TimeRecorder::new(TimerConfig::default());
        let _alive = install_stalled_ticker(&recorder, TrackedItem::new("JT-1", "Stalled")).await;

        let next = TrackedItem::new("JT-2", "Next");
        let previous = recorder.start(next.clone()).await;

        assert_eq!(previous, StopOutcome::Unresponsive);
        assert_eq!(recorder.state(), SessionState::Active(next));
        assert_eq!(recorder.stop().await.recorded().map(|r| r.item.key.as_str()), Some("JT-2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_deadline_is_honored() {
        let config = TimerConfig {
            tick_interval: 100,
            stop_deadline: 300,
        };
        let recorder = TimeRecorder::new(config);
        let _alive = install_stalled_ticker(&recorder, TrackedItem::new("JT-3", "")).await;

        let started = Instant::now();
        assert_eq!(recorder.stop().await, StopOutcome::Unresponsive);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(300) && waited < Duration::from_millis(400));
    }
}
