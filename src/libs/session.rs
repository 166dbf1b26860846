//! Session data shared between the time recorder and its observers.
//!
//! A session is one contiguous interval of timing against a single tracked
//! item. The recorder publishes [`SessionState`] to observers and hands
//! [`RecordedDuration`] values back to callers when a session ends. What
//! happened to the previous session is always reported as a [`StopOutcome`].

use super::formatter::{format_elapsed, recordable_minutes};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The thing being timed, typically a Jira issue.
///
/// The recorder only needs the key for identification. The summary is
/// carried along for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedItem {
    /// Issue key, e.g. `PROJ-123`.
    pub key: String,
    /// Short human-readable description of the issue.
    pub summary: String,
}

impl TrackedItem {
    pub fn new(key: &str, summary: &str) -> Self {
        Self {
            key: key.to_string(),
            summary: summary.to_string(),
        }
    }
}

impl fmt::Display for TrackedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.summary.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{} {}", self.key, self.summary)
        }
    }
}

/// Observable state of the recorder.
///
/// `Active` is published if and only if a ticker task is running for the item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session is active.
    #[default]
    Idle,
    /// A session is timing the given item.
    Active(TrackedItem),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    /// Returns the item being timed, if any.
    pub fn item(&self) -> Option<&TrackedItem> {
        match self {
            SessionState::Active(item) => Some(item),
            SessionState::Idle => None,
        }
    }
}

/// Final result of a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDuration {
    pub item: TrackedItem,
    /// Wall-clock time at which the session started, used as the worklog start.
    pub started: DateTime<Local>,
    pub elapsed: Duration,
}

impl RecordedDuration {
    /// Elapsed time truncated to whole minutes, the unit reported upstream.
    pub fn minutes(&self) -> u64 {
        recordable_minutes(&self.elapsed)
    }

    /// Elapsed time in the live display format.
    pub fn display(&self) -> String {
        format_elapsed(&self.elapsed)
    }
}

/// What happened to a session when it was asked to stop.
///
/// Returned by both `stop` and `start` (for the session `start` replaced).
/// None of the variants is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// There was nothing to stop.
    NoActiveSession,
    /// The ticker acknowledged the stop and handed back its duration.
    Recorded(RecordedDuration),
    /// The ticker did not acknowledge in time and was aborted. Its time is lost.
    Unresponsive,
}

impl StopOutcome {
    pub fn recorded(&self) -> Option<&RecordedDuration> {
        match self {
            StopOutcome::Recorded(recorded) => Some(recorded),
            _ => None,
        }
    }
}
