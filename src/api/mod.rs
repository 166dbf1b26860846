//! API client modules for external service integrations.
//!
//! The time recorder itself never talks to the network. Recorded sessions are
//! handed to a [`WorklogReporter`], which forwards them to the issue tracker.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jtrack::api::{jira::Jira, WorklogReporter};
//! use jtrack::libs::config::Config;
//!
//! # async fn demo(recorded: jtrack::libs::session::RecordedDuration) -> anyhow::Result<()> {
//! if let Some(jira_config) = Config::read()?.jira {
//!     Jira::new(&jira_config).report(&recorded).await?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::libs::session::RecordedDuration;
use anyhow::Result;

pub mod jira;

pub use jira::JiraConfig;

/// Destination for recorded session time.
///
/// Implementations persist or forward a [`RecordedDuration`]. Failures are
/// returned to the caller; the recorder is unaffected by them.
#[allow(async_fn_in_trait)]
pub trait WorklogReporter {
    /// Reports one recorded session.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration is too short to be reported or the
    /// remote service rejects it.
    async fn report(&self, recorded: &RecordedDuration) -> Result<()>;
}
