//! Display implementation for jtrack application messages.
//!
//! All user-facing text lives here, in one `Display` implementation for the
//! [`Message`] enum. Callers never format user text themselves; they pick a
//! message variant and hand it to one of the `msg_*` macros.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    /// Renders the message as the text shown to the user.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jtrack::libs::messages::Message;
    ///
    /// let message = Message::WorklogReported("PROJ-1".to_string(), "01:30".to_string());
    /// assert_eq!(message.to_string(), "Logged 01:30 to PROJ-1");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigNotFound => "Configuration file not found, nothing to delete".to_string(),
            Message::ConfigModuleJira => "Jira settings".to_string(),
            Message::ConfigModuleTimer => "Timer settings".to_string(),
            Message::InvalidTimerConfig(reason) => format!("Invalid timer configuration: {}", reason),

            // === JIRA MESSAGES ===
            Message::JiraNotConfigured => "Jira is not configured. Run `jtrack init` first.".to_string(),
            Message::JiraFetchFailed(error) => format!("[jtrack] Failed to get Jira issues: {}", error),
            Message::JiraRequestFailed(status, url) => format!("Jira request to {} failed with status {}", url, status),
            Message::IssueNotFound(key) => format!("Issue {} not found", key),
            Message::IssuesHeader => "Assigned issues".to_string(),
            Message::NoIssuesAssigned => "No unresolved issues are assigned to you.".to_string(),

            // === TRACKING MESSAGES ===
            Message::TrackingStarted(item) => format!("Tracking {}", item),
            Message::TrackingControlsHint => "Type an issue key to switch, `stop` or Ctrl-C to finish.".to_string(),
            Message::SessionRecorded(key, elapsed) => format!("Recorded {} on {}", elapsed, key),
            Message::NoActiveSession => "No session was active.".to_string(),
            Message::RecorderUnresponsive(key) => format!("Timer for {} did not respond and was stopped. Its time was lost.", key),
            Message::TrackingFinished => "Tracking finished.".to_string(),
            Message::UnknownTrackingInput(input) => format!("Unknown input: {}", input),

            // === WORKLOG MESSAGES ===
            Message::WorklogReported(key, time) => format!("Logged {} to {}", time, key),
            Message::WorklogTooShort(key) => format!("Less than a minute on {}, nothing to log.", key),
            Message::WorklogReportFailed(key, error) => format!("Failed to log work to {}: {}", key, error),
            Message::ReportingDisabled(key, time) => format!("Reporting disabled, {} on {} was not logged.", time, key),

            // === SIGNAL MESSAGES ===
            Message::ReceivedCtrlC => "Received Ctrl-C, stopping the timer...".to_string(),
            Message::CtrlCListenFailed(error) => format!("Failed to listen for Ctrl-C: {}", error),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptTickInterval => "Timer tick interval (ms)".to_string(),
            Message::PromptStopDeadline => "Stop deadline (ms)".to_string(),
            Message::PromptJiraLogin => "Enter your Jira login".to_string(),
            Message::PromptJiraApiUrl => "Enter the Jira API URL".to_string(),
            Message::PromptJiraApiToken => "Enter your Jira API token".to_string(),
        };

        write!(f, "{}", text)
    }
}
