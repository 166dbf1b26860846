#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleJira,
    ConfigModuleTimer,
    InvalidTimerConfig(String), // reason

    // === JIRA MESSAGES ===
    JiraNotConfigured,
    JiraFetchFailed(String),        // error
    JiraRequestFailed(u16, String), // status, url
    IssueNotFound(String),          // key
    IssuesHeader,
    NoIssuesAssigned,

    // === TRACKING MESSAGES ===
    TrackingStarted(String),         // item
    TrackingControlsHint,
    SessionRecorded(String, String), // key, elapsed
    NoActiveSession,
    RecorderUnresponsive(String), // key
    TrackingFinished,
    UnknownTrackingInput(String),

    // === WORKLOG MESSAGES ===
    WorklogReported(String, String), // key, HH:MM
    WorklogTooShort(String),         // key
    WorklogReportFailed(String, String),
    ReportingDisabled(String, String), // key, HH:MM

    // === SIGNAL MESSAGES ===
    ReceivedCtrlC,
    CtrlCListenFailed(String),

    // === PROMPTS ===
    PromptSelectModules,
    PromptTickInterval,
    PromptStopDeadline,
    PromptJiraLogin,
    PromptJiraApiUrl,
    PromptJiraApiToken,
}
