use super::WorklogReporter;
use crate::libs::{config::ConfigModule, messages::Message, session::RecordedDuration, session::TrackedItem};
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SEARCH_URL: &str = "rest/api/2/search";
const ISSUE_URL: &str = "rest/api/2/issue";
const ASSIGNED_JQL: &str = "assignee = currentUser() AND resolution = Unresolved ORDER BY updated DESC";
const MAX_RESULTS: &str = "50";
const WORKLOG_STARTED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";
const WORKLOG_COMMENT: &str = "Logged by jtrack";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JiraError {
    #[error("less than a minute recorded on {0}, nothing to report")]
    NothingToReport(String),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JiraIssue {
    pub id: String,
    pub key: String,
    pub fields: JiraIssueFields,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JiraIssueFields {
    pub summary: String,
    pub status: Option<JiraStatus>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JiraStatus {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JiraSearchResults {
    pub issues: Vec<JiraIssue>,
}

impl JiraIssue {
    pub fn status_name(&self) -> &str {
        self.fields.status.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }

    pub fn to_item(&self) -> TrackedItem {
        TrackedItem::new(&self.key, &self.fields.summary)
    }
}

/// Body of a worklog submission.
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorklogRequest {
    pub time_spent_seconds: u64,
    pub started: String,
    pub comment: String,
}

impl WorklogRequest {
    /// Builds a worklog from a recorded session, truncated to whole minutes.
    pub fn from_recorded(recorded: &RecordedDuration) -> Result<Self, JiraError> {
        let minutes = recorded.minutes();
        if minutes == 0 {
            return Err(JiraError::NothingToReport(recorded.item.key.clone()));
        }
        Ok(Self {
            time_spent_seconds: minutes * 60,
            started: recorded.started.format(WORKLOG_STARTED_FORMAT).to_string(),
            comment: WORKLOG_COMMENT.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct Jira {
    client: Client,
    config: JiraConfig,
}

impl Jira {
    pub fn new(config: &JiraConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Fetches unresolved issues assigned to the configured user.
    pub async fn assigned_issues(&self) -> Result<Vec<JiraIssue>> {
        let url = self.url(SEARCH_URL);
        let res = self
            .client
            .get(&url)
            .basic_auth(&self.config.login, Some(&self.config.api_token))
            .query(&[("jql", ASSIGNED_JQL), ("fields", "summary,status"), ("maxResults", MAX_RESULTS)])
            .send()
            .await?;

        if !res.status().is_success() {
            msg_bail_anyhow!(Message::JiraRequestFailed(res.status().as_u16(), url));
        }

        let search_results = res.json::<JiraSearchResults>().await?;
        tracing::debug!(count = search_results.issues.len(), "fetched assigned issues");
        Ok(search_results.issues)
    }

    /// Fetches a single issue by key.
    pub async fn issue(&self, key: &str) -> Result<JiraIssue> {
        let url = self.url(&format!("{}/{}", ISSUE_URL, key));
        let res = self
            .client
            .get(&url)
            .basic_auth(&self.config.login, Some(&self.config.api_token))
            .query(&[("fields", "summary,status")])
            .send()
            .await?;

        match res.status() {
            StatusCode::NOT_FOUND => msg_bail_anyhow!(Message::IssueNotFound(key.to_string())),
            status if !status.is_success() => msg_bail_anyhow!(Message::JiraRequestFailed(status.as_u16(), url)),
            _ => Ok(res.json::<JiraIssue>().await?),
        }
    }
}

impl WorklogReporter for Jira {
    async fn report(&self, recorded: &RecordedDuration) -> Result<()> {
        let body = WorklogRequest::from_recorded(recorded)?;
        let url = self.url(&format!("{}/{}/worklog", ISSUE_URL, recorded.item.key));
        let res = self
            .client
            .post(&url)
            .basic_auth(&self.config.login, Some(&self.config.api_token))
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            msg_bail_anyhow!(Message::JiraRequestFailed(res.status().as_u16(), url));
        }

        tracing::debug!(item = %recorded.item.key, seconds = body.time_spent_seconds, "worklog submitted");
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct JiraConfig {
    pub login: String,
    pub api_url: String,
    pub api_token: String,
}

impl JiraConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "jira".to_string(),
            name: "Jira".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or(Self {
            login: "".to_string(),
            api_url: "".to_string(),
            api_token: "".to_string(),
        });
        msg_print!(Message::ConfigModuleJira);

        let login = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptJiraLogin.to_string())
            .default(config.login)
            .interact_text()?;
        let api_url = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptJiraApiUrl.to_string())
            .default(config.api_url)
            .interact_text()?;
        // Empty input keeps the stored token.
        let api_token = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptJiraApiToken.to_string())
            .allow_empty_password(true)
            .interact()?;

        Ok(Self {
            login,
            api_url,
            api_token: if api_token.is_empty() { config.api_token } else { api_token },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::time::Duration;

    fn recorded(elapsed: Duration) -> RecordedDuration {
        RecordedDuration {
            item: TrackedItem::new("PROJ-7", "Write docs"),
            started: Local.with_ymd_and_hms(2025, 3, 4, 9, 15, 0).unwrap(),
            elapsed,
        }
    }

    #[test]
    fn test_worklog_truncates_to_whole_minutes() {
        let body = WorklogRequest::from_recorded(&recorded(Duration::from_secs(5_459))).unwrap();
        assert_eq!(body.time_spent_seconds, 90 * 60);
        assert!(body.started.starts_with("2025-03-04T09:15:00.000"), "{}", body.started);
    }

    #[test]
    fn test_worklog_serializes_jira_field_names() {
        let body = WorklogRequest::from_recorded(&recorded(Duration::from_secs(120))).unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["timeSpentSeconds"].as_u64(), Some(120));
        assert_eq!(json["comment"].as_str(), Some(WORKLOG_COMMENT));
        assert!(json.get("time_spent_seconds").is_none());
    }

    #[test]
    fn test_worklog_rejects_less_than_a_minute() {
        let err = WorklogRequest::from_recorded(&recorded(Duration::from_secs(59))).unwrap_err();
        assert_eq!(err, JiraError::NothingToReport("PROJ-7".to_string()));
    }

    #[test]
    fn test_issue_maps_to_tracked_item() {
        let issue: JiraIssue = serde_json::from_str(
            r#"{"id":"10001","key":"PROJ-7","fields":{"summary":"Write docs","status":{"name":"In Progress"}}}"#,
        )
        .unwrap();
        assert_eq!(issue.to_item(), TrackedItem::new("PROJ-7", "Write docs"));
        assert_eq!(issue.status_name(), "In Progress");
    }
}
