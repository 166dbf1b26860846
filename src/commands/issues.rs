use crate::api::jira::Jira;
use crate::libs::{config::Config, messages::Message, view::View};
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_info, msg_print};
use anyhow::Result;

/// Lists the unresolved issues assigned to the configured Jira user.
pub async fn cmd() -> Result<()> {
    let Some(jira_config) = Config::read()?.jira else {
        msg_bail_anyhow!(Message::JiraNotConfigured);
    };

    let issues = Jira::new(&jira_config)
        .assigned_issues()
        .await
        .map_err(|e| msg_error_anyhow!(Message::JiraFetchFailed(e.to_string())))?;

    if issues.is_empty() {
        msg_info!(Message::NoIssuesAssigned);
        return Ok(());
    }

    msg_print!(Message::IssuesHeader, true);
    View::issues(&issues);
    Ok(())
}
