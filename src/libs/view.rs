use crate::api::jira::JiraIssue;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn issues(issues: &[JiraIssue]) {
        let mut table = Table::new();

        table.add_row(row!["#", "KEY", "SUMMARY", "STATUS"]);
        for (index, issue) in issues.iter().enumerate() {
            table.add_row(row![index + 1, issue.key, issue.fields.summary, issue.status_name()]);
        }
        table.printstd();
    }
}
