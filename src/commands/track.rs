//! Interactive time tracking command.
//!
//! Starts the time recorder for an issue and keeps it running until the user
//! types `stop`, closes stdin or presses Ctrl-C. Typing another issue key
//! switches the recorder to that issue. Every finished session is logged to
//! Jira unless reporting is disabled.

use crate::api::{jira::Jira, WorklogReporter};
use crate::libs::{
    config::Config,
    formatter::format_minutes,
    messages::Message,
    recorder::TimeRecorder,
    session::{SessionState, StopOutcome, TrackedItem},
};
use crate::{msg_bail_anyhow, msg_debug, msg_error, msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;
use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::watch;

#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Issue key to track, e.g. PROJ-123
    #[arg(required = true)]
    key: String,

    /// Do not log recorded time to Jira
    #[arg(long)]
    no_report: bool,
}

pub async fn cmd(args: TrackArgs) -> Result<()> {
    let config = Config::read()?;
    let timer = config.timer().map_err(|e| msg_error_anyhow!(Message::InvalidTimerConfig(e.to_string())))?;

    let jira = config.jira.as_ref().map(Jira::new);
    if jira.is_none() && !args.no_report {
        msg_bail_anyhow!(Message::JiraNotConfigured);
    }
    let reporter = if args.no_report { None } else { jira.as_ref() };

    if !is_issue_key(&args.key) {
        msg_bail_anyhow!(Message::UnknownTrackingInput(args.key));
    }

    let recorder = TimeRecorder::new(timer);
    let mut current = resolve_item(jira.as_ref(), &args.key).await;
    recorder.start(current.clone()).await;
    msg_info!(Message::TrackingStarted(current.to_string()));
    msg_print!(Message::TrackingControlsHint);

    let renderer = tokio::spawn(render_display(recorder.subscribe_display(), recorder.subscribe_state()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        match next_input(&mut lines, ctrl_c.as_mut()).await? {
            TrackInput::Switch(key) => {
                let next = resolve_item(jira.as_ref(), &key).await;
                let previous = recorder.start(next.clone()).await;
                report_outcome(reporter, &current.key, previous).await;
                current = next;
                msg_info!(Message::TrackingStarted(current.to_string()));
            }
            TrackInput::Unknown(input) => msg_warning!(Message::UnknownTrackingInput(input)),
            TrackInput::Finish => break,
            TrackInput::Interrupted => {
                msg_info!(Message::ReceivedCtrlC);
                break;
            }
            TrackInput::SignalFailed(e) => {
                msg_error!(Message::CtrlCListenFailed(e));
                break;
            }
        }
    }

    let outcome = recorder.stop().await;
    renderer.abort();
    report_outcome(reporter, &current.key, outcome).await;
    msg_success!(Message::TrackingFinished);
    Ok(())
}

/// What the user asked for at the tracking prompt.
#[derive(Debug, PartialEq)]
enum TrackInput {
    Switch(String),
    Unknown(String),
    Finish,
    Interrupted,
    SignalFailed(String),
}

/// Waits for the next meaningful input line or the shutdown signal.
///
/// `shutdown` is polled across calls, so a signal that fires while the caller
/// is busy handling a switch is picked up by the next call. The signal wins
/// over pending input.
async fn next_input<R, S>(lines: &mut Lines<R>, mut shutdown: Pin<&mut S>) -> Result<TrackInput>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = io::Result<()>>,
{
    loop {
        tokio::select! {
            biased;
            signal = shutdown.as_mut() => {
                return Ok(match signal {
                    Ok(()) => TrackInput::Interrupted,
                    Err(e) => TrackInput::SignalFailed(e.to_string()),
                });
            }
            line = lines.next_line() => {
                let Some(input) = line? else {
                    return Ok(TrackInput::Finish);
                };
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                if input.eq_ignore_ascii_case("stop") {
                    return Ok(TrackInput::Finish);
                }
                return Ok(if is_issue_key(input) {
                    TrackInput::Switch(input.to_string())
                } else {
                    TrackInput::Unknown(input.to_string())
                });
            }
        }
    }
}

/// Accepts keys of the form `PROJ-123`, case-insensitively.
fn is_issue_key(input: &str) -> bool {
    let Some((project, number)) = input.split_once('-') else {
        return false;
    };
    project.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && project.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}

/// Looks up the issue summary, falling back to the bare key.
async fn resolve_item(jira: Option<&Jira>, key: &str) -> TrackedItem {
    let key = key.to_uppercase();
    let Some(jira) = jira else {
        return TrackedItem::new(&key, "");
    };

    match jira.issue(&key).await {
        Ok(issue) => issue.to_item(),
        Err(e) => {
            msg_warning!(Message::JiraFetchFailed(e.to_string()));
            TrackedItem::new(&key, "")
        }
    }
}

/// Redraws the live timer line whenever the recorder publishes a new value.
async fn render_display(mut display: watch::Receiver<String>, state: watch::Receiver<SessionState>) {
    while display.changed().await.is_ok() {
        let text = display.borrow_and_update().clone();
        if let SessionState::Active(item) = &*state.borrow() {
            print!("\r⏱  {} {}  ", item.key, text);
            let _ = std::io::stdout().flush();
        }
    }
}

/// Reports what happened to a finished session.
async fn report_outcome<R: WorklogReporter>(reporter: Option<&R>, key: &str, outcome: StopOutcome) {
    let recorded = match outcome {
        StopOutcome::NoActiveSession => {
            msg_debug!(Message::NoActiveSession);
            return;
        }
        StopOutcome::Unresponsive => {
            println!();
            msg_warning!(Message::RecorderUnresponsive(key.to_string()));
            return;
        }
        StopOutcome::Recorded(recorded) => recorded,
    };

    println!();
    msg_success!(Message::SessionRecorded(recorded.item.key.clone(), recorded.display()));

    let minutes = recorded.minutes();
    if minutes == 0 {
        msg_info!(Message::WorklogTooShort(recorded.item.key.clone()));
        return;
    }

    let time = format_minutes(minutes);
    match reporter {
        None => msg_info!(Message::ReportingDisabled(recorded.item.key.clone(), time)),
        Some(reporter) => match reporter.report(&recorded).await {
            Ok(()) => msg_success!(Message::WorklogReported(recorded.item.key.clone(), time)),
            Err(e) => msg_error!(Message::WorklogReportFailed(recorded.item.key.clone(), e.to_string())),
        },
    }
}
