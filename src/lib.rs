//! # jtrack - Jira issue time tracking
//!
//! A command-line utility that times work on Jira issues with a live timer
//! and logs the recorded time back to Jira as worklogs.
//!
//! ## Features
//!
//! - **Time Recorder**: One active session at a time, live elapsed display,
//!   bounded-time stop even when the background timer stalls
//! - **Issue Switching**: Starting a new issue cleanly ends the previous session
//! - **Jira Integration**: List assigned issues and submit worklogs
//! - **Configuration**: Interactive setup of the Jira connection and timer settings
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jtrack::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
