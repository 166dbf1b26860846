//! Core library modules for the jtrack application.
//!
//! ## Features
//!
//! - **Time Recording**: Session state, background ticker, recorder engine
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **User Interface**: Duration formatting, console tables
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
//! println!("{}", recorder.display());
//! # }
//! ```

pub mod config;
pub mod data_storage;
pub mod formatter;
pub mod messages;
pub mod recorder;
pub mod session;
pub mod ticker;
pub mod view;
