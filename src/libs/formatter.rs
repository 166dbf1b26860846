//! Time duration formatting utilities for the live timer and worklog reports.
//!
//! This module converts elapsed session time into the strings shown while a
//! session is running and into the whole-minute values reported to Jira.
//!
//! ## Format Specifications
//!
//! ### Live Display Format
//! Elapsed time follows the "HH:MM:SS" pattern:
//! - Hours, minutes and seconds are always zero-padded to 2 digits
//! - Leading zero components are still printed ("00:00:05", never "5")
//! - Durations of a day or more are prefixed with a pluralized day count
//!
//! ### Examples
//! - 5 seconds → "00:00:05"
//! - 1 hour 2 minutes 3 seconds → "01:02:03"
//! - 1 day 1 hour → "1 day 01:00:00"
//! - 3 days → "3 days 00:00:00"
//!
//! ### Recordable Minutes
//! Reported time is truncated to whole minutes. Fractional minutes are
//! dropped, not rounded: 90 seconds records as 1 minute, 59 seconds as 0.
//!
//! ## Examples
//!
//! ```rust
//! use jtrack::libs::formatter::{format_elapsed, parse_elapsed, recordable_minutes};
//! use std::time::Duration;
//!
//! let elapsed = Duration::from_secs(3_725);
//! assert_eq!(format_elapsed(&elapsed), "01:02:05");
//! assert_eq!(parse_elapsed("01:02:05"), Some(elapsed));
//! assert_eq!(recordable_minutes(&elapsed), 62);
//! ```

use std::time::Duration;

/// Display value of a zero duration, shown whenever no session is running.
pub const ZERO_DISPLAY: &str = "00:00:00";

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Formats an elapsed duration for the live timer display.
///
/// Sub-second precision is discarded. Days are only printed when the
/// duration spans at least one full day.
///
/// # Examples
///
/// ```rust
/// use jtrack::libs::formatter::format_elapsed;
/// use std::time::Duration;
///
/// assert_eq!(format_elapsed(&Duration::ZERO), "00:00:00");
/// assert_eq!(format_elapsed(&Duration::from_millis(5_900)), "00:00:05");
/// assert_eq!(format_elapsed(&Duration::from_secs(86_400 + 3_600)), "1 day 01:00:00");
/// assert_eq!(format_elapsed(&Duration::from_secs(2 * 86_400)), "2 days 00:00:00");
/// ```
pub fn format_elapsed(duration: &Duration) -> String {
    let total = duration.as_secs();
    let days = total / SECS_PER_DAY;
    let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
    let mins = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = total % SECS_PER_MINUTE;

    match days {
        0 => format!("{:02}:{:02}:{:02}", hours, mins, secs),
        1 => format!("1 day {:02}:{:02}:{:02}", hours, mins, secs),
        _ => format!("{} days {:02}:{:02}:{:02}", days, hours, mins, secs),
    }
}

/// Parses a string produced by [`format_elapsed`] back into a duration.
///
/// Returns `None` for anything that is not a well-formed display value:
/// minutes or seconds of 60 or more, hours of 24 or more next to a day
/// count, or a day unit that does not agree with the count.
pub fn parse_elapsed(text: &str) -> Option<Duration> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let (days, clock) = match parts.as_slice() {
        [clock] => (0, *clock),
        [count, unit, clock] => {
            let days = count.parse::<u64>().ok()?;
            match (days, *unit) {
                (1, "day") => (days, *clock),
                (2.., "days") => (days, *clock),
                _ => return None,
            }
        }
        _ => return None,
    };

    let fields: Vec<u64> = clock.split(':').map(|f| f.parse::<u64>().ok()).collect::<Option<_>>()?;
    let [hours, mins, secs] = fields.as_slice() else {
        return None;
    };

    if *mins >= 60 || *secs >= 60 || (days > 0 && *hours >= 24) {
        return None;
    }

    let total = days
        .checked_mul(SECS_PER_DAY)?
        .checked_add(hours.checked_mul(SECS_PER_HOUR)?)?
        .checked_add(mins * SECS_PER_MINUTE + secs)?;
    Some(Duration::from_secs(total))
}

/// Truncates a duration to whole minutes for reporting.
///
/// # Examples
///
/// ```rust
/// use jtrack::libs::formatter::recordable_minutes;
/// use std::time::Duration;
///
/// assert_eq!(recordable_minutes(&Duration::from_secs(59)), 0);
/// assert_eq!(recordable_minutes(&Duration::from_secs(90)), 1);
/// ```
pub fn recordable_minutes(duration: &Duration) -> u64 {
    duration.as_secs() / SECS_PER_MINUTE
}

/// Formats a number of minutes into a "HH:MM" string.
///
/// Used for recorded worklog summaries, where seconds are never shown.
/// Hours are not wrapped at 24.
///
/// ```rust
/// use jtrack::libs::formatter::format_minutes;
///
/// assert_eq!(format_minutes(90), "01:30");
/// assert_eq!(format_minutes(1_500), "25:00");
/// ```
pub fn format_minutes(minutes: u64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
