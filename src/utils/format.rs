//! Clock-face text formatting for remaining times

use crate::schedule::Seconds;

/// Format seconds as `M:SS`, or `H:MM:SS` from one hour up.
///
/// Fractions round up, so a countdown shows `0:01` until it actually hits
/// zero.
pub fn format_clock(seconds: Seconds) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.ceil() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
