/// Placeholder shown when a position or length is unknown
pub const UNKNOWN_TIME: &str = "--:--";

/// Format whole seconds for the progress and duration labels.
///
/// Negative input means "unknown". Under an hour the format is `MM:SS`,
/// above it `H:MM:SS`.
pub fn format_seconds(seconds: i32) -> String {
    if seconds < 0 {
        return UNKNOWN_TIME.to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
