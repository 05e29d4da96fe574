//! Line formatting - fixed timestamp-prefixed layout

use chrono::Local;

/// Format one message into its final line form.
///
/// Produces `[YYYY-MM-DD HH:MM:SS] - <message>\n`. The timestamp is captured
/// at call time, not at submission time, so two messages submitted together
/// may carry different timestamps when their writer tasks run at different
/// instants. Message content is not escaped; embedded newlines pass through
/// verbatim. Exactly one trailing newline is appended when the message does
/// not already end with one.
pub fn format_line(message: &str) -> String {
    let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
    if message.ends_with('\n') {
        format!("[{ts}] - {message}")
    } else {
        format!("[{ts}] - {message}\n")
    }
}
