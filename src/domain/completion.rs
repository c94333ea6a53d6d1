/// Sentinel appended to every finished answer. Its presence in a stored
/// result is the only completion signal a polling client ever sees.
pub const COMPLETION_MARKER: &str = "<!--COMPLETE-->";

/// Returns the marker when `result` carries it, otherwise an empty string.
pub fn verify_marker(result: &str) -> &'static str {
    if result.contains(COMPLETION_MARKER) {
        COMPLETION_MARKER
    } else {
        ""
    }
}
