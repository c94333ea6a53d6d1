use question_relay::domain::{COMPLETION_MARKER, verify_marker};

#[test]
fn given_marker_literal_when_accessed_then_matches_wire_value() {
    assert_eq!(COMPLETION_MARKER, "<!--COMPLETE-->");
}

#[test]
fn given_result_with_trailing_marker_when_verifying_then_returns_marker() {
    assert_eq!(verify_marker("The train leaves at 08:00<!--COMPLETE-->"), COMPLETION_MARKER);
}

#[test]
fn given_marker_inside_text_when_verifying_then_still_complete() {
    assert_eq!(verify_marker("a<!--COMPLETE-->b"), COMPLETION_MARKER);
}

#[test]
fn given_pending_result_when_verifying_then_returns_empty() {
    assert_eq!(verify_marker(""), "");
    assert_eq!(verify_marker("partial <!--COMPLETE"), "");
}
