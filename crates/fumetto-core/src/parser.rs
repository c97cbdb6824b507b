//! Frame document parsing and emission (JSON).
//!
//! Frames are authored as JSON objects; serde does the heavy lifting and the
//! model's defaults fill in tuning values. Structural problems that are
//! representable-but-wrong (dangling anchors, duplicate ids) are lint's
//! job, not parse errors.

use crate::model::Frame;

/// Parse a JSON frame document.
///
/// # Errors
/// Returns the serde error string when the input is not a valid frame
/// object (unknown breakpoint keys, malformed rule tags, missing fields).
pub fn parse_frame(input: &str) -> Result<Frame, String> {
    serde_json::from_str(input).map_err(|e| format!("Frame parse error: {e}"))
}

/// Emit a frame as pretty-printed JSON that round-trips through
/// `parse_frame`.
#[must_use]
pub fn emit_frame(frame: &Frame) -> String {
    serde_json::to_string_pretty(frame).unwrap_or_default()
}
