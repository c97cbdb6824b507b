//! Per-bubble breakpoint resolution: scale, position, nudge, and width.
//!
//! Every function here is total — the lookup chains always terminate in the
//! built-in scale table or the bubble's own baseline, so there is nothing to
//! fail. Precedence is strict: bubble override, then frame-wide override,
//! then the default.

use crate::model::{Breakpoint, BubbleSpec, PositionMap, ScaleMap};

/// Resolve a bubble's effective scale at `bp` as a fraction (e.g. 0.72).
///
/// Lookup order: the bubble's own `ScaleMap`, the frame-wide map, then the
/// built-in default table. No interpolation between breakpoints — each key
/// maps to a discrete value.
pub fn resolve_scale(bubble: &BubbleSpec, bp: Breakpoint, global: Option<&ScaleMap>) -> f32 {
    let percent = bubble
        .scale_by_breakpoint
        .as_ref()
        .and_then(|m| m.get(bp))
        .or_else(|| global.and_then(|m| m.get(bp)))
        .unwrap_or_else(|| bp.default_scale_percent());
    percent / 100.0
}

/// Resolve a bubble's (x, y) position at `bp`, in percent.
///
/// Each axis falls through the chain independently: a bubble override that
/// only sets `y` still takes `x` from the frame-wide map or the baseline.
pub fn resolve_position(
    bubble: &BubbleSpec,
    bp: Breakpoint,
    global: Option<&PositionMap>,
) -> (f32, f32) {
    let own = bubble.position_by_breakpoint.as_ref().and_then(|m| m.get(bp));
    let frame = global.and_then(|m| m.get(bp));

    let x = own
        .and_then(|o| o.x)
        .or_else(|| frame.and_then(|o| o.x))
        .unwrap_or(bubble.x);
    let y = own
        .and_then(|o| o.y)
        .or_else(|| frame.and_then(|o| o.y))
        .unwrap_or(bubble.y);
    (x, y)
}

/// Scale a bubble's fixed pixel nudge by the resolved scale fraction.
/// An absent nudge means "no offset", so both axes default to zero.
pub fn resolve_nudge(bubble: &BubbleSpec, scale: f32) -> (f32, f32) {
    match bubble.nudge_px {
        Some(n) => (n.x * scale, n.y * scale),
        None => (0.0, 0.0),
    }
}

/// Scale a bubble's min/max width constraints by the resolved scale
/// fraction. Absent constraints stay absent — never coerced to zero.
pub fn resolve_width_constraints(bubble: &BubbleSpec, scale: f32) -> (Option<f32>, Option<f32>) {
    (
        bubble.min_width_px.map(|w| w * scale),
        bubble.max_width_px.map(|w| w * scale),
    )
}
