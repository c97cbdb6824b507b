//! Thin SVG frame compositor.
//!
//! Overlays a resolved bubble tree on its background image and emits a
//! standalone SVG document. Text extents are estimated, not shaped — real
//! text layout belongs to the host; the compositor only needs a plausible
//! box to hang the tail and children off.

use crate::tail::{TailGeometry, position_tail};
use fumetto_core::model::{
    BubbleAnchor, Frame, Placement, ResolvedBubble, TailPoints, TailSpec, TextSegment,
};
use std::fmt::Write;

const FONT_SIZE: f32 = 16.0;
const PAD: f32 = 12.0;
const CORNER_RADIUS: f32 = 10.0;
const INK: &str = "#1A1A1A";

/// Render a frame and its resolved bubble tree as a complete SVG document.
#[must_use]
pub fn render_frame_svg(frame: &Frame, resolved: &[ResolvedBubble]) -> String {
    let (w, h) = (frame.width, frame.height);
    let mut svg = String::with_capacity(2048);
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    let _ = writeln!(
        svg,
        "<image href=\"{}\" x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" preserveAspectRatio=\"xMidYMid slice\"/>",
        escape_text(&frame.image)
    );

    for bubble in resolved {
        render_bubble_svg(&mut svg, w, h, bubble);
    }

    svg.push_str("</svg>\n");
    svg
}

/// Estimated pixel box for a bubble at its effective scale.
///
/// Rough estimate: 8px per char at the base font, clamped to the scaled
/// width constraints.
fn bubble_box(bubble: &ResolvedBubble) -> (f32, f32) {
    let chars: usize = bubble
        .text
        .iter()
        .map(|s| s.text().chars().count())
        .sum();
    let mut width = (chars as f32 * 8.0 + PAD * 2.0) * bubble.scale;
    if let Some(max) = bubble.scaled_max_width {
        width = width.min(max);
    }
    if let Some(min) = bubble.scaled_min_width {
        width = width.max(min);
    }
    let height = (FONT_SIZE * 1.5 + PAD * 2.0) * bubble.scale;
    (width, height)
}

fn render_bubble_svg(out: &mut String, container_w: f32, container_h: f32, bubble: &ResolvedBubble) {
    let (x_pct, y_pct) = match bubble.placement {
        Placement::Absolute { x, y } => (x, y),
        Placement::RelativeToParent { x, y, .. } => (x, y),
    };
    let px = x_pct / 100.0 * container_w;
    let py = y_pct / 100.0 * container_h;

    let (w, h) = bubble_box(bubble);

    // Shift so the anchored corner, not the box origin, sits at (px, py).
    let (mut gx, mut gy) = match bubble.anchor {
        BubbleAnchor::TopLeft => (px, py),
        BubbleAnchor::TopRight => (px - w, py),
        BubbleAnchor::BottomLeft => (px, py - h),
        BubbleAnchor::BottomRight => (px - w, py - h),
        BubbleAnchor::Center => (px - w / 2.0, py - h / 2.0),
    };
    gx += bubble.nudge_x;
    gy += bubble.nudge_y;

    let stroke = bubble.tail.map_or(2.0, |t| t.stroke_px) * bubble.scale;

    let _ = writeln!(
        out,
        "<g id=\"{}\" transform=\"translate({gx} {gy})\">",
        escape_text(bubble.id.as_str())
    );

    // Seam-hiding connector goes behind the bubble body.
    if let Some(c) = bubble.connector {
        let _ = writeln!(
            out,
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#FFFFFF\"/>",
            c.x, c.y, c.width, c.height
        );
    }

    let _ = writeln!(
        out,
        "  <rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" rx=\"{r}\" ry=\"{r}\" fill=\"#FFFFFF\" stroke=\"{INK}\" stroke-width=\"{stroke}\"/>",
        r = CORNER_RADIUS * bubble.scale
    );

    render_text_svg(out, bubble);

    if let Some(tail) = bubble.tail {
        render_tail_svg(out, &tail, bubble, w, h);
    }

    for child in &bubble.children {
        render_bubble_svg(out, w, h, child);
    }

    out.push_str("</g>\n");
}

fn render_text_svg(out: &mut String, bubble: &ResolvedBubble) {
    let font = FONT_SIZE * bubble.scale;
    let _ = write!(
        out,
        "  <text x=\"{}\" y=\"{}\" font-size=\"{font}\" fill=\"{INK}\">",
        PAD * bubble.scale,
        (PAD + FONT_SIZE) * bubble.scale
    );
    for segment in &bubble.text {
        match segment {
            TextSegment::Plain(text) => {
                let _ = write!(out, "{}", escape_text(text));
            }
            TextSegment::Styled { text, class } => {
                let _ = write!(
                    out,
                    "<tspan class=\"{}\">{}</tspan>",
                    escape_text(class),
                    escape_text(text)
                );
            }
        }
    }
    out.push_str("</text>\n");
}

fn render_tail_svg(out: &mut String, tail: &TailSpec, bubble: &ResolvedBubble, w: f32, h: f32) {
    let s = bubble.scale;
    // Tail points are authored at the reference breakpoint; bake the
    // bubble's effective scale in before building geometry.
    let points = TailPoints {
        base_left: [tail.points.base_left[0] * s, tail.points.base_left[1] * s],
        base_right: [tail.points.base_right[0] * s, tail.points.base_right[1] * s],
        tip: [tail.points.tip[0] * s, tail.points.tip[1] * s],
    };
    let geometry = TailGeometry::build(&points);
    let place = position_tail(&geometry, bubble.attach, tail.offset_px * s, tail.base_overlap_px * s);

    let tx = match (place.left, place.right) {
        (Some(left), _) => left,
        (None, Some(right)) => w - right - geometry.width,
        (None, None) => 0.0,
    };
    let ty = match (place.top, place.bottom) {
        (Some(top), _) => top,
        (None, Some(bottom)) => h - bottom - geometry.height,
        (None, None) => 0.0,
    };

    // Path data lives in the tail's own coordinate space; shift its
    // bounding-box origin to (tx, ty) and rotate about the box center.
    let dx = tx - geometry.min_x;
    let dy = ty - geometry.min_y;
    let transform = if place.rotate_deg != 0.0 {
        let cx = geometry.min_x + geometry.width / 2.0;
        let cy = geometry.min_y + geometry.height / 2.0;
        format!("translate({dx} {dy}) rotate({} {cx} {cy})", place.rotate_deg)
    } else {
        format!("translate({dx} {dy})")
    };

    let stroke = tail.stroke_px * s;
    let _ = writeln!(out, "  <g transform=\"{transform}\">");
    let _ = writeln!(out, "    <path d=\"{}\" fill=\"#FFFFFF\"/>", geometry.poly_d);
    let _ = writeln!(
        out,
        "    <path d=\"{}\" fill=\"none\" stroke=\"{INK}\" stroke-width=\"{stroke}\" stroke-linecap=\"round\"/>",
        geometry.side_left_d
    );
    let _ = writeln!(
        out,
        "    <path d=\"{}\" fill=\"none\" stroke=\"{INK}\" stroke-width=\"{stroke}\" stroke-linecap=\"round\"/>",
        geometry.side_right_d
    );
    out.push_str("  </g>\n");
}

fn escape_text(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
