//! Tail triangle geometry: three control points → SVG path data and a CSS
//! placement against the bubble edge.
//!
//! The triangle is drawn as a filled polygon plus two stroked sides (tip to
//! each base corner). The base edge is never stroked, so once the tail
//! overlaps the bubble border by `base_overlap_px` the two shapes merge
//! into one outline with no visible seam.

use fumetto_core::model::{AttachEdge, TailPoints};

// ─── Geometry ────────────────────────────────────────────────────────────

/// Computed tail geometry in the tail's local pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TailGeometry {
    /// Bounding-box origin of the three points.
    pub min_x: f32,
    pub min_y: f32,
    /// Bounding-box extents; degenerate axes fall back to 1 so the SVG
    /// viewport never collapses to zero.
    pub width: f32,
    pub height: f32,
    /// `viewBox` attribute value covering the bounding box exactly.
    pub view_box: String,
    /// Closed triangle path for the fill.
    pub poly_d: String,
    /// Open tip → base-left path for the stroke.
    pub side_left_d: String,
    /// Open tip → base-right path for the stroke.
    pub side_right_d: String,
}

impl TailGeometry {
    /// Build geometry from the three control points. Total: coincident
    /// points degrade to a 1×1 viewport rather than erroring.
    #[must_use]
    pub fn build(points: &TailPoints) -> Self {
        let TailPoints {
            base_left: bl,
            base_right: br,
            tip,
        } = points;

        let min_x = bl[0].min(br[0]).min(tip[0]);
        let max_x = bl[0].max(br[0]).max(tip[0]);
        let min_y = bl[1].min(br[1]).min(tip[1]);
        let max_y = bl[1].max(br[1]).max(tip[1]);

        let width = if max_x > min_x { max_x - min_x } else { 1.0 };
        let height = if max_y > min_y { max_y - min_y } else { 1.0 };

        Self {
            min_x,
            min_y,
            width,
            height,
            view_box: format!("{min_x} {min_y} {width} {height}"),
            poly_d: format!(
                "M {} {} L {} {} L {} {} Z",
                bl[0], bl[1], br[0], br[1], tip[0], tip[1]
            ),
            side_left_d: format!("M {} {} L {} {}", tip[0], tip[1], bl[0], bl[1]),
            side_right_d: format!("M {} {} L {} {}", tip[0], tip[1], br[0], br[1]),
        }
    }
}

// ─── Placement ───────────────────────────────────────────────────────────

/// CSS offsets positioning a tail box against its bubble. Unset sides stay
/// `None`; `rotate_deg` is applied about the tail box center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CssPlacement {
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub rotate_deg: f32,
}

/// Place a tail against the given bubble edge.
///
/// `bottom-*` edges put the tail above the bubble, rotated 180°, pulled in
/// by `top = -(height - overlap)`; `top-*` edges hang it below unrotated
/// via the mirrored `bottom` offset. `offset_px` insets the tail from the
/// left or right bubble edge.
#[must_use]
pub fn position_tail(
    geometry: &TailGeometry,
    attach: AttachEdge,
    offset_px: f32,
    base_overlap_px: f32,
) -> CssPlacement {
    let pull_in = -(geometry.height - base_overlap_px);
    match attach {
        AttachEdge::BottomLeft => CssPlacement {
            top: Some(pull_in),
            left: Some(offset_px),
            rotate_deg: 180.0,
            ..Default::default()
        },
        AttachEdge::BottomRight => CssPlacement {
            top: Some(pull_in),
            right: Some(offset_px),
            rotate_deg: 180.0,
            ..Default::default()
        },
        AttachEdge::TopLeft => CssPlacement {
            bottom: Some(pull_in),
            left: Some(offset_px),
            ..Default::default()
        },
        AttachEdge::TopRight => CssPlacement {
            bottom: Some(pull_in),
            right: Some(offset_px),
            ..Default::default()
        },
    }
}
