//! Core data model for fumetto frames.
//!
//! A frame is a background image plus a flat, ordered list of speech-bubble
//! specs. Every numeric baseline (position percentages, pixel nudges, width
//! constraints, tail points) is authored at the `Xl` reference breakpoint;
//! smaller breakpoints are reached through discrete per-key overrides, never
//! interpolation. The model is immutable input data — all computation lives
//! in `resolve` and `layout`.

use crate::id::BubbleId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Breakpoints ─────────────────────────────────────────────────────────

/// Responsive breakpoint keys, largest viewport to smallest.
///
/// Exactly one is current at render time, supplied by the hosting UI.
/// `Xl` is the reference breakpoint all baseline values are authored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Breakpoint {
    Xl,
    Lg,
    Md,
    Tablet,
    Sm,
    MobileLg,
    Mobile,
    Xs,
}

impl Breakpoint {
    /// All breakpoints in order, largest to smallest.
    pub const ALL: [Breakpoint; 8] = [
        Breakpoint::Xl,
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Tablet,
        Breakpoint::Sm,
        Breakpoint::MobileLg,
        Breakpoint::Mobile,
        Breakpoint::Xs,
    ];

    /// The built-in fallback scale table, in percent.
    ///
    /// Total over the closed enum, so scale resolution never needs a
    /// last-resort literal.
    pub fn default_scale_percent(self) -> f32 {
        match self {
            Breakpoint::Xl => 100.0,
            Breakpoint::Lg => 85.0,
            Breakpoint::Md => 72.0,
            Breakpoint::Tablet => 68.0,
            Breakpoint::Sm => 60.0,
            Breakpoint::MobileLg => 60.0,
            Breakpoint::Mobile => 50.0,
            Breakpoint::Xs => 50.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Xl => "xl",
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Sm => "sm",
            Breakpoint::MobileLg => "mobileLg",
            Breakpoint::Mobile => "mobile",
            Breakpoint::Xs => "xs",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Breakpoint override maps ────────────────────────────────────────────

/// Partial map from breakpoint to a scale override, in percent.
///
/// One optional slot per breakpoint keeps lookups branch-cheap and the
/// serialized form a plain `{ "md": 80 }` object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xl: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lg: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablet: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sm: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_lg: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xs: Option<f32>,
}

impl ScaleMap {
    /// Scale percent override for a breakpoint, if one is set.
    pub fn get(&self, bp: Breakpoint) -> Option<f32> {
        match bp {
            Breakpoint::Xl => self.xl,
            Breakpoint::Lg => self.lg,
            Breakpoint::Md => self.md,
            Breakpoint::Tablet => self.tablet,
            Breakpoint::Sm => self.sm,
            Breakpoint::MobileLg => self.mobile_lg,
            Breakpoint::Mobile => self.mobile,
            Breakpoint::Xs => self.xs,
        }
    }
}

/// A per-breakpoint position override. Each axis is independently optional;
/// a missing axis falls through to the next tier of the lookup chain.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// Partial map from breakpoint to a position override, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xl: Option<PositionOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lg: Option<PositionOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md: Option<PositionOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablet: Option<PositionOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sm: Option<PositionOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_lg: Option<PositionOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<PositionOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xs: Option<PositionOverride>,
}

impl PositionMap {
    /// Position override for a breakpoint, if one is set.
    pub fn get(&self, bp: Breakpoint) -> Option<PositionOverride> {
        match bp {
            Breakpoint::Xl => self.xl,
            Breakpoint::Lg => self.lg,
            Breakpoint::Md => self.md,
            Breakpoint::Tablet => self.tablet,
            Breakpoint::Sm => self.sm,
            Breakpoint::MobileLg => self.mobile_lg,
            Breakpoint::Mobile => self.mobile,
            Breakpoint::Xs => self.xs,
        }
    }
}

// ─── Anchors ─────────────────────────────────────────────────────────────

/// Which corner of the bubble sits at the authored (x, y) point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BubbleAnchor {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

/// The bubble edge a tail attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachEdge {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl BubbleAnchor {
    /// The tail comes out of the opposite corner from the one pinned to the
    /// anchor point. `Center` falls back to bottom-left.
    pub fn attach_edge(self) -> AttachEdge {
        match self {
            BubbleAnchor::TopLeft => AttachEdge::BottomLeft,
            BubbleAnchor::TopRight => AttachEdge::BottomRight,
            BubbleAnchor::BottomLeft => AttachEdge::TopLeft,
            BubbleAnchor::BottomRight => AttachEdge::TopRight,
            BubbleAnchor::Center => AttachEdge::BottomLeft,
        }
    }
}

// ─── Tail geometry inputs ────────────────────────────────────────────────

/// The three control points of a tail triangle, in pixel-local coordinates:
/// the two base corners sitting against the bubble edge, and the tip
/// pointing at the speaker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailPoints {
    pub base_left: [f32; 2],
    pub base_right: [f32; 2],
    pub tip: [f32; 2],
}

fn default_tail_offset() -> f32 {
    20.0
}

fn default_base_overlap() -> f32 {
    6.0
}

fn default_tail_stroke() -> f32 {
    3.0
}

/// Tail triangle spec attached to a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailSpec {
    pub points: TailPoints,

    /// Horizontal inset of the tail from the attach corner, in px.
    #[serde(default = "default_tail_offset")]
    pub offset_px: f32,

    /// How far the tail base overlaps the bubble edge so no seam shows.
    #[serde(default = "default_base_overlap")]
    pub base_overlap_px: f32,

    /// Stroke width of the two tail sides (the base is never stroked).
    #[serde(default = "default_tail_stroke")]
    pub stroke_px: f32,
}

// ─── Nudge & connector ───────────────────────────────────────────────────

/// Fixed pixel offset applied after scaling, authored at the reference
/// breakpoint. Absent axes mean "no offset".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NudgePx {
    pub x: f32,
    pub y: f32,
}

/// A white seam-hiding rectangle between a child bubble and its parent.
/// Only meaningful on anchored (child) bubbles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorSpec {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

// ─── Decorative text rules ───────────────────────────────────────────────

/// A text-styling rule applied to bubble text by the decor pass.
/// Rules are ordered; matching is a single pass over the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DecorRule {
    /// Split the first character into its own styled span.
    FirstLetter { class: String },
    /// Wrap case-insensitive occurrences of `search` in a styled span,
    /// keeping the matched text.
    SearchReplace { class: String, search: String },
    /// Replace case-insensitive occurrences of `search` with a symbol run
    /// (explicit `symbol`, or a built-in grawlix for known terms).
    SymbolReplace {
        class: String,
        search: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        symbol: Option<String>,
    },
}

// ─── Bubble spec ─────────────────────────────────────────────────────────

/// One annotation bubble to place over the frame.
///
/// `x`/`y` are percentages of frame width/height in [0, 100] at the `Xl`
/// breakpoint. Out-of-range values are passed through un-clamped; lint
/// flags them. A bubble with `anchor_to` set is a child positioned relative
/// to its parent's container, never directly on the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleSpec {
    pub id: BubbleId,
    pub text: String,
    pub x: f32,
    pub y: f32,

    #[serde(default)]
    pub anchor: BubbleAnchor,

    /// Id of the parent bubble this one is anchored to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_to: Option<BubbleId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width_px: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width_px: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<TailSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_by_breakpoint: Option<ScaleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_by_breakpoint: Option<PositionMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nudge_px: Option<NudgePx>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector: Option<ConnectorSpec>,

    /// Ordered decorative-text rules.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub decor: SmallVec<[DecorRule; 2]>,
}

impl BubbleSpec {
    pub fn new(id: BubbleId, text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id,
            text: text.into(),
            x,
            y,
            anchor: BubbleAnchor::default(),
            anchor_to: None,
            min_width_px: None,
            max_width_px: None,
            tail: None,
            scale_by_breakpoint: None,
            position_by_breakpoint: None,
            nudge_px: None,
            connector: None,
            decor: SmallVec::new(),
        }
    }
}

// ─── Frame ───────────────────────────────────────────────────────────────

/// A complete frame document: background image, dimensions at the reference
/// breakpoint, bubbles, and optional frame-wide override maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Background image reference (href for the SVG compositor).
    pub image: String,
    pub width: f32,
    pub height: f32,

    pub bubbles: Vec<BubbleSpec>,

    /// Frame-wide scale overrides, consulted after per-bubble maps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_by_breakpoint: Option<ScaleMap>,
    /// Frame-wide position overrides, consulted after per-bubble maps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_by_breakpoint: Option<PositionMap>,
}

// ─── Resolved output ─────────────────────────────────────────────────────

/// Where a resolved bubble's (x, y) percentages are measured from.
///
/// The same two numbers mean different things for top-level and anchored
/// bubbles; the tag makes that explicit instead of leaving it implied by
/// the presence of `anchor_to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Percent of frame width/height.
    Absolute { x: f32, y: f32 },
    /// Percent of the parent bubble's container.
    RelativeToParent { parent: BubbleId, x: f32, y: f32 },
}

/// Connector rectangle with all pixel fields scaled to the current
/// breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConnector {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
    pub z_index: Option<i32>,
}

/// A piece of decorated bubble text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment {
    Plain(String),
    Styled { text: String, class: String },
}

impl TextSegment {
    pub fn text(&self) -> &str {
        match self {
            TextSegment::Plain(t) => t,
            TextSegment::Styled { text, .. } => text,
        }
    }
}

/// Fully resolved render props for one bubble at one breakpoint, with
/// resolved children nested inside.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBubble {
    pub id: BubbleId,
    pub placement: Placement,
    pub anchor: BubbleAnchor,
    pub attach: AttachEdge,

    /// Effective scale fraction (own scale × parent's resolved scale).
    pub scale: f32,
    pub nudge_x: f32,
    pub nudge_y: f32,
    pub scaled_min_width: Option<f32>,
    pub scaled_max_width: Option<f32>,

    pub connector: Option<ResolvedConnector>,
    pub text: Vec<TextSegment>,

    /// Tail spec passed through untouched; tail points are local pixel
    /// coordinates and scale with the bubble's group transform.
    pub tail: Option<TailSpec>,

    pub children: Vec<ResolvedBubble>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_table_values() {
        let expected = [
            (Breakpoint::Xl, 100.0),
            (Breakpoint::Lg, 85.0),
            (Breakpoint::Md, 72.0),
            (Breakpoint::Tablet, 68.0),
            (Breakpoint::Sm, 60.0),
            (Breakpoint::MobileLg, 60.0),
            (Breakpoint::Mobile, 50.0),
            (Breakpoint::Xs, 50.0),
        ];
        for (bp, pct) in expected {
            assert_eq!(bp.default_scale_percent(), pct, "table entry for {bp}");
        }
    }

    #[test]
    fn attach_edge_is_opposite_corner() {
        assert_eq!(BubbleAnchor::TopLeft.attach_edge(), AttachEdge::BottomLeft);
        assert_eq!(BubbleAnchor::TopRight.attach_edge(), AttachEdge::BottomRight);
        assert_eq!(BubbleAnchor::BottomLeft.attach_edge(), AttachEdge::TopLeft);
        assert_eq!(BubbleAnchor::BottomRight.attach_edge(), AttachEdge::TopRight);
        assert_eq!(BubbleAnchor::Center.attach_edge(), AttachEdge::BottomLeft);
    }

    #[test]
    fn breakpoint_serde_keys() {
        let json = serde_json::to_string(&Breakpoint::MobileLg).unwrap();
        assert_eq!(json, "\"mobileLg\"");
        let bp: Breakpoint = serde_json::from_str("\"tablet\"").unwrap();
        assert_eq!(bp, Breakpoint::Tablet);
    }

    #[test]
    fn scale_map_lookup() {
        let map = ScaleMap {
            md: Some(80.0),
            ..Default::default()
        };
        assert_eq!(map.get(Breakpoint::Md), Some(80.0));
        assert_eq!(map.get(Breakpoint::Sm), None);
    }

    #[test]
    fn tail_spec_defaults_from_json() {
        let json = r#"{
            "points": { "baseLeft": [0, 0], "baseRight": [40, 0], "tip": [20, -30] }
        }"#;
        let tail: TailSpec = serde_json::from_str(json).unwrap();
        assert_eq!(tail.offset_px, 20.0);
        assert_eq!(tail.base_overlap_px, 6.0);
        assert_eq!(tail.stroke_px, 3.0);
    }

    #[test]
    fn decor_rule_tagged_serde() {
        let json = r#"{ "kind": "symbol-replace", "class": "grawlix", "search": "damn" }"#;
        let rule: DecorRule = serde_json::from_str(json).unwrap();
        assert_eq!(
            rule,
            DecorRule::SymbolReplace {
                class: "grawlix".into(),
                search: "damn".into(),
                symbol: None,
            }
        );
    }
}
