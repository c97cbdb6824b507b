//! Integration tests: parse → frame resolution → verify render props.
//!
//! Exercises the full `fumetto-core` pipeline: JSON → Frame → resolved
//! bubble tree at various breakpoints.

use fumetto_core::id::BubbleId;
use fumetto_core::layout::resolve_frame;
use fumetto_core::lint::lint_frame;
use fumetto_core::model::{Breakpoint, Placement, ResolvedBubble, TextSegment};
use fumetto_core::parser::parse_frame;

fn find<'a>(tree: &'a [ResolvedBubble], id: &str) -> Option<&'a ResolvedBubble> {
    let target = BubbleId::intern(id);
    for node in tree {
        if node.id == target {
            return Some(node);
        }
        if let Some(hit) = find(&node.children, id) {
            return Some(hit);
        }
    }
    None
}

// ─── Scale precedence ────────────────────────────────────────────────────

#[test]
fn default_table_applies_without_overrides() {
    let frame = parse_frame(include_str!("fixtures/minimal.json")).unwrap();
    for bp in Breakpoint::ALL {
        let tree = resolve_frame(&frame, bp);
        assert_eq!(
            tree[0].scale,
            bp.default_scale_percent() / 100.0,
            "default scale at {bp}"
        );
    }
}

#[test]
fn bubble_override_beats_frame_override_beats_default() {
    let frame = parse_frame(include_str!("fixtures/classroom.json")).unwrap();

    // md: the teacher bubble's own map says 80.
    let tree = resolve_frame(&frame, Breakpoint::Md);
    let teacher = find(&tree, "teacher").unwrap();
    assert!((teacher.scale - 0.8).abs() < 1e-6);

    // tablet: no per-bubble entry, the frame-wide map says 70.
    let tree = resolve_frame(&frame, Breakpoint::Tablet);
    let teacher = find(&tree, "teacher").unwrap();
    assert!((teacher.scale - 0.7).abs() < 1e-6);

    // sm: neither map has an entry, the built-in table says 60.
    let tree = resolve_frame(&frame, Breakpoint::Sm);
    let teacher = find(&tree, "teacher").unwrap();
    assert!((teacher.scale - 0.6).abs() < 1e-6);
}

// ─── Child composition ───────────────────────────────────────────────────

#[test]
fn child_effective_scale_composes() {
    let frame = parse_frame(include_str!("fixtures/classroom.json")).unwrap();
    let tree = resolve_frame(&frame, Breakpoint::Md);

    let aside = find(&tree, "teacher_aside").unwrap();
    // Own 90% × parent 80% = 72%.
    assert!((aside.scale - 0.72).abs() < 1e-6, "got {}", aside.scale);
    match aside.placement {
        Placement::RelativeToParent { parent, .. } => {
            assert_eq!(parent, BubbleId::intern("teacher"));
        }
        ref other => panic!("expected relative placement, got {other:?}"),
    }
}

#[test]
fn child_nests_under_its_parent() {
    let frame = parse_frame(include_str!("fixtures/classroom.json")).unwrap();
    let tree = resolve_frame(&frame, Breakpoint::Xl);

    let teacher = tree
        .iter()
        .find(|b| b.id == BubbleId::intern("teacher"))
        .unwrap();
    assert_eq!(teacher.children.len(), 1);
    assert_eq!(teacher.children[0].id, BubbleId::intern("teacher_aside"));
    // The child never shows up at the top level too.
    assert!(!tree.iter().any(|b| b.id == BubbleId::intern("teacher_aside")));
}

// ─── Nudge & width scaling ───────────────────────────────────────────────

#[test]
fn nudge_and_width_scale_with_breakpoint() {
    let frame = parse_frame(include_str!("fixtures/classroom.json")).unwrap();
    let tree = resolve_frame(&frame, Breakpoint::Md);

    let teacher = find(&tree, "teacher").unwrap();
    assert!((teacher.nudge_x - 4.8).abs() < 1e-4, "6 × 0.8");
    assert!((teacher.nudge_y - -8.0).abs() < 1e-4, "-10 × 0.8");
    assert_eq!(teacher.scaled_min_width, None);
    assert!((teacher.scaled_max_width.unwrap() - 256.0).abs() < 1e-3);
}

// ─── Position overrides ──────────────────────────────────────────────────

#[test]
fn position_override_applies_per_axis() {
    let frame = parse_frame(include_str!("fixtures/classroom.json")).unwrap();

    let tree = resolve_frame(&frame, Breakpoint::Sm);
    let caption = find(&tree, "caption").unwrap();
    match caption.placement {
        Placement::Absolute { x, y } => {
            assert_eq!(x, 2.0, "x keeps its baseline");
            assert_eq!(y, 96.0, "y takes the sm override");
        }
        ref other => panic!("expected absolute placement, got {other:?}"),
    }
}

// ─── Dangling anchors ────────────────────────────────────────────────────

#[test]
fn dangling_anchor_renders_top_level_and_lints() {
    let frame = parse_frame(include_str!("fixtures/classroom.json")).unwrap();
    let tree = resolve_frame(&frame, Breakpoint::Xl);

    let note = tree
        .iter()
        .find(|b| b.id == BubbleId::intern("lost_note"))
        .expect("dangling bubble should render at top level");
    assert!(matches!(note.placement, Placement::Absolute { .. }));

    let diags = lint_frame(&frame);
    assert!(
        diags.iter().any(|d| d.rule == "dangling-anchor"),
        "lint should flag the dangling anchor: {diags:?}"
    );
}

// ─── Decorated text flows through resolution ─────────────────────────────

#[test]
fn decorated_text_is_resolved_into_segments() {
    let frame = parse_frame(include_str!("fixtures/classroom.json")).unwrap();
    let tree = resolve_frame(&frame, Breakpoint::Xl);

    let student = find(&tree, "student").unwrap();
    assert_eq!(
        student.text,
        vec![
            TextSegment::Styled {
                text: "@#$%".into(),
                class: "grawlix".into()
            },
            TextSegment::Plain(" that's cool".into()),
        ]
    );

    let caption = find(&tree, "caption").unwrap();
    assert_eq!(
        caption.text[0],
        TextSegment::Styled {
            text: "m".into(),
            class: "dropcap".into()
        }
    );
}

// ─── Every bubble lands somewhere ────────────────────────────────────────

#[test]
fn acyclic_frame_renders_every_bubble_once() {
    let frame = parse_frame(include_str!("fixtures/classroom.json")).unwrap();
    let tree = resolve_frame(&frame, Breakpoint::Lg);

    fn count(nodes: &[ResolvedBubble]) -> usize {
        nodes.iter().map(|n| 1 + count(&n.children)).sum()
    }
    assert_eq!(count(&tree), frame.bubbles.len());
}
