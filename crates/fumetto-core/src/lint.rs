//! Lint diagnostics for frame documents.
//!
//! Reports structural issues without modifying the frame. Layout itself
//! degrades silently (promote dangling anchors, drop cycles); lint is where
//! authors find out why a bubble moved or disappeared.

use crate::id::BubbleId;
use crate::model::{BubbleSpec, Frame};
use std::collections::{HashMap, HashSet};

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Should be fixed — likely a mistake.
    Warning,
    /// Informational — style suggestion.
    Info,
}

/// A single lint diagnostic for a bubble.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// The bubble this diagnostic refers to.
    pub bubble_id: BubbleId,
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "dangling-anchor", "anchor-cycle").
    pub rule: &'static str,
}

// ─── Public API ──────────────────────────────────────────────────────────

/// Run all lint rules over a frame and return diagnostics.
#[must_use]
pub fn lint_frame(frame: &Frame) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_duplicate_ids(&frame.bubbles, &mut diags);
    lint_anchor_targets(&frame.bubbles, &mut diags);
    lint_anchor_cycles(&frame.bubbles, &mut diags);
    lint_positions(&frame.bubbles, &mut diags);
    lint_empty_text(&frame.bubbles, &mut diags);
    lint_degenerate_tails(&frame.bubbles, &mut diags);
    diags
}

// ─── Rules ───────────────────────────────────────────────────────────────

/// Warn when two bubbles claim the same id — anchor lookups resolve to the
/// first claimant, so the rest can never be anchor parents.
fn lint_duplicate_ids(bubbles: &[BubbleSpec], diags: &mut Vec<LintDiagnostic>) {
    let mut seen = HashSet::new();
    for b in bubbles {
        if !seen.insert(b.id) {
            diags.push(LintDiagnostic {
                bubble_id: b.id,
                message: format!("Duplicate bubble id `{}` — anchors resolve to the first one.", b.id),
                severity: LintSeverity::Warning,
                rule: "duplicate-id",
            });
        }
    }
}

/// Warn on anchors that reference a missing bubble (promoted to top level
/// at layout time) or the bubble itself.
fn lint_anchor_targets(bubbles: &[BubbleSpec], diags: &mut Vec<LintDiagnostic>) {
    let ids: HashSet<BubbleId> = bubbles.iter().map(|b| b.id).collect();
    for b in bubbles {
        let Some(target) = b.anchor_to else { continue };
        if target == b.id {
            diags.push(LintDiagnostic {
                bubble_id: b.id,
                message: format!("Bubble `{}` anchors to itself and will not render.", b.id),
                severity: LintSeverity::Warning,
                rule: "self-anchor",
            });
        } else if !ids.contains(&target) {
            diags.push(LintDiagnostic {
                bubble_id: b.id,
                message: format!(
                    "Bubble `{}` anchors to missing `{target}` — it renders as top-level instead.",
                    b.id
                ),
                severity: LintSeverity::Warning,
                rule: "dangling-anchor",
            });
        }
    }
}

/// Warn on anchor chains that never reach a top-level bubble; layout drops
/// every bubble on a cycle and every bubble hanging off one.
fn lint_anchor_cycles(bubbles: &[BubbleSpec], diags: &mut Vec<LintDiagnostic>) {
    let mut parent_of: HashMap<BubbleId, BubbleId> = HashMap::new();
    for b in bubbles {
        if let Some(target) = b.anchor_to {
            parent_of.entry(b.id).or_insert(target);
        }
    }

    for b in bubbles {
        // Walk the parent chain. A walk that revisits any bubble can never
        // reach a root, so layout drops b whether b sits on the cycle
        // itself or merely anchors into it.
        let mut walked = HashSet::new();
        walked.insert(b.id);
        let mut current = b.id;
        while let Some(&next) = parent_of.get(&current) {
            if !walked.insert(next) {
                let message = if next == b.id {
                    format!("Anchor chain through `{}` forms a cycle — the bubble is dropped.", b.id)
                } else {
                    format!("Bubble `{}` anchors into a cycle — the bubble is dropped.", b.id)
                };
                diags.push(LintDiagnostic {
                    bubble_id: b.id,
                    message,
                    severity: LintSeverity::Warning,
                    rule: "anchor-cycle",
                });
                break;
            }
            current = next;
        }
    }
}

/// Info when a baseline or override position leaves [0, 100] — the engine
/// passes it through un-clamped, which is usually intentional overhang but
/// worth a look.
fn lint_positions(bubbles: &[BubbleSpec], diags: &mut Vec<LintDiagnostic>) {
    let in_range = |v: f32| (0.0..=100.0).contains(&v);
    for b in bubbles {
        let mut values = vec![b.x, b.y];
        if let Some(map) = &b.position_by_breakpoint {
            for bp in crate::model::Breakpoint::ALL {
                if let Some(o) = map.get(bp) {
                    values.extend(o.x);
                    values.extend(o.y);
                }
            }
        }
        if values.iter().any(|v| !in_range(*v)) {
            diags.push(LintDiagnostic {
                bubble_id: b.id,
                message: format!("Bubble `{}` has a position outside [0, 100] percent.", b.id),
                severity: LintSeverity::Info,
                rule: "position-out-of-range",
            });
        }
    }
}

/// Info on bubbles with no text at all.
fn lint_empty_text(bubbles: &[BubbleSpec], diags: &mut Vec<LintDiagnostic>) {
    for b in bubbles {
        if b.text.trim().is_empty() {
            diags.push(LintDiagnostic {
                bubble_id: b.id,
                message: format!("Bubble `{}` has empty text.", b.id),
                severity: LintSeverity::Info,
                rule: "empty-text",
            });
        }
    }
}

/// Info when a tail's three points span a zero-area triangle; geometry
/// degrades to a 1×1 viewport instead of erroring.
fn lint_degenerate_tails(bubbles: &[BubbleSpec], diags: &mut Vec<LintDiagnostic>) {
    for b in bubbles {
        let Some(tail) = &b.tail else { continue };
        let p = &tail.points;
        let xs = [p.base_left[0], p.base_right[0], p.tip[0]];
        let ys = [p.base_left[1], p.base_right[1], p.tip[1]];
        let flat = |v: [f32; 3]| v[0] == v[1] && v[1] == v[2];
        if flat(xs) || flat(ys) {
            diags.push(LintDiagnostic {
                bubble_id: b.id,
                message: format!("Tail on `{}` has zero area; it renders as a sliver.", b.id),
                severity: LintSeverity::Info,
                rule: "tail-degenerate",
            });
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
