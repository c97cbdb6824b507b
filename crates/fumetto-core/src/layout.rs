//! Anchor-graph layout: flat bubble list → resolved bubble tree.
//!
//! Partitions bubbles into top-level (no `anchor_to`) and children anchored
//! to a parent by id, then resolves render props per breakpoint with child
//! scales composed onto the parent's. Dangling anchors promote the bubble
//! to top-level; anchor cycles drop every bubble on the cycle. Both are
//! logged and surfaced through lint.

use crate::decor::apply_decor;
use crate::id::BubbleId;
use crate::model::{Breakpoint, BubbleSpec, Frame, Placement, ResolvedBubble, ResolvedConnector};
use crate::resolve::{resolve_nudge, resolve_position, resolve_scale, resolve_width_constraints};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

// ─── Anchor graph ────────────────────────────────────────────────────────

/// The parent → child anchor relationships of one frame, as a directed
/// graph over indices into the bubble slice.
pub struct AnchorGraph {
    graph: StableDiGraph<usize, ()>,
    node_of: HashMap<usize, NodeIndex>,
    /// Slice indices of top-level bubbles, in document order. Includes
    /// bubbles promoted because their anchor target doesn't exist.
    top_level: Vec<usize>,
}

impl AnchorGraph {
    /// Build the anchor graph for a bubble list.
    ///
    /// O(n) over ids plus one edge per valid `anchor_to`. Duplicate ids
    /// resolve to the first bubble claiming the id (lint flags the rest).
    #[must_use]
    pub fn build(bubbles: &[BubbleSpec]) -> Self {
        let mut by_id: HashMap<BubbleId, usize> = HashMap::new();
        for (i, b) in bubbles.iter().enumerate() {
            by_id.entry(b.id).or_insert(i);
        }

        let mut graph = StableDiGraph::new();
        let mut node_of = HashMap::new();
        for i in 0..bubbles.len() {
            node_of.insert(i, graph.add_node(i));
        }

        let mut top_level = Vec::new();
        for (i, b) in bubbles.iter().enumerate() {
            match b.anchor_to {
                None => top_level.push(i),
                Some(target) => match by_id.get(&target) {
                    Some(&p) if p != i => {
                        graph.add_edge(node_of[&p], node_of[&i], ());
                    }
                    Some(_) => {
                        // Self-anchor: a one-bubble cycle; stays out of
                        // top_level and gets dropped by the walk.
                    }
                    None => {
                        log::warn!(
                            "bubble {} anchors to missing {}; promoting to top level",
                            b.id,
                            target
                        );
                        top_level.push(i);
                    }
                },
            }
        }

        Self {
            graph,
            node_of,
            top_level,
        }
    }

    /// Slice indices of top-level bubbles, in document order.
    pub fn top_level(&self) -> &[usize] {
        &self.top_level
    }

    /// Slice indices of the bubbles anchored to `parent`, in document order.
    pub fn children_of(&self, parent: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .graph
            .neighbors_directed(self.node_of[&parent], petgraph::Direction::Outgoing)
            .map(|n| self.graph[n])
            .collect();
        out.sort_unstable();
        out
    }
}

// ─── Frame resolution ────────────────────────────────────────────────────

/// Resolve a whole frame at one breakpoint into a tree of render props.
///
/// Pure over its inputs: same frame and breakpoint, same tree. Bubbles on
/// an anchor cycle are unreachable from any top-level bubble and are
/// dropped with a warning.
#[must_use]
pub fn resolve_frame(frame: &Frame, bp: Breakpoint) -> Vec<ResolvedBubble> {
    let anchors = AnchorGraph::build(&frame.bubbles);
    let mut visited: HashSet<usize> = HashSet::new();

    let tree: Vec<ResolvedBubble> = anchors
        .top_level()
        .iter()
        .map(|&i| resolve_bubble(frame, &anchors, i, bp, 1.0, None, &mut visited))
        .collect();

    for (i, b) in frame.bubbles.iter().enumerate() {
        if !visited.contains(&i) {
            log::warn!("dropping bubble {}: anchor chain forms a cycle", b.id);
        }
    }

    tree
}

fn resolve_bubble(
    frame: &Frame,
    anchors: &AnchorGraph,
    index: usize,
    bp: Breakpoint,
    parent_scale: f32,
    parent: Option<BubbleId>,
    visited: &mut HashSet<usize>,
) -> ResolvedBubble {
    visited.insert(index);
    let bubble = &frame.bubbles[index];

    let own = resolve_scale(bubble, bp, frame.scale_by_breakpoint.as_ref());
    let scale = own * parent_scale;
    let (x, y) = resolve_position(bubble, bp, frame.position_by_breakpoint.as_ref());
    let (nudge_x, nudge_y) = resolve_nudge(bubble, scale);
    let (scaled_min_width, scaled_max_width) = resolve_width_constraints(bubble, scale);

    let placement = match parent {
        Some(parent) => Placement::RelativeToParent { parent, x, y },
        None => Placement::Absolute { x, y },
    };

    // Connectors hide the seam between a child and its parent; they have no
    // meaning on a top-level bubble.
    let connector = parent.and(bubble.connector).map(|c| ResolvedConnector {
        width: c.width * scale,
        height: c.height * scale,
        x: c.x * scale,
        y: c.y * scale,
        z_index: c.z_index,
    });

    // Snapshot the unvisited children before recursing; the recursion needs
    // `visited` mutably, so the membership checks cannot stay lazy in the
    // same chain.
    let child_indices: Vec<usize> = anchors
        .children_of(index)
        .into_iter()
        .filter(|i| !visited.contains(i))
        .collect();
    let children = child_indices
        .into_iter()
        .map(|i| resolve_bubble(frame, anchors, i, bp, scale, Some(bubble.id), visited))
        .collect();

    ResolvedBubble {
        id: bubble.id,
        placement,
        anchor: bubble.anchor,
        attach: bubble.anchor.attach_edge(),
        scale,
        nudge_x,
        nudge_y,
        scaled_min_width,
        scaled_max_width,
        connector,
        text: apply_decor(&bubble.text, &bubble.decor),
        tail: bubble.tail,
        children,
    }
}

// ─── Layout cache ────────────────────────────────────────────────────────

/// Memoizes resolved trees keyed on (frame revision, breakpoint).
///
/// The caller bumps the revision whenever the bubble list or the override
/// maps change; resize only changes the breakpoint key. Purely a render
/// perf aid — `resolve_frame` is always safe to call directly.
#[derive(Default)]
pub struct LayoutCache {
    revision: u64,
    entries: HashMap<Breakpoint, Arc<Vec<ResolvedBubble>>>,
}

impl LayoutCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `frame` at `bp`, reusing the cached tree when the revision
    /// matches. A new revision clears all breakpoint entries.
    pub fn resolve(
        &mut self,
        frame: &Frame,
        revision: u64,
        bp: Breakpoint,
    ) -> Arc<Vec<ResolvedBubble>> {
        if revision != self.revision {
            self.entries.clear();
            self.revision = revision;
        }
        self.entries
            .entry(bp)
            .or_insert_with(|| Arc::new(resolve_frame(frame, bp)))
            .clone()
    }
}
