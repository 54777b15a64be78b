//! Pane draw-order maintenance and geometry-aware cycling helpers.
//!
//! The engine keeps panes in a front order (`Order`, index 0 = primary) that
//! is independent of geometry. Cycling, however, must agree with what the
//! user visually perceives, so the cyclic sequence is derived from the
//! current frames: sort pane centers by angle around their centroid.
//! Ascending angle in a Y-down coordinate space yields clockwise visual
//! order.

use crate::frames::{Commit, FrameStore};
use crate::geometry::Rect;
use crate::pane::PaneId;

/// Direction of a cyclic rotation, as perceived on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Clockwise,
    CounterClockwise,
}

/// The given order with `pane` moved to index 0, relative order of the rest
/// preserved. Returns a clone when the pane is absent.
pub fn promoted(order: &[PaneId], pane: PaneId) -> Vec<PaneId> {
    let mut result = Vec::with_capacity(order.len());
    if order.contains(&pane) {
        result.push(pane);
    }
    result.extend(order.iter().copied().filter(|id| *id != pane));
    result
}

/// Visual cyclic order of the given panes, computed purely from current
/// frame geometry. Ties on angle break by centroid distance, then center y,
/// then center x. Falls back to the given order unchanged when any pane
/// lacks a resolvable frame.
pub fn visual_cycle_order(order: &[PaneId], frames: &FrameStore) -> Vec<PaneId> {
    if order.len() < 2 {
        return order.to_vec();
    }

    let mut centers = Vec::with_capacity(order.len());
    for id in order {
        match frames.get(*id) {
            Some(rect) => centers.push((*id, rect.center())),
            None => return order.to_vec(),
        }
    }

    let n = centers.len() as f64;
    let centroid_x = centers.iter().map(|(_, c)| c.x).sum::<f64>() / n;
    let centroid_y = centers.iter().map(|(_, c)| c.y).sum::<f64>() / n;

    let mut keyed: Vec<(PaneId, f64, f64, f64, f64)> = centers
        .into_iter()
        .map(|(id, c)| {
            let dx = c.x - centroid_x;
            let dy = c.y - centroid_y;
            (id, dy.atan2(dx), (dx * dx + dy * dy).sqrt(), c.y, c.x)
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.1.total_cmp(&b.1)
            .then(a.2.total_cmp(&b.2))
            .then(a.3.total_cmp(&b.3))
            .then(a.4.total_cmp(&b.4))
    });

    keyed.into_iter().map(|(id, ..)| id).collect()
}

/// Redistribute the old order's frame rectangles positionally onto the new
/// order: the pane now at index `i` receives the rectangle of the pane that
/// was at index `i`. The set of rectangles is invariant; only the assignment
/// to pane identities changes, producing a swap animation rather than a
/// relayout.
pub fn reassign_slots(old_order: &[PaneId], new_order: &[PaneId], frames: &mut FrameStore) {
    let slots: Vec<Option<Rect>> = old_order.iter().map(|id| frames.get(*id)).collect();
    for (i, id) in new_order.iter().enumerate() {
        if let Some(Some(rect)) = slots.get(i) {
            frames.set(*id, *rect, Commit::Animated);
        }
    }
}

/// Rotate frame assignments one step along the visual ring: for clockwise
/// cycling every pane takes the rectangle of the pane ahead of it in visual
/// order, for counter-clockwise the one behind it.
pub fn rotate_ring(visual: &[PaneId], direction: CycleDirection, frames: &mut FrameStore) {
    let n = visual.len();
    if n < 2 {
        return;
    }
    let old: Vec<Option<Rect>> = visual.iter().map(|id| frames.get(*id)).collect();
    if old.iter().any(Option::is_none) {
        return;
    }
    for i in 0..n {
        let src = match direction {
            CycleDirection::Clockwise => (i + 1) % n,
            CycleDirection::CounterClockwise => (i + n - 1) % n,
        };
        if let Some(rect) = old[src] {
            frames.set(visual[i], rect, Commit::Animated);
        }
    }
}
