//! Drag and resize gesture handling.
//!
//! One geometry-mutating gesture is active at a time (input is
//! single-pointer). The controller owns the per-gesture state: the frame
//! captured at gesture start and the cumulative pointer delta. Drags feed
//! the renderer an uncommitted live origin and commit once on release;
//! resizes commit on every move with animations suppressed by the engine.

use log::debug;

use crate::geometry::{Point, Rect, Size};
use crate::pane::PaneId;

/// Movement below this is treated as noise; the gesture has not started.
const GESTURE_START_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
enum Gesture {
    Idle,
    Drag {
        pane: PaneId,
        start_frame: Rect,
        delta: Point,
        /// Set once the cumulative delta passes the start threshold.
        active: bool,
    },
    Resize {
        pane: PaneId,
        start_frame: Rect,
        active: bool,
    },
}

/// Per-pointer-gesture state machine.
#[derive(Debug)]
pub struct InteractionController {
    gesture: Gesture,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    /// The pane targeted by the active gesture, if any.
    pub fn active_pane(&self) -> Option<PaneId> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Drag { pane, .. } | Gesture::Resize { pane, .. } => Some(pane),
        }
    }

    /// Arm a drag gesture. Rejected while another gesture is active.
    pub fn begin_drag(&mut self, pane: PaneId, start_frame: Rect) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.gesture = Gesture::Drag {
            pane,
            start_frame,
            delta: Point::default(),
            active: false,
        };
        debug!("Armed drag gesture on {}", pane);
        true
    }

    /// Record a pointer move with the cumulative delta since gesture start.
    /// Returns the candidate live origin (uncommitted, for immediate visual
    /// feedback), or `None` while below the start threshold or when no drag
    /// on this pane is active.
    pub fn drag_update(
        &mut self,
        pane: PaneId,
        cumulative: Point,
        toolbar_strip_height: f64,
    ) -> Option<Point> {
        match &mut self.gesture {
            Gesture::Drag {
                pane: active_pane,
                start_frame,
                delta,
                active,
            } if *active_pane == pane => {
                *delta = cumulative;
                if !*active
                    && cumulative.x.abs() <= GESTURE_START_THRESHOLD
                    && cumulative.y.abs() <= GESTURE_START_THRESHOLD
                {
                    return None;
                }
                *active = true;
                let origin = start_frame.origin().offset(cumulative.x, cumulative.y);
                Some(Point::new(origin.x, origin.y.max(toolbar_strip_height)))
            }
            _ => None,
        }
    }

    /// Finish a drag. Returns the final frame to commit (start frame
    /// translated by the total delta, top-clamped), or `None` when the
    /// gesture never passed the start threshold.
    pub fn end_drag(&mut self, pane: PaneId, toolbar_strip_height: f64) -> Option<Rect> {
        match self.gesture {
            Gesture::Drag {
                pane: active_pane,
                start_frame,
                delta,
                active,
            } if active_pane == pane => {
                self.gesture = Gesture::Idle;
                if !active {
                    return None;
                }
                debug!("Committed drag on {} (delta {:.1},{:.1})", pane, delta.x, delta.y);
                Some(
                    start_frame
                        .translated(delta.x, delta.y)
                        .clamped_top(toolbar_strip_height),
                )
            }
            _ => None,
        }
    }

    /// Arm a resize gesture. Rejected while another gesture is active.
    pub fn begin_resize(&mut self, pane: PaneId, start_frame: Rect) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.gesture = Gesture::Resize {
            pane,
            start_frame,
            active: false,
        };
        debug!("Armed resize gesture on {}", pane);
        true
    }

    /// Record a resize pointer move. Returns the new size (origin fixed at
    /// the pane's top-left), floored at the minimum pane size on every move.
    pub fn resize_update(
        &mut self,
        pane: PaneId,
        cumulative: Point,
        min_pane_size: f64,
    ) -> Option<Size> {
        match &mut self.gesture {
            Gesture::Resize {
                pane: active_pane,
                start_frame,
                active,
            } if *active_pane == pane => {
                if !*active
                    && cumulative.x.abs() <= GESTURE_START_THRESHOLD
                    && cumulative.y.abs() <= GESTURE_START_THRESHOLD
                {
                    return None;
                }
                *active = true;
                Some(Size::new(
                    (start_frame.width + cumulative.x).max(min_pane_size),
                    (start_frame.height + cumulative.y).max(min_pane_size),
                ))
            }
            _ => None,
        }
    }

    /// Finish a resize. Returns whether a resize on this pane was active.
    pub fn end_resize(&mut self, pane: PaneId) -> bool {
        match self.gesture {
            Gesture::Resize {
                pane: active_pane, ..
            } if active_pane == pane => {
                self.gesture = Gesture::Idle;
                debug!("Finished resize on {}", pane);
                true
            }
            _ => false,
        }
    }

    /// Clear gesture state if it references the given pane (pane removal
    /// mid-gesture must not leave a dangling reference).
    pub fn cancel_pane(&mut self, pane: PaneId) {
        if self.active_pane() == Some(pane) {
            debug!("Cancelled gesture on removed {}", pane);
            self.gesture = Gesture::Idle;
        }
    }

    /// Drop any gesture state (demo apply, engine reset).
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests;
