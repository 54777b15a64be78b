//! Authoritative pane frame storage.
//!
//! The `FrameStore` owns the mapping from pane identity to current on-screen
//! rectangle. It is written only by the engine; the rendering collaborator
//! reads snapshots and the per-pane commit kind to decide whether to animate
//! toward the new rectangle or jump there.

use log::debug;
use std::collections::HashMap;

use crate::geometry::Rect;
use crate::pane::PaneId;

/// How a frame write should be presented by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// Animate from the previous rectangle to the new one.
    Animated,
    /// Jump to the new rectangle without animation.
    Immediate,
}

/// Maps each live pane to its current rectangle, one entry per pane.
#[derive(Debug, Default)]
pub struct FrameStore {
    frames: HashMap<PaneId, Rect>,
    last_commit: HashMap<PaneId, Commit>,
    suppressed: bool,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one frame. While suppression is active (resize gestures),
    /// animated commits are downgraded to immediate.
    pub fn set(&mut self, id: PaneId, rect: Rect, commit: Commit) {
        let commit = if self.suppressed {
            Commit::Immediate
        } else {
            commit
        };
        self.frames.insert(id, rect);
        self.last_commit.insert(id, commit);
    }

    /// Write a batch of frames with a shared commit kind.
    pub fn set_all(&mut self, frames: HashMap<PaneId, Rect>, commit: Commit) {
        for (id, rect) in frames {
            self.set(id, rect, commit);
        }
    }

    pub fn get(&self, id: PaneId) -> Option<Rect> {
        self.frames.get(&id).copied()
    }

    /// The commit kind of the last write for a pane, for the renderer.
    pub fn last_commit(&self, id: PaneId) -> Option<Commit> {
        self.last_commit.get(&id).copied()
    }

    pub fn remove(&mut self, id: PaneId) -> Option<Rect> {
        self.last_commit.remove(&id);
        self.frames.remove(&id)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.last_commit.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.frames.contains_key(&id)
    }

    /// Snapshot of all current frames.
    pub fn snapshot(&self) -> HashMap<PaneId, Rect> {
        self.frames.clone()
    }

    /// Suppress animated commits for the duration of a gesture.
    pub fn set_animations_suppressed(&mut self, suppressed: bool) {
        if self.suppressed != suppressed {
            debug!("Frame animations suppressed: {}", suppressed);
        }
        self.suppressed = suppressed;
    }

    pub fn animations_suppressed(&self) -> bool {
        self.suppressed
    }
}
