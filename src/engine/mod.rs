//! The engine facade tying panes, frames, layout, ordering, and gestures
//! together.
//!
//! `PaneEngine` is the single entry point for embedding applications: it owns
//! the pane registry, the frame store, the front order, and the active
//! display configuration, and exposes the full operation surface (add/remove,
//! mode switch, bring-to-front, cycling, drag/resize, container resize, demo
//! capture/apply). All mutation is synchronous and single-threaded.

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::QuadviewConfig;
use crate::demo::{unix_now, DemoLayout, DemoPaneSnapshot};
use crate::frames::{Commit, FrameStore};
use crate::geometry::{Point, Rect, Size};
use crate::interaction::InteractionController;
use crate::layout::{self, DisplayConfiguration};
use crate::ordering::{self, CycleDirection};
use crate::pane::{fallback_rect, Pane, PaneId, PaneRegistry, MAX_PANES};

/// Errors surfaced to the embedding application.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("pane capacity exceeded: at most {max} panes may be live")]
    CapacityExceeded { max: usize },
}

/// Callback invoked when a pane's content surface must be detached
/// (pane removal or demo restore).
type DetachListener = Box<dyn Fn(PaneId) + Send + Sync>;

/// Owns all pane arrangement state and mediates every mutation.
pub struct PaneEngine {
    config: QuadviewConfig,
    panes: PaneRegistry,
    frames: FrameStore,
    /// Front-to-back draw order, index 0 = primary. Always a permutation of
    /// the live pane ids.
    order: Vec<PaneId>,
    mode: DisplayConfiguration,
    container: Size,
    gesture: InteractionController,
    detach_listeners: Vec<DetachListener>,
}

impl PaneEngine {
    pub fn new(config: QuadviewConfig, container: Size) -> Self {
        info!(
            "🚀 Pane engine starting ({}x{} container)",
            container.width, container.height
        );
        Self {
            config,
            panes: PaneRegistry::new(),
            frames: FrameStore::new(),
            order: Vec::new(),
            mode: DisplayConfiguration::default(),
            container,
            gesture: InteractionController::new(),
            detach_listeners: Vec::new(),
        }
    }

    /// Register a callback fired when a pane's content surface is detached.
    pub fn add_detach_listener<F>(&mut self, listener: F)
    where
        F: Fn(PaneId) + Send + Sync + 'static,
    {
        self.detach_listeners.push(Box::new(listener));
    }

    /// Add a new pane at the back of the order.
    ///
    /// In automatic modes every frame is recomputed; in manual mode only the
    /// new pane is placed, into the tiled cell its order index would occupy.
    pub fn add_pane(&mut self) -> Result<PaneId, EngineError> {
        let id = self
            .panes
            .create()
            .ok_or(EngineError::CapacityExceeded { max: MAX_PANES })?;
        self.order.push(id);
        info!("🪟 Added {} ({} live)", id, self.order.len());

        if self.mode.is_automatic() {
            self.relayout(Commit::Animated);
        } else {
            let index = self.order.len() - 1;
            let rect = layout::compute(
                DisplayConfiguration::Tiled,
                &self.order,
                self.container,
                &self.config,
            )
            .and_then(|cells| cells.get(&id).copied())
            .unwrap_or_else(|| {
                fallback_rect(
                    index,
                    self.config.layout.pane_padding,
                    self.config.layout.toolbar_strip_height,
                )
            });
            self.frames.set(id, rect, Commit::Immediate);
        }
        Ok(id)
    }

    /// Remove a pane. Silent no-op when the id is not live.
    pub fn remove_pane(&mut self, id: PaneId) {
        if self.panes.remove(id).is_none() {
            debug!("Ignoring removal of unknown {}", id);
            return;
        }
        self.notify_detach(id);
        self.gesture.cancel_pane(id);
        self.frames.remove(id);
        self.order.retain(|p| *p != id);
        info!("🗑️ Removed {} ({} live)", id, self.order.len());

        if self.mode.is_automatic() {
            self.relayout(Commit::Animated);
        }
    }

    /// Switch the presentation mode. Entering an automatic mode recomputes
    /// every frame; entering manual keeps the frames as they are.
    pub fn set_display_configuration(&mut self, mode: DisplayConfiguration) {
        if self.mode == mode {
            return;
        }
        info!("🔄 Display configuration: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        if mode.is_automatic() {
            self.relayout(Commit::Animated);
        }
    }

    /// Promote a pane to primary, swapping frames so the promoted pane takes
    /// the most prominent slot. Silent no-op for unknown ids.
    pub fn bring_pane_to_front(&mut self, id: PaneId) {
        self.bring_to_front(id, true);
    }

    /// Rotate the arrangement one step in the visually perceived direction.
    /// Requires at least two panes.
    pub fn cycle_panes(&mut self, direction: CycleDirection) {
        let n = self.order.len();
        if n < 2 {
            return;
        }
        debug!("Cycling {} panes {:?}", n, direction);

        match self.mode {
            // Index drives both position and depth in these modes, so the
            // order itself rotates and the formula reapplies.
            DisplayConfiguration::Rotated3d | DisplayConfiguration::Layered => {
                match direction {
                    CycleDirection::Clockwise => self.order.rotate_left(1),
                    CycleDirection::CounterClockwise => self.order.rotate_right(1),
                }
                self.relayout(Commit::Animated);
            }
            _ => {
                let visual = ordering::visual_cycle_order(&self.order, &self.frames);
                let primary_at = visual
                    .iter()
                    .position(|p| *p == self.order[0])
                    .unwrap_or(0);
                let target = match direction {
                    CycleDirection::Clockwise => visual[(primary_at + 1) % n],
                    CycleDirection::CounterClockwise => visual[(primary_at + n - 1) % n],
                };
                ordering::rotate_ring(&visual, direction, &mut self.frames);
                self.bring_to_front(target, false);
            }
        }
    }

    /// Start dragging a pane. Returns whether the gesture was armed.
    pub fn begin_pane_drag(&mut self, id: PaneId) -> bool {
        match self.frames.get(id) {
            Some(frame) if self.panes.contains(id) => self.gesture.begin_drag(id, frame),
            _ => false,
        }
    }

    /// Feed a drag pointer move (cumulative delta since gesture start).
    /// Returns the uncommitted live origin for the renderer. The first
    /// effective movement switches the engine to manual mode.
    pub fn update_pane_drag(&mut self, id: PaneId, cumulative: Point) -> Option<Point> {
        let origin =
            self.gesture
                .drag_update(id, cumulative, self.config.layout.toolbar_strip_height)?;
        self.enter_manual_for_gesture();
        Some(origin)
    }

    /// Finish a drag, committing the final frame without animation. Returns
    /// the committed frame, or `None` when the gesture never became active.
    pub fn end_pane_drag(&mut self, id: PaneId) -> Option<Rect> {
        let rect = self
            .gesture
            .end_drag(id, self.config.layout.toolbar_strip_height)?;
        self.frames.set(id, rect, Commit::Immediate);
        Some(rect)
    }

    /// Start resizing a pane from its bottom-right. Animations are
    /// suppressed until the gesture ends.
    pub fn begin_pane_resize(&mut self, id: PaneId) -> bool {
        let armed = match self.frames.get(id) {
            Some(frame) if self.panes.contains(id) => self.gesture.begin_resize(id, frame),
            _ => false,
        };
        if armed {
            self.frames.set_animations_suppressed(true);
        }
        armed
    }

    /// Feed a resize pointer move; the new size commits immediately with the
    /// origin fixed. Returns the committed size.
    pub fn update_pane_resize(&mut self, id: PaneId, cumulative: Point) -> Option<Size> {
        let size = self
            .gesture
            .resize_update(id, cumulative, self.config.layout.min_pane_size)?;
        self.enter_manual_for_gesture();
        if let Some(current) = self.frames.get(id) {
            self.frames.set(
                id,
                Rect::from_origin_and_size(current.origin(), size),
                Commit::Immediate,
            );
        }
        Some(size)
    }

    /// Finish a resize and lift animation suppression.
    pub fn end_pane_resize(&mut self, id: PaneId) -> bool {
        let finished = self.gesture.end_resize(id);
        if finished {
            self.frames.set_animations_suppressed(false);
        }
        finished
    }

    /// React to the container changing size. Automatic modes recompute;
    /// manual mode rescales proportionally, except that a single pane is
    /// re-fitted to the full inner area.
    pub fn on_container_resize(&mut self, new: Size) {
        if new.is_degenerate() {
            warn!(
                "Ignoring degenerate container size {}x{}",
                new.width, new.height
            );
            return;
        }
        let old = self.container;
        self.container = new;
        if old == new {
            return;
        }
        debug!(
            "Container resized {}x{} -> {}x{}",
            old.width, old.height, new.width, new.height
        );

        if self.mode.is_automatic() {
            self.relayout(Commit::Animated);
        } else if self.order.len() == 1 {
            if let Some(frames) = layout::compute(
                DisplayConfiguration::Tiled,
                &self.order,
                new,
                &self.config,
            ) {
                self.frames.set_all(frames, Commit::Animated);
            }
        } else if let Some(scaled) =
            layout::rescale(&self.frames.snapshot(), old, new, &self.config)
        {
            self.frames.set_all(scaled, Commit::Animated);
        }
    }

    /// Capture the live arrangement as a named demo layout. Panes are
    /// snapshotted in front order; a pane without a frame gets the
    /// deterministic per-index fallback.
    pub fn capture_demo_snapshot(&self, name: &str) -> DemoLayout {
        let l = &self.config.layout;
        let panes = self
            .order
            .iter()
            .enumerate()
            .filter_map(|(index, id)| {
                let pane = self.panes.get(*id)?;
                let frame = self
                    .frames
                    .get(*id)
                    .unwrap_or_else(|| fallback_rect(index, l.pane_padding, l.toolbar_strip_height));
                Some(DemoPaneSnapshot {
                    title: pane.title.clone(),
                    show_border: pane.show_border,
                    border_color_index: pane.border_color_index,
                    zoom: pane.zoom,
                    display_number: pane.display_number,
                    url: pane.url.clone(),
                    frame,
                })
            })
            .collect();

        info!("📸 Captured demo layout '{}'", name);
        DemoLayout {
            id: 0,
            name: name.to_string(),
            display_configuration: self.mode,
            panes,
            created_at: unix_now(),
        }
    }

    /// Replace the live arrangement with a demo layout. Every live pane is
    /// detached first; snapshot data is sanitized, never rejected.
    pub fn apply_demo_snapshot(&mut self, demo: &DemoLayout) {
        let demo = demo.sanitized(&self.config);
        info!(
            "🎬 Applying demo layout '{}' ({} panes, {:?})",
            demo.name,
            demo.panes.len(),
            demo.display_configuration
        );

        for id in std::mem::take(&mut self.order) {
            self.notify_detach(id);
        }
        self.gesture.reset();
        self.frames.set_animations_suppressed(false);
        self.frames.clear();
        self.panes.clear();
        self.mode = demo.display_configuration;

        for snapshot in &demo.panes {
            match self.panes.create_restored(snapshot.attributes()) {
                Some(id) => {
                    self.order.push(id);
                    if self.mode == DisplayConfiguration::Manual {
                        self.frames.set(id, snapshot.frame, Commit::Immediate);
                    }
                }
                None => break,
            }
        }

        if self.mode.is_automatic() {
            self.relayout(Commit::Immediate);
            // A degenerate container leaves restored panes frameless; give
            // them the staircase fallback so every live pane has a frame.
            let l = &self.config.layout;
            for (index, id) in self.order.iter().enumerate() {
                if !self.frames.contains(*id) {
                    self.frames.set(
                        *id,
                        fallback_rect(index, l.pane_padding, l.toolbar_strip_height),
                        Commit::Immediate,
                    );
                }
            }
        }
    }

    pub fn order(&self) -> &[PaneId] {
        &self.order
    }

    pub fn display_configuration(&self) -> DisplayConfiguration {
        self.mode
    }

    pub fn frame(&self, id: PaneId) -> Option<Rect> {
        self.frames.get(id)
    }

    /// Commit kind of a pane's last frame write, for the renderer.
    pub fn frame_commit(&self, id: PaneId) -> Option<Commit> {
        self.frames.last_commit(id)
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        self.panes.get(id)
    }

    pub fn pane_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        self.panes.get_mut(id)
    }

    pub fn pane_count(&self) -> usize {
        self.order.len()
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn config(&self) -> &QuadviewConfig {
        &self.config
    }

    /// Move a pane to the front of the order, optionally swapping frames so
    /// the promoted pane takes the primary slot's geometry.
    fn bring_to_front(&mut self, id: PaneId, swap_frames: bool) {
        if !self.order.contains(&id) {
            debug!("Ignoring bring-to-front of unknown {}", id);
            return;
        }
        if self.order.first() == Some(&id) {
            return;
        }
        let new_order = ordering::promoted(&self.order, id);
        let old_order = std::mem::replace(&mut self.order, new_order);
        debug!("Promoted {} to primary", id);
        if !swap_frames {
            return;
        }

        match self.mode {
            DisplayConfiguration::Rotated3d => self.reposition_carousel_centers(),
            DisplayConfiguration::Layered => self.relayout(Commit::Animated),
            _ => ordering::reassign_slots(&old_order, &self.order, &mut self.frames),
        }
    }

    /// Recompute every frame for the current automatic mode. Skipped with
    /// frames retained when the container is degenerate.
    fn relayout(&mut self, commit: Commit) {
        match layout::compute(self.mode, &self.order, self.container, &self.config) {
            Some(frames) => self.frames.set_all(frames, commit),
            None => warn!(
                "Skipping {:?} layout for degenerate container {}x{}",
                self.mode, self.container.width, self.container.height
            ),
        }
    }

    /// Carousel promotion: each pane's center x follows its new index while
    /// its y and size stay put.
    fn reposition_carousel_centers(&mut self) {
        let Some(inner) = layout::inner_area(self.container, &self.config) else {
            return;
        };
        let count = self.order.len();
        for (index, id) in self.order.clone().into_iter().enumerate() {
            if let Some(rect) = self.frames.get(id) {
                let cx =
                    layout::rotated_center_x(index, count, inner, self.container, &self.config);
                self.frames.set(
                    id,
                    Rect::new(cx - rect.width / 2.0, rect.y, rect.width, rect.height),
                    Commit::Animated,
                );
            }
        }
    }

    /// Drags and resizes put the arrangement under user control.
    fn enter_manual_for_gesture(&mut self) {
        if self.mode != DisplayConfiguration::Manual {
            info!("✋ Gesture took over; display configuration -> Manual");
            self.mode = DisplayConfiguration::Manual;
        }
    }

    fn notify_detach(&self, id: PaneId) {
        for listener in &self.detach_listeners {
            listener(id);
        }
    }
}

#[cfg(test)]
mod tests;
