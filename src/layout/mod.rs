//! Automatic pane layout computation.
//!
//! Pure functions per presentation mode: given the ordered pane list
//! (index 0 = primary) and the container size, compute a rectangle per pane.
//! No side effects and no randomness, so recomputing with identical inputs
//! yields bit-identical rectangles — required for demo round-tripping.
//!
//! All modes lay out inside the padded inner area: the container minus the
//! side/bottom padding and the top toolbar strip. When that area is
//! degenerate (non-positive), computation is skipped and callers retain the
//! previous frames.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::QuadviewConfig;
use crate::geometry::{Rect, Size};
use crate::pane::PaneId;

/// Pane aspect ratio used by the tiled, focused, and carousel modes.
pub const ASPECT: f64 = 16.0 / 9.0;

/// The active presentation mode. A single global value; in any automatic
/// mode, frames are a pure function of `(order, container, mode, config)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayConfiguration {
    /// Frames are mutated only by user drag/resize and initial placement.
    Manual,
    /// Deterministic grid per pane count.
    #[default]
    Tiled,
    /// Large primary pane plus an L of secondary cells at the bottom-right.
    Focused,
    /// Pseudo-3D carousel along a shared horizontal axis.
    Rotated3d,
    /// Overlapping stack with a diagonal corner cascade.
    Layered,
}

impl DisplayConfiguration {
    pub fn is_automatic(&self) -> bool {
        !matches!(self, DisplayConfiguration::Manual)
    }
}

/// The padded, toolbar-excluded area available for pane placement.
pub fn inner_area(container: Size, cfg: &QuadviewConfig) -> Option<Rect> {
    if container.is_degenerate() {
        return None;
    }
    let l = &cfg.layout;
    let width = container.width - 2.0 * l.pane_padding;
    let height = container.height - l.toolbar_strip_height - l.pane_padding;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Rect::new(l.pane_padding, l.toolbar_strip_height, width, height))
}

/// Compute the frame of every pane for an automatic mode.
///
/// Cells are positional: cell `i` is assigned to `order[i]`, so repositioning
/// reassigns rectangles to panes rather than moving cells. Returns `None`
/// when the mode is `Manual` or the container is degenerate.
pub fn compute(
    mode: DisplayConfiguration,
    order: &[PaneId],
    container: Size,
    cfg: &QuadviewConfig,
) -> Option<HashMap<PaneId, Rect>> {
    let inner = inner_area(container, cfg)?;
    let cells = match mode {
        DisplayConfiguration::Manual => return None,
        DisplayConfiguration::Tiled => tiled_cells(order.len(), inner, cfg),
        DisplayConfiguration::Focused => focused_cells(order.len(), inner, cfg),
        DisplayConfiguration::Rotated3d => rotated_cells(order.len(), inner, container, cfg),
        DisplayConfiguration::Layered => layered_cells(order.len(), inner, cfg),
    };
    Some(
        order
            .iter()
            .zip(cells)
            .map(|(id, cell)| (*id, finalize(cell, cfg)))
            .collect(),
    )
}

/// Proportionally rescale manual-mode frames for a container size change.
/// Returns `None` when either size is degenerate (frames retained).
pub fn rescale(
    frames: &HashMap<PaneId, Rect>,
    old: Size,
    new: Size,
    cfg: &QuadviewConfig,
) -> Option<HashMap<PaneId, Rect>> {
    if old.is_degenerate() || new.is_degenerate() {
        return None;
    }
    let sx = new.width / old.width;
    let sy = new.height / old.height;
    Some(
        frames
            .iter()
            .map(|(id, rect)| (*id, finalize(rect.scaled(sx, sy), cfg)))
            .collect(),
    )
}

/// Shared pane size of the carousel mode.
pub fn rotated_pane_size(inner: Rect, cfg: &QuadviewConfig) -> Size {
    let r = &cfg.rotated;
    let mut width = inner.width.min(inner.height * ASPECT) * r.scale;
    let max_width = inner.width * r.clamp_ratio;
    let max_height = inner.height * r.clamp_ratio;
    if width > max_width {
        width = max_width;
    }
    let mut height = width / ASPECT;
    if height > max_height {
        height = max_height;
        width = height * ASPECT;
    }
    Size::new(width, height)
}

/// Center x of carousel pane `index` out of `count`. The shared base center
/// sits left of the inner center by half the total span plus the configured
/// bias fraction of the container width.
pub fn rotated_center_x(
    index: usize,
    count: usize,
    inner: Rect,
    container: Size,
    cfg: &QuadviewConfig,
) -> f64 {
    let r = &cfg.rotated;
    let span = r.center_step * count.saturating_sub(1) as f64;
    let base = inner.center().x - span / 2.0 - container.width * r.center_bias;
    base + r.center_step * index as f64
}

fn finalize(rect: Rect, cfg: &QuadviewConfig) -> Rect {
    let min = cfg.layout.min_pane_size;
    rect.floored_size(min, min)
        .clamped_top(cfg.layout.toolbar_strip_height)
}

fn tiled_cells(count: usize, inner: Rect, cfg: &QuadviewConfig) -> Vec<Rect> {
    let p = cfg.layout.pane_padding;
    match count {
        0 => Vec::new(),
        1 => vec![inner],
        2 => {
            let width = (inner.width - p) / 2.0;
            let height = inner.height.min(width / ASPECT);
            let y = inner.y + (inner.height - height) / 2.0;
            vec![
                Rect::new(inner.x, y, width, height),
                Rect::new(inner.x + width + p, y, width, height),
            ]
        }
        3 => {
            let width = (inner.width - p) / 2.0;
            let top_height = ((inner.height - p) / 2.0).min(width / ASPECT);
            let bottom_y = inner.y + top_height + p;
            let bottom_height = inner.height - top_height - p;
            vec![
                Rect::new(inner.x, inner.y, width, top_height),
                Rect::new(inner.x + width + p, inner.y, width, top_height),
                Rect::new(inner.x, bottom_y, inner.width, bottom_height),
            ]
        }
        _ => {
            let width = (inner.width - p) / 2.0;
            let height = (inner.height - p) / 2.0;
            vec![
                Rect::new(inner.x, inner.y, width, height),
                Rect::new(inner.x + width + p, inner.y, width, height),
                Rect::new(inner.x, inner.y + height + p, width, height),
                Rect::new(inner.x + width + p, inner.y + height + p, width, height),
            ]
        }
    }
}

fn focused_cells(count: usize, inner: Rect, cfg: &QuadviewConfig) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let f = &cfg.focused;

    // Primary: the larger of the width-ratio box and a 16:9 box bounded by
    // the inner height, scaled up, then clamped back into the inner area.
    let mut width = (inner.width * f.primary_width_ratio)
        .max(inner.height * ASPECT)
        * f.primary_scale;
    width = width.min(inner.width);
    let mut height = width / ASPECT;
    if height > inner.height {
        height = inner.height;
        width = (height * ASPECT).min(inner.width);
    }
    let mut cells = vec![Rect::new(inner.x, inner.y, width, height)];

    if count > 1 {
        let mut sec_width = (inner.width * f.secondary_width_ratio)
            .min(width * f.secondary_primary_ratio)
            .max(inner.width * f.secondary_min_ratio);
        let mut sec_height = sec_width / ASPECT;
        if sec_height > inner.height {
            sec_height = inner.height;
            sec_width = sec_height * ASPECT;
        }
        let p = cfg.layout.pane_padding;

        // L/J shape anchored at the inner bottom-right corner: the corner
        // cell, then the cell above it, then the cell to its left.
        let corner = Rect::new(
            inner.right() - sec_width,
            inner.bottom() - sec_height,
            sec_width,
            sec_height,
        );
        cells.push(corner);
        if count > 2 {
            cells.push(corner.translated(0.0, -(sec_height + p)));
        }
        if count > 3 {
            cells.push(corner.translated(-(sec_width + p), 0.0));
        }
    }
    cells
}

fn rotated_cells(count: usize, inner: Rect, container: Size, cfg: &QuadviewConfig) -> Vec<Rect> {
    let size = rotated_pane_size(inner, cfg);
    // Only x varies per pane; y is shared vertical centering.
    let y = inner.y + (inner.height - size.height) / 2.0;
    (0..count)
        .map(|index| {
            let cx = rotated_center_x(index, count, inner, container, cfg);
            Rect::new(cx - size.width / 2.0, y, size.width, size.height)
        })
        .collect()
}

fn layered_cells(count: usize, inner: Rect, cfg: &QuadviewConfig) -> Vec<Rect> {
    let l = &cfg.layered;
    let width = inner.width * l.size_ratio;
    let height = inner.height * l.size_ratio;
    let overlap = (width * l.overlap_ratio)
        .min(height * l.overlap_ratio)
        .min(l.overlap_cap);
    // Secondary k's bottom-right corner trails the primary's by k * overlap
    // on both axes; sizes are shared, so origins cascade the same way.
    (0..count)
        .map(|k| {
            Rect::new(
                inner.x + l.primary_inset + overlap * k as f64,
                inner.y + overlap * k as f64,
                width,
                height,
            )
        })
        .collect()
}
