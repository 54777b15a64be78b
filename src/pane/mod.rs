//! Pane identity and presentation attributes.
//!
//! A pane is one independently navigable content surface shown in the
//! window. This module owns everything about a pane except its geometry:
//! identity, display number, border color, title, zoom, and last-known URL.
//! Frames live in the [`crate::frames`] module.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::Rect;

/// Maximum number of simultaneously live panes.
pub const MAX_PANES: usize = 4;

/// Fixed border color palette; `border_color_index` indexes into this.
/// Indices cycle, so colors repeat once more than eight panes have been
/// created over the engine's lifetime.
pub const BORDER_PALETTE: [&str; 8] = [
    "#7C3AED", // purple
    "#2563EB", // blue
    "#059669", // green
    "#D97706", // amber
    "#DC2626", // red
    "#DB2777", // pink
    "#0891B2", // cyan
    "#65A30D", // lime
];

/// Opaque pane identifier, stable for the pane's lifetime and never reused
/// within an engine instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct PaneId(pub u64);

impl std::fmt::Display for PaneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pane-{}", self.0)
    }
}

/// Content zoom, one of five ordered levels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomLevel {
    XSmall,
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
}

/// One pane's identity and presentation attributes (no geometry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pane {
    pub id: PaneId,

    /// 1..=4 among live panes, 0 when unassigned. Used for keyboard
    /// selection and on-screen badges.
    pub display_number: u8,

    /// Index into [`BORDER_PALETTE`]; not unique among panes.
    pub border_color_index: usize,

    pub show_border: bool,

    pub title: String,

    pub zoom: ZoomLevel,

    /// Last known navigated address; opaque to the engine.
    pub url: String,
}

/// Attribute bundle used when restoring a pane from a demo snapshot.
#[derive(Debug, Clone)]
pub struct PaneAttributes {
    pub display_number: u8,
    pub border_color_index: usize,
    pub show_border: bool,
    pub title: String,
    pub zoom: ZoomLevel,
    pub url: String,
}

/// Owns the set of live panes, capped at [`MAX_PANES`].
///
/// Identifier and color allocation survive `clear()` so ids are never reused
/// across a demo restore.
#[derive(Debug, Default)]
pub struct PaneRegistry {
    panes: HashMap<PaneId, Pane>,
    next_id: u64,
    next_color: usize,
}

impl PaneRegistry {
    pub fn new() -> Self {
        Self {
            panes: HashMap::new(),
            next_id: 1,
            next_color: 0,
        }
    }

    /// Create a new pane with default attributes. Returns `None` when the
    /// pane cap is already reached.
    pub fn create(&mut self) -> Option<PaneId> {
        if self.panes.len() >= MAX_PANES {
            return None;
        }

        let id = self.allocate_id();
        let display_number = self.smallest_unused_display_number();
        let border_color_index = self.next_color % BORDER_PALETTE.len();
        self.next_color += 1;

        let pane = Pane {
            id,
            display_number,
            border_color_index,
            show_border: true,
            title: String::new(),
            zoom: ZoomLevel::default(),
            url: String::new(),
        };
        self.panes.insert(id, pane);

        debug!("Created {} with display number {}", id, display_number);
        Some(id)
    }

    /// Create a pane carrying restored attributes. The requested display
    /// number is honored when it is in range and unused; otherwise the
    /// smallest unused number is assigned.
    pub fn create_restored(&mut self, attrs: PaneAttributes) -> Option<PaneId> {
        if self.panes.len() >= MAX_PANES {
            return None;
        }

        let id = self.allocate_id();
        let requested = attrs.display_number;
        let display_number = if (1..=MAX_PANES as u8).contains(&requested)
            && !self.display_number_in_use(requested)
        {
            requested
        } else {
            self.smallest_unused_display_number()
        };

        let pane = Pane {
            id,
            display_number,
            border_color_index: attrs.border_color_index % BORDER_PALETTE.len(),
            show_border: attrs.show_border,
            title: attrs.title,
            zoom: attrs.zoom,
            url: attrs.url,
        };
        self.panes.insert(id, pane);

        debug!("Restored {} with display number {}", id, display_number);
        Some(id)
    }

    pub fn remove(&mut self, id: PaneId) -> Option<Pane> {
        self.panes.remove(&id)
    }

    /// Drop all panes, keeping id/color allocation state.
    pub fn clear(&mut self) {
        self.panes.clear();
    }

    pub fn get(&self, id: PaneId) -> Option<&Pane> {
        self.panes.get(&id)
    }

    pub fn get_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        self.panes.get_mut(&id)
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.panes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.panes.len() >= MAX_PANES
    }

    pub fn panes(&self) -> impl Iterator<Item = &Pane> {
        self.panes.values()
    }

    fn allocate_id(&mut self) -> PaneId {
        let id = PaneId(self.next_id);
        self.next_id += 1;
        id
    }

    fn display_number_in_use(&self, number: u8) -> bool {
        self.panes.values().any(|p| p.display_number == number)
    }

    fn smallest_unused_display_number(&self) -> u8 {
        (1..=MAX_PANES as u8)
            .find(|n| !self.display_number_in_use(*n))
            .unwrap_or(0)
    }
}

/// Deterministic rectangle for a pane whose geometry is not yet established
/// (demo capture/apply fallback): a fixed 16:9 cell on a 32-unit staircase
/// from the padded inner origin, distinct per order index.
pub fn fallback_rect(index: usize, padding: f64, toolbar_strip_height: f64) -> Rect {
    let step = 32.0 * index as f64;
    Rect::new(padding + step, toolbar_strip_height + step, 640.0, 360.0)
}
