//! Demo layout snapshots: capture, sanitation, and the JSON-backed store.
//!
//! A demo layout is a named, self-contained snapshot of the engine state:
//! display configuration plus per-pane attributes and frames, ordered
//! front-to-back. Snapshots round-trip through JSON and may come from
//! untrusted files, so every field is sanitized on the way in rather than
//! rejected.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::QuadviewConfig;
use crate::geometry::Rect;
use crate::layout::DisplayConfiguration;
use crate::pane::{fallback_rect, PaneAttributes, ZoomLevel, BORDER_PALETTE, MAX_PANES};

/// One pane's captured attributes and frame, identity-free. Pane ids are
/// never persisted; restore allocates fresh ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoPaneSnapshot {
    #[serde(default)]
    pub title: String,

    #[serde(default = "default_show_border")]
    pub show_border: bool,

    #[serde(default)]
    pub border_color_index: usize,

    #[serde(default)]
    pub zoom: ZoomLevel,

    /// 1..=4, or 0 for "assign on restore".
    #[serde(default)]
    pub display_number: u8,

    #[serde(default)]
    pub url: String,

    pub frame: Rect,
}

fn default_show_border() -> bool {
    true
}

impl DemoPaneSnapshot {
    /// The restore-time attribute bundle for this snapshot.
    pub fn attributes(&self) -> PaneAttributes {
        PaneAttributes {
            display_number: self.display_number,
            border_color_index: self.border_color_index,
            show_border: self.show_border,
            title: self.title.clone(),
            zoom: self.zoom,
            url: self.url.clone(),
        }
    }

    /// Repair out-of-range fields in place of rejecting the snapshot. The
    /// order index feeds the staircase fallback so repaired frames stay
    /// visually distinct.
    pub fn sanitized(&self, index: usize, cfg: &QuadviewConfig) -> Self {
        let mut snapshot = self.clone();

        snapshot.border_color_index %= BORDER_PALETTE.len();
        if snapshot.display_number > MAX_PANES as u8 {
            snapshot.display_number = 0;
        }

        let l = &cfg.layout;
        let frame = snapshot.frame;
        if !frame.is_finite() || frame.width < l.min_pane_size || frame.height < l.min_pane_size {
            warn!(
                "Replacing unusable demo frame {:?} for slot {}",
                frame, index
            );
            snapshot.frame = fallback_rect(index, l.pane_padding, l.toolbar_strip_height);
        } else {
            snapshot.frame = frame.clamped_top(l.toolbar_strip_height);
        }
        snapshot
    }
}

/// A named snapshot of the full pane arrangement. `panes` is ordered
/// front-to-back (index 0 = primary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoLayout {
    #[serde(default)]
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub display_configuration: DisplayConfiguration,

    #[serde(default)]
    pub panes: Vec<DemoPaneSnapshot>,

    /// Capture time, Unix seconds.
    #[serde(default)]
    pub created_at: u64,
}

impl DemoLayout {
    /// Sanitize every pane snapshot and drop any beyond the pane cap.
    pub fn sanitized(&self, cfg: &QuadviewConfig) -> Self {
        let mut layout = self.clone();
        if layout.panes.len() > MAX_PANES {
            warn!(
                "Demo '{}' carries {} panes; keeping the front {}",
                layout.name,
                layout.panes.len(),
                MAX_PANES
            );
            layout.panes.truncate(MAX_PANES);
        }
        layout.panes = layout
            .panes
            .iter()
            .enumerate()
            .map(|(index, pane)| pane.sanitized(index, cfg))
            .collect();
        layout
    }
}

/// Current time as Unix seconds, zero if the clock reads before the epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Collection of saved demo layouts in most-recently-saved order.
#[derive(Debug, Default)]
pub struct DemoStore {
    demos: Vec<DemoLayout>,
    next_id: u64,
}

impl DemoStore {
    pub fn new() -> Self {
        Self {
            demos: Vec::new(),
            next_id: 1,
        }
    }

    /// Save a layout under its name. A case-insensitive name match replaces
    /// the existing entry, keeping its id and creation time; either way the
    /// entry moves to the front.
    pub fn save(&mut self, mut layout: DemoLayout) {
        match self.remove_by_name(&layout.name) {
            Some(existing) => {
                layout.id = existing.id;
                layout.created_at = existing.created_at;
                info!("📸 Updated demo layout '{}'", layout.name);
            }
            None => {
                layout.id = self.next_id;
                self.next_id += 1;
                info!("📸 Saved new demo layout '{}'", layout.name);
            }
        }
        self.demos.insert(0, layout);
    }

    /// Delete by case-insensitive name. Returns whether an entry was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        let removed = self.remove_by_name(name).is_some();
        if removed {
            info!("Deleted demo layout '{}'", name);
        }
        removed
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&DemoLayout> {
        self.demos
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DemoLayout> {
        self.demos.iter()
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }

    /// Serialize the whole store for persistence.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.demos).context("Failed to serialize demo layouts")
    }

    /// Rebuild a store from persisted JSON, sanitizing every layout. Id
    /// allocation resumes past the largest persisted id.
    pub fn from_json(json: &str, cfg: &QuadviewConfig) -> Result<Self> {
        let raw: Vec<DemoLayout> =
            serde_json::from_str(json).context("Failed to parse demo layouts")?;

        let demos: Vec<DemoLayout> = raw.iter().map(|d| d.sanitized(cfg)).collect();
        let next_id = demos.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        info!("Loaded {} demo layout(s)", demos.len());

        Ok(Self { demos, next_id })
    }

    fn remove_by_name(&mut self, name: &str) -> Option<DemoLayout> {
        let index = self
            .demos
            .iter()
            .position(|d| d.name.eq_ignore_ascii_case(name))?;
        Some(self.demos.remove(index))
    }
}
