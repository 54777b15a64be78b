//! # Quadview Pane Engine Library
//!
//! The layout and ordering engine behind a multi-pane browsing window:
//! up to four isolated content panes in one container, with deterministic
//! automatic layouts, geometry-aware cycling, and drag/resize gestures.
//!
//! ## Architecture
//!
//! Quadview is built on a modular architecture:
//! - `geometry`: Point/Size/Rect value types and pure arithmetic
//! - `config`: Configuration parsing and management
//! - `pane`: Pane identity, display numbers, and presentation attributes
//! - `frames`: Authoritative pane-to-rectangle store with commit kinds
//! - `layout`: Per-mode layout computation (tiled, focused, carousel, layered)
//! - `ordering`: Front order and visual cyclic ordering helpers
//! - `interaction`: Drag and resize gesture state machine
//! - `demo`: Demo layout snapshots, sanitation, and the JSON-backed store
//! - `engine`: The `PaneEngine` facade tying everything together
//!
//! ## Usage
//!
//! ```rust
//! use quadview::{PaneEngine, QuadviewConfig, Size};
//!
//! let mut engine = PaneEngine::new(QuadviewConfig::default(), Size::new(1200.0, 800.0));
//! let pane = engine.add_pane()?;
//! assert!(engine.frame(pane).is_some());
//! # Ok::<(), quadview::EngineError>(())
//! ```

pub mod config;
pub mod demo;
pub mod engine;
pub mod frames;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod ordering;
pub mod pane;

// Re-export main types for easy access
pub use config::QuadviewConfig;
pub use demo::{DemoLayout, DemoPaneSnapshot, DemoStore};
pub use engine::{EngineError, PaneEngine};
pub use frames::{Commit, FrameStore};
pub use geometry::{Point, Rect, Size};
pub use layout::DisplayConfiguration;
pub use ordering::CycleDirection;
pub use pane::{Pane, PaneId, ZoomLevel, MAX_PANES};

/// Version information for Quadview
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
