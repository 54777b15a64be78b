//! Configuration management for Quadview.
//!
//! This module handles loading, parsing, and validating configuration from
//! TOML files. It combines the shared layout metrics with the tuned constants
//! of the focused, carousel, and layered presentation modes.
//!
//! The per-mode scale factors carried here (the 1.15 focused scale, the
//! 1.09375 carousel scale, the 3% centering bias, and friends) are tuned
//! visual constants. They are kept as named configuration fields with fixed
//! defaults rather than derived quantities.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration struct containing all Quadview settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct QuadviewConfig {
    /// Shared layout metrics (toolbar strip, padding, minimum pane size)
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Focused-mode geometry (large primary plus an L of secondaries)
    #[serde(default)]
    pub focused: FocusedConfig,

    /// Pseudo-3D carousel geometry
    #[serde(default)]
    pub rotated: RotatedConfig,

    /// Overlapping layered-stack geometry
    #[serde(default)]
    pub layered: LayeredConfig,
}

/// Shared layout metrics applied in every mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Height of the window's top control strip; no pane may extend above it
    #[serde(default = "LayoutConfig::default_toolbar_strip_height")]
    pub toolbar_strip_height: f64,

    /// Padding between panes and against the container's side/bottom edges
    #[serde(default = "LayoutConfig::default_pane_padding")]
    pub pane_padding: f64,

    /// Minimum pane width and height after any layout, drag, or resize
    #[serde(default = "LayoutConfig::default_min_pane_size")]
    pub min_pane_size: f64,
}

/// Focused-mode geometry constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FocusedConfig {
    /// Primary pane width as a fraction of the inner width
    #[serde(default = "FocusedConfig::default_primary_width_ratio")]
    pub primary_width_ratio: f64,

    /// Scale applied to the primary pane after the base size is chosen
    #[serde(default = "FocusedConfig::default_primary_scale")]
    pub primary_scale: f64,

    /// Secondary cell width cap as a fraction of the inner width
    #[serde(default = "FocusedConfig::default_secondary_width_ratio")]
    pub secondary_width_ratio: f64,

    /// Secondary cell width cap as a fraction of the primary width
    #[serde(default = "FocusedConfig::default_secondary_primary_ratio")]
    pub secondary_primary_ratio: f64,

    /// Secondary cell width floor as a fraction of the inner width
    #[serde(default = "FocusedConfig::default_secondary_min_ratio")]
    pub secondary_min_ratio: f64,
}

/// Pseudo-3D carousel geometry constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotatedConfig {
    /// Scale applied to the shared 16:9 pane size
    #[serde(default = "RotatedConfig::default_scale")]
    pub scale: f64,

    /// Clamp on the shared pane size as a fraction of the inner area
    #[serde(default = "RotatedConfig::default_clamp_ratio")]
    pub clamp_ratio: f64,

    /// Horizontal distance between successive pane centers (units)
    #[serde(default = "RotatedConfig::default_center_step")]
    pub center_step: f64,

    /// Leftward bias of the stack as a fraction of the container width
    #[serde(default = "RotatedConfig::default_center_bias")]
    pub center_bias: f64,
}

/// Layered-stack geometry constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayeredConfig {
    /// Shared pane size as a fraction of the inner width/height
    #[serde(default = "LayeredConfig::default_size_ratio")]
    pub size_ratio: f64,

    /// Rightward inset of the primary pane from the inner origin (units)
    #[serde(default = "LayeredConfig::default_primary_inset")]
    pub primary_inset: f64,

    /// Per-step corner offset as a fraction of the pane width/height
    #[serde(default = "LayeredConfig::default_overlap_ratio")]
    pub overlap_ratio: f64,

    /// Upper bound on the per-step corner offset (units)
    #[serde(default = "LayeredConfig::default_overlap_cap")]
    pub overlap_cap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            toolbar_strip_height: Self::default_toolbar_strip_height(),
            pane_padding: Self::default_pane_padding(),
            min_pane_size: Self::default_min_pane_size(),
        }
    }
}

impl Default for FocusedConfig {
    fn default() -> Self {
        Self {
            primary_width_ratio: Self::default_primary_width_ratio(),
            primary_scale: Self::default_primary_scale(),
            secondary_width_ratio: Self::default_secondary_width_ratio(),
            secondary_primary_ratio: Self::default_secondary_primary_ratio(),
            secondary_min_ratio: Self::default_secondary_min_ratio(),
        }
    }
}

impl Default for RotatedConfig {
    fn default() -> Self {
        Self {
            scale: Self::default_scale(),
            clamp_ratio: Self::default_clamp_ratio(),
            center_step: Self::default_center_step(),
            center_bias: Self::default_center_bias(),
        }
    }
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self {
            size_ratio: Self::default_size_ratio(),
            primary_inset: Self::default_primary_inset(),
            overlap_ratio: Self::default_overlap_ratio(),
            overlap_cap: Self::default_overlap_cap(),
        }
    }
}

impl LayoutConfig {
    fn default_toolbar_strip_height() -> f64 {
        40.0
    }
    fn default_pane_padding() -> f64 {
        16.0
    }
    fn default_min_pane_size() -> f64 {
        100.0
    }
}

impl FocusedConfig {
    fn default_primary_width_ratio() -> f64 {
        0.7
    }
    fn default_primary_scale() -> f64 {
        1.15
    }
    fn default_secondary_width_ratio() -> f64 {
        0.4
    }
    fn default_secondary_primary_ratio() -> f64 {
        0.75
    }
    fn default_secondary_min_ratio() -> f64 {
        0.28
    }
}

impl RotatedConfig {
    fn default_scale() -> f64 {
        1.09375
    }
    fn default_clamp_ratio() -> f64 {
        0.78125
    }
    fn default_center_step() -> f64 {
        100.0
    }
    fn default_center_bias() -> f64 {
        0.03
    }
}

impl LayeredConfig {
    fn default_size_ratio() -> f64 {
        0.9
    }
    fn default_primary_inset() -> f64 {
        80.0
    }
    fn default_overlap_ratio() -> f64 {
        0.04
    }
    fn default_overlap_cap() -> f64 {
        20.0
    }
}

impl QuadviewConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Expand ~ to home directory
        let expanded_path = if path.to_string_lossy().starts_with('~') {
            let home = std::env::var("HOME").context("Failed to get HOME environment variable")?;
            Path::new(&home).join(path.strip_prefix("~").unwrap_or(path))
        } else {
            path.to_path_buf()
        };

        let contents = fs::read_to_string(&expanded_path)
            .with_context(|| format!("Failed to read config file: {}", expanded_path.display()))?;

        let config: QuadviewConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", expanded_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.layout.toolbar_strip_height < 0.0 {
            anyhow::bail!("Invalid toolbar_strip_height: must be non-negative");
        }
        if self.layout.pane_padding < 0.0 {
            anyhow::bail!("Invalid pane_padding: must be non-negative");
        }
        if self.layout.min_pane_size <= 0.0 {
            anyhow::bail!("Invalid min_pane_size: must be positive");
        }

        if self.focused.primary_width_ratio <= 0.0 || self.focused.primary_width_ratio > 1.0 {
            anyhow::bail!("Invalid primary_width_ratio: must be in (0.0, 1.0]");
        }
        if self.focused.primary_scale <= 0.0 {
            anyhow::bail!("Invalid primary_scale: must be positive");
        }
        if self.focused.secondary_min_ratio > self.focused.secondary_width_ratio {
            anyhow::bail!("Invalid secondary ratios: floor exceeds cap");
        }

        if self.rotated.scale <= 0.0 {
            anyhow::bail!("Invalid rotated scale: must be positive");
        }
        if self.rotated.clamp_ratio <= 0.0 || self.rotated.clamp_ratio > 1.0 {
            anyhow::bail!("Invalid rotated clamp_ratio: must be in (0.0, 1.0]");
        }
        if self.rotated.center_step <= 0.0 {
            anyhow::bail!("Invalid center_step: must be positive");
        }

        if self.layered.size_ratio <= 0.0 || self.layered.size_ratio > 1.0 {
            anyhow::bail!("Invalid layered size_ratio: must be in (0.0, 1.0]");
        }
        if self.layered.overlap_ratio < 0.0 || self.layered.overlap_cap < 0.0 {
            anyhow::bail!("Invalid layered overlap: must be non-negative");
        }

        Ok(())
    }

    /// Save configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, contents).context("Failed to write configuration file")?;

        Ok(())
    }
}
