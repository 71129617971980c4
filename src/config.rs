// src/config.rs

//! Defines the configuration tree for the engine.
//!
//! Every constant the core depends on — the world grid dimension, the zoom
//! gates, the sub-tile size, viewport padding, overlay cosmetics and the
//! paint rationing parameters — lives here rather than being hard-assumed
//! at its point of use. The tree is deserializable (JSON or any other serde
//! format the embedding application prefers), with `#[serde(default)]` at
//! every level so a partial document only overrides what it names.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Root configuration for the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World grid geometry.
    pub grid: GridConfig,
    /// Zoom gates for cell visibility and interaction.
    pub zoom: ZoomConfig,
    /// Redraw cosmetics (padding, preview and grid-line sizing).
    pub render: RenderConfig,
    /// Paint rationing.
    pub ration: RationConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields fall back to their defaults section by section.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse engine configuration")
    }
}

/// Geometry of the fixed-resolution world grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Number of cells along each axis of the square world grid. A cell
    /// coordinate `(x, y)` is valid iff both components are in
    /// `[0, world_dimension)`.
    pub world_dimension: u32,
    /// Side length of one sub-tile for informational tile addressing.
    pub tile_size: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            world_dimension: 1_300_000,
            tile_size: 256,
        }
    }
}

/// Zoom thresholds, in the host map's zoom-level scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomConfig {
    /// Painted cells are rendered at all only from this zoom onwards.
    pub pixel_visibility_threshold: f64,
    /// The alignment grid, hover reticle and all tool interactions are
    /// active only from this zoom onwards.
    pub grid_threshold: f64,
    /// Zoom the host map is expected to start at. Informational.
    pub initial: f64,
    /// Host map zoom range. Informational; the engine never clamps.
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        ZoomConfig {
            pixel_visibility_threshold: 4.0,
            grid_threshold: 12.0,
            initial: 4.0,
            min: 3.0,
            max: 30.0,
        }
    }
}

/// Redraw cosmetics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Ratio by which the viewport bounds are padded before visibility
    /// tests, so cells do not pop at the screen edge mid-pan.
    pub bounds_pad: f64,
    /// The alignment grid is skipped entirely when one world cell maps to
    /// fewer than this many screen pixels on either axis.
    pub min_cell_px_for_grid: f64,
    /// Side length of the floating tool-preview swatch, in screen pixels.
    pub preview_size: f64,
    /// Offset of the preview swatch from the pointer, applied on both axes.
    pub preview_offset: f64,
    /// Side length of one checkerboard square in the empty-cell preview.
    pub preview_checker_size: f64,
    /// Number of entries kept in the recently-used color history.
    pub history_palette_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            bounds_pad: 0.2,
            min_cell_px_for_grid: 2.0,
            preview_size: 24.0,
            preview_offset: 16.0,
            preview_checker_size: 6.0,
            history_palette_size: 8,
        }
    }
}

/// Paint rationing: the place action draws from a slowly refilling counter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RationConfig {
    /// Maximum (and initial) number of stored paint charges.
    pub max: u32,
    /// Charges restored per refill tick.
    pub refill_amount: u32,
    /// Interval between refill ticks, for the collaborator driving the
    /// clock. The engine itself never schedules timers.
    pub refill_interval_ms: u64,
}

impl Default for RationConfig {
    fn default() -> Self {
        RationConfig {
            max: 500,
            refill_amount: 1,
            refill_interval_ms: 1500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = Config::from_json(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_json_keeps_defaults_elsewhere() {
        let config =
            Config::from_json(r#"{ "grid": { "world_dimension": 1024 }, "zoom": { "max": 22.0 } }"#)
                .unwrap();
        assert_eq!(config.grid.world_dimension, 1024);
        assert_eq!(config.grid.tile_size, 256);
        assert_eq!(config.zoom.max, 22.0);
        assert_eq!(config.zoom.grid_threshold, 12.0);
        assert_eq!(config.ration.max, 500);
    }

    #[test]
    fn garbage_json_is_an_error() {
        assert!(Config::from_json("{ nope").is_err());
    }
}
