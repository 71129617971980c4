// src/store.rs

//! A reference implementation of the application state container.
//!
//! The engine proper never owns the painted-cell mapping; it renders from a
//! snapshot and proposes mutations through [`PaintCallbacks`]. This module
//! supplies the other side of that contract: selected color and history,
//! tool toggling, the paint ration, and JSON import/export of the painted
//! map. Embedding applications with their own state management can ignore
//! it and implement [`PaintCallbacks`] themselves.
//!
//! Mutations of the painted map go through [`Rc::make_mut`], so any `Rc`
//! handed out earlier (a renderer mid-frame, a retained props snapshot)
//! keeps observing the version it was given.

use crate::color::{Rgb, DEFAULT_PALETTE};
use crate::config::Config;
use crate::geo::GeoPoint;
use crate::grid;
use crate::interaction::{PaintCallbacks, Tool};
use crate::layer::{PixelMap, Props};
use anyhow::Context;
use log::{debug, warn};
use std::rc::Rc;

/// Owns everything the layer reads through [`Props`], plus the ration and
/// color history the surrounding UI displays.
#[derive(Debug)]
pub struct PixelStore {
    config: Config,
    pixels: Rc<PixelMap>,
    selected_color: Rgb,
    /// Recently used colors, most recent first, deduplicated, capped at
    /// `config.render.history_palette_size`.
    color_history: Vec<Rgb>,
    active_tool: Option<Tool>,
    pencil_active: bool,
    grid_visible: bool,
    touch_device: bool,
    ration: u32,
    last_zoom: Option<f64>,
    popup_request: Option<GeoPoint>,
}

impl PixelStore {
    pub fn new(config: Config) -> Self {
        let ration = config.ration.max;
        PixelStore {
            config,
            pixels: Rc::new(PixelMap::new()),
            selected_color: DEFAULT_PALETTE[5],
            color_history: Vec::new(),
            active_tool: None,
            pencil_active: false,
            grid_visible: true,
            touch_device: false,
            ration,
            last_zoom: None,
            popup_request: None,
        }
    }

    /// The props snapshot for the next redraw. The `Rc` clone is cheap and
    /// pins the painted map version the layer will iterate.
    pub fn props(&self) -> Props {
        Props {
            pixels: Rc::clone(&self.pixels),
            active_tool: self.active_tool,
            selected_color: self.selected_color,
            grid_visible: self.grid_visible,
            pencil_active: self.pencil_active,
            touch_device: self.touch_device,
        }
    }

    pub fn pixels(&self) -> &PixelMap {
        &self.pixels
    }

    pub fn selected_color(&self) -> Rgb {
        self.selected_color
    }

    pub fn color_history(&self) -> &[Rgb] {
        &self.color_history
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.active_tool
    }

    /// Remaining paint charges.
    pub fn ration(&self) -> u32 {
        self.ration
    }

    pub fn last_zoom(&self) -> Option<f64> {
        self.last_zoom
    }

    /// Takes the pending informational-popup request, if a non-tool click
    /// produced one since the last call.
    pub fn take_popup_request(&mut self) -> Option<GeoPoint> {
        self.popup_request.take()
    }

    /// Selects a color the way the palette does: updates the selection and
    /// moves the color to the front of the history.
    pub fn select_color(&mut self, color: Rgb) {
        self.selected_color = color;
        self.color_history.retain(|c| *c != color);
        self.color_history.insert(0, color);
        self.color_history
            .truncate(self.config.render.history_palette_size);
    }

    /// Activates `tool`, or deactivates it if it is already active.
    pub fn toggle_tool(&mut self, tool: Tool) {
        self.active_tool = if self.active_tool == Some(tool) {
            None
        } else {
            Some(tool)
        };
    }

    pub fn set_pencil_active(&mut self, active: bool) {
        self.pencil_active = active;
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    pub fn set_touch_device(&mut self, touch: bool) {
        self.touch_device = touch;
    }

    /// One refill tick: restores charges up to the configured maximum. The
    /// collaborator drives the clock at `config.ration.refill_interval_ms`.
    pub fn refill_tick(&mut self) {
        self.ration = u32::min(
            self.config.ration.max,
            self.ration + self.config.ration.refill_amount,
        );
    }

    /// Serializes the painted map in the persisted array-of-entries form:
    /// `[["x_y", "#rrggbb"], ...]`.
    pub fn export_json(&self) -> anyhow::Result<String> {
        let entries: Vec<(&String, &Rgb)> = self.pixels.iter().collect();
        serde_json::to_string(&entries).context("failed to serialize painted map")
    }

    /// Loads a painted map from the array-of-entries form, replacing the
    /// current one. Entries with malformed or out-of-range keys are
    /// skipped, not fatal; a persisted document from an older build should
    /// never brick the map.
    pub fn import_json(&mut self, json: &str) -> anyhow::Result<()> {
        let entries: Vec<(String, Rgb)> =
            serde_json::from_str(json).context("failed to parse painted map")?;
        let dim = self.config.grid.world_dimension;
        let mut map = PixelMap::with_capacity(entries.len());
        for (key, color) in entries {
            match grid::try_decode_key(&key) {
                Some((x, y)) if x < dim && y < dim => {
                    map.insert(key, color);
                }
                _ => warn!("dropping entry with invalid cell key: {key:?}"),
            }
        }
        debug!("imported {} painted cells", map.len());
        self.pixels = Rc::new(map);
        Ok(())
    }
}

impl PaintCallbacks for PixelStore {
    /// Paints the selected color into `key`, spending one charge.
    ///
    /// A no-op when the ration is exhausted or the cell already holds the
    /// selected color (a pencil drag revisits cells constantly).
    fn place_pixel(&mut self, key: &str) {
        if self.ration == 0 {
            debug!("place suppressed: ration exhausted");
            return;
        }
        if self.pixels.get(key) == Some(&self.selected_color) {
            return;
        }
        Rc::make_mut(&mut self.pixels).insert(key.to_string(), self.selected_color);
        self.ration -= 1;
        let color = self.selected_color;
        self.select_color(color);
    }

    fn erase_pixel(&mut self, key: &str) {
        if !self.pixels.contains_key(key) {
            return;
        }
        Rc::make_mut(&mut self.pixels).remove(key);
    }

    /// Samples a painted cell into the selection, through the same path the
    /// palette uses, and switches to the paint tool so the sampled color is
    /// immediately usable. Picking an empty cell changes nothing.
    fn pick_color(&mut self, key: &str) {
        let Some(color) = self.pixels.get(key).copied() else {
            return;
        };
        self.select_color(color);
        self.active_tool = Some(Tool::Paint);
    }

    fn zoom_changed(&mut self, zoom: f64) {
        self.last_zoom = Some(zoom);
    }

    fn show_popup(&mut self, at: GeoPoint) {
        self.popup_request = Some(at);
    }
}
