// src/interaction.rs

//! The interaction controller: turns raw viewport events into paint, erase,
//! pick, popup and redraw decisions.
//!
//! The controller owns the transient pointer state (position and hovered
//! cell) and nothing else; tool, color and pencil flags arrive as immutable
//! props on every event, and all state mutations are proposed through the
//! [`PaintCallbacks`] collaborator. Each handled event yields an
//! [`EventOutcome`] telling the layer whether to redraw and whether the
//! pointer affordance must be recomputed.

use crate::config::Config;
use crate::coords;
use crate::geo::GeoPoint;
use crate::grid;
use crate::layer::Props;
use crate::surface::CursorStyle;
use crate::viewport::{ScreenPoint, ViewportContext, ViewportEvent};
use log::trace;
use serde::{Deserialize, Serialize};

/// The active painting tool. `None` anywhere a tool is optional means the
/// pointer pans the map and clicks open the info popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Paint,
    Eraser,
    Picker,
}

/// Transient pointer state, owned by the controller and borrowed by the
/// renderer on every redraw.
///
/// Both fields are `None` whenever the pointer is outside the viewport or
/// the view is too zoomed out for cells to be addressable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    /// Last known pointer position in surface pixels.
    pub pointer: Option<ScreenPoint>,
    /// Key of the cell under the pointer, if it has one.
    pub hovered_key: Option<String>,
}

/// State-mutation callbacks supplied by whatever owns the painted-cell
/// mapping (see [`crate::store::PixelStore`] for the reference owner).
///
/// `pick_color` must route through the owner's full select-color path —
/// the same one the palette uses, including color-history updates — not
/// merely return a value.
pub trait PaintCallbacks {
    fn place_pixel(&mut self, key: &str);
    fn erase_pixel(&mut self, key: &str);
    fn pick_color(&mut self, key: &str);
    fn zoom_changed(&mut self, zoom: f64);
    fn show_popup(&mut self, at: GeoPoint);
}

/// What the layer must do after an event has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub redraw: bool,
    pub cursor_changed: bool,
}

/// Resolves viewport events against the current props and zoom.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Drops all transient pointer state (used when the layer detaches).
    pub fn reset(&mut self) {
        self.state = InteractionState::default();
    }

    /// Handles one viewport event and reports what the layer must do next.
    pub fn handle_event(
        &mut self,
        config: &Config,
        event: &ViewportEvent,
        props: &Props,
        viewport: &dyn ViewportContext,
        callbacks: &mut dyn PaintCallbacks,
    ) -> EventOutcome {
        match *event {
            ViewportEvent::PointerMove { screen, geo } => {
                self.on_pointer_move(config, screen, geo, props, viewport, callbacks)
            }
            ViewportEvent::Click { geo } => self.on_click(config, geo, props, viewport, callbacks),
            ViewportEvent::PointerLeave => EventOutcome {
                redraw: self.clear_pointer(),
                cursor_changed: false,
            },
            ViewportEvent::ViewChanged => EventOutcome {
                redraw: true,
                cursor_changed: false,
            },
            ViewportEvent::ZoomEnd => {
                callbacks.zoom_changed(viewport.zoom());
                EventOutcome {
                    redraw: true,
                    cursor_changed: true,
                }
            }
        }
    }

    fn on_pointer_move(
        &mut self,
        config: &Config,
        screen: ScreenPoint,
        geo: GeoPoint,
        props: &Props,
        viewport: &dyn ViewportContext,
        callbacks: &mut dyn PaintCallbacks,
    ) -> EventOutcome {
        let zoom = viewport.zoom();
        if zoom < config.zoom.grid_threshold {
            // Cells are not addressable this far out; make sure no stale
            // hover survives from a previous zoom level.
            return EventOutcome {
                redraw: self.clear_pointer(),
                cursor_changed: false,
            };
        }

        self.state.pointer = Some(screen);
        self.state.hovered_key = key_at(&geo, config.grid.world_dimension);
        trace!("pointer over cell {:?}", self.state.hovered_key);

        if props.pencil_active {
            // Drag-to-paint: apply the tool on every move. The picker is
            // deliberately excluded from continuous application.
            if let Some(key) = self.state.hovered_key.clone() {
                match props.active_tool {
                    Some(Tool::Paint) => callbacks.place_pixel(&key),
                    Some(Tool::Eraser) => callbacks.erase_pixel(&key),
                    Some(Tool::Picker) | None => {}
                }
            }
        }

        EventOutcome {
            redraw: true,
            cursor_changed: false,
        }
    }

    fn on_click(
        &mut self,
        config: &Config,
        geo: GeoPoint,
        props: &Props,
        viewport: &dyn ViewportContext,
        callbacks: &mut dyn PaintCallbacks,
    ) -> EventOutcome {
        if let Some(tool) = props.active_tool {
            if viewport.zoom() >= config.zoom.grid_threshold {
                // A point without a grid address (poles, precision edge)
                // turns every tool action into a silent no-op.
                if let Some(key) = key_at(&geo, config.grid.world_dimension) {
                    match tool {
                        Tool::Paint => callbacks.place_pixel(&key),
                        Tool::Eraser => callbacks.erase_pixel(&key),
                        Tool::Picker => callbacks.pick_color(&key),
                    }
                }
                return EventOutcome::default();
            }
        }
        // No tool active, or zoomed out past the interaction gate: the
        // click is an informational lookup, not a grid action.
        callbacks.show_popup(geo);
        EventOutcome::default()
    }

    fn clear_pointer(&mut self) -> bool {
        let had_state = self.state.pointer.is_some() || self.state.hovered_key.is_some();
        self.state = InteractionState::default();
        had_state
    }
}

/// The pointer affordance for a tool/zoom combination: a tool-specific
/// cursor only when that tool is actually usable, the host default
/// otherwise.
pub fn cursor_for(config: &Config, tool: Option<Tool>, zoom: f64) -> CursorStyle {
    match tool {
        Some(tool) if zoom >= config.zoom.grid_threshold => match tool {
            Tool::Paint => CursorStyle::Paint,
            Tool::Eraser => CursorStyle::Eraser,
            Tool::Picker => CursorStyle::Picker,
        },
        _ => CursorStyle::Default,
    }
}

/// Resolves a geographic point to its cell key, or `None` when the point
/// has no grid address.
pub fn key_at(geo: &GeoPoint, dim: u32) -> Option<String> {
    let (x, y) = coords::lat_lng_to_world_xy(geo.lat, geo.lng, dim)?;
    Some(grid::encode_key(x, y))
}
