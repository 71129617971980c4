// src/layer.rs

//! The host-facing wrapper tying the renderer and the interaction
//! controller to a viewport and a drawing surface.
//!
//! A [`PixelCanvasLayer`] follows the host map's overlay-layer lifecycle:
//! [`PixelCanvasLayer::on_add`] when the layer is attached,
//! [`PixelCanvasLayer::handle_event`] for every viewport event,
//! [`PixelCanvasLayer::set_props`] whenever the owning application swaps in
//! a new props snapshot, [`PixelCanvasLayer::on_remove`] at detach. Every
//! redraw repositions and resizes the surface first, because a pan moves
//! the overlay origin and a window resize changes its dimensions.

use crate::color::{Rgb, DEFAULT_PALETTE};
use crate::config::Config;
use crate::interaction::{cursor_for, InteractionController, PaintCallbacks, Tool};
use crate::renderer::Renderer;
use crate::surface::Surface;
use crate::viewport::{ViewportContext, ViewportEvent};
use anyhow::Result;
use log::debug;
use std::collections::HashMap;
use std::rc::Rc;

/// The painted-cell mapping: cell key to cell color.
///
/// Owned by the application state container and handed to the layer behind
/// an `Rc` as an immutable snapshot. A state change replaces the reference
/// rather than mutating in place, so a redraw always iterates a consistent
/// version.
pub type PixelMap = HashMap<String, Rgb>;

/// The full snapshot of application state the layer renders from.
#[derive(Debug, Clone)]
pub struct Props {
    pub pixels: Rc<PixelMap>,
    pub active_tool: Option<Tool>,
    pub selected_color: Rgb,
    pub grid_visible: bool,
    pub pencil_active: bool,
    /// On touch devices the floating tool preview is suppressed; the
    /// finger would cover it.
    pub touch_device: bool,
}

impl Default for Props {
    fn default() -> Self {
        Props {
            pixels: Rc::new(PixelMap::new()),
            active_tool: None,
            selected_color: DEFAULT_PALETTE[5],
            grid_visible: true,
            pencil_active: false,
            touch_device: false,
        }
    }
}

/// An overlay layer that paints the world grid over a host map viewport.
#[derive(Debug, Default)]
pub struct PixelCanvasLayer {
    config: Config,
    renderer: Renderer,
    controller: InteractionController,
    props: Props,
    attached: bool,
}

impl PixelCanvasLayer {
    pub fn new(config: Config) -> Self {
        PixelCanvasLayer {
            config,
            ..Default::default()
        }
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Attaches the layer: sizes the surface to the viewport, applies the
    /// current cursor affordance and paints the first frame.
    pub fn on_add(
        &mut self,
        viewport: &dyn ViewportContext,
        surface: &mut dyn Surface,
    ) -> Result<()> {
        debug!("layer attached");
        self.attached = true;
        self.apply_cursor(viewport, surface)?;
        self.redraw(viewport, surface)
    }

    /// Detaches the layer: clears transient interaction state and restores
    /// the host's default cursor. The surface itself is the host's to tear
    /// down.
    pub fn on_remove(&mut self, surface: &mut dyn Surface) -> Result<()> {
        debug!("layer detached");
        self.attached = false;
        self.controller.reset();
        surface.set_cursor(crate::surface::CursorStyle::Default)
    }

    /// Replaces the props snapshot and repaints.
    ///
    /// A tool change also reapplies the cursor affordance; everything else
    /// only needs the redraw.
    pub fn set_props(
        &mut self,
        props: Props,
        viewport: &dyn ViewportContext,
        surface: &mut dyn Surface,
    ) -> Result<()> {
        let tool_changed = props.active_tool != self.props.active_tool;
        self.props = props;
        if !self.attached {
            return Ok(());
        }
        if tool_changed {
            self.apply_cursor(viewport, surface)?;
        }
        self.redraw(viewport, surface)
    }

    /// Routes one viewport event through the interaction controller, then
    /// performs whatever the outcome demands.
    pub fn handle_event(
        &mut self,
        event: &ViewportEvent,
        viewport: &dyn ViewportContext,
        surface: &mut dyn Surface,
        callbacks: &mut dyn PaintCallbacks,
    ) -> Result<()> {
        if !self.attached {
            return Ok(());
        }
        let outcome =
            self.controller
                .handle_event(&self.config, event, &self.props, viewport, callbacks);
        if outcome.cursor_changed {
            self.apply_cursor(viewport, surface)?;
        }
        if outcome.redraw {
            self.redraw(viewport, surface)?;
        }
        Ok(())
    }

    /// Repositions and resizes the surface to the viewport, then repaints
    /// the frame from scratch. A no-op before attach.
    pub fn redraw(
        &mut self,
        viewport: &dyn ViewportContext,
        surface: &mut dyn Surface,
    ) -> Result<()> {
        if !self.attached {
            return Ok(());
        }
        let (width, height) = viewport.surface_size();
        surface.reset_geometry(viewport.overlay_origin(), width, height)?;
        let commands =
            self.renderer
                .draw(&self.config, &self.props, self.controller.state(), viewport);
        surface.execute(&commands)?;
        surface.present()
    }

    fn apply_cursor(
        &self,
        viewport: &dyn ViewportContext,
        surface: &mut dyn Surface,
    ) -> Result<()> {
        surface.set_cursor(cursor_for(&self.config, self.props.active_tool, viewport.zoom()))
    }
}
