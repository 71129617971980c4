// src/renderer.rs

//! Translates engine state into a list of drawing commands.
//!
//! The renderer is stateless: every call to [`Renderer::draw`] receives the
//! props snapshot, the interaction state and the viewport, and produces a
//! complete frame as a `Vec<RenderCommand>`. There is no diffing against the
//! previous frame. A pan or zoom can move any number of cells on or off
//! screen and change which world copies are visible, so each frame clears
//! and repaints from scratch.
//!
//! Draw order per frame: painted cells, alignment grid, hover reticle,
//! floating tool preview. A zoom below the pixel-visibility gate collapses
//! the frame to a bare clear.

use crate::color::Rgba;
use crate::config::Config;
use crate::coords;
use crate::geo::{GeoBounds, GeoPoint};
use crate::grid;
use crate::interaction::{InteractionState, Tool};
use crate::layer::Props;
use crate::surface::{RenderCommand, Shadow};
use crate::viewport::{ScreenPoint, ViewportContext};
use log::{trace, warn};

/// Longitude offsets of the world copies a slippy map can show at once.
const WORLD_COPY_OFFSETS: [f64; 3] = [-360.0, 0.0, 360.0];

const GRID_LINE: Rgba = Rgba::new(0, 0, 0, 0.4);
const RETICLE_FILL: Rgba = Rgba::new(200, 200, 200, 0.25);
const RETICLE_BRACKET: Rgba = Rgba::new(20, 184, 166, 0.85);
const PREVIEW_SHADOW: Rgba = Rgba::new(0, 0, 0, 0.5);
const PREVIEW_BORDER_LIGHT: Rgba = Rgba::new(255, 255, 255, 1.0);
const PREVIEW_BORDER_DARK: Rgba = Rgba::new(0, 0, 0, 1.0);
const CHECKER_DARK: Rgba = Rgba::new(0xcc, 0xcc, 0xcc, 1.0);
const CHECKER_LIGHT: Rgba = Rgba::new(0xff, 0xff, 0xff, 1.0);

/// A screen-space cell rectangle with integral corners.
///
/// Width and height are differences of *rounded* corner coordinates, so
/// rectangles of adjacent cells tile without hairline gaps or overlaps.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// The stateless frame renderer.
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    /// Produces the full command list for one frame.
    pub fn draw(
        &self,
        config: &Config,
        props: &Props,
        state: &InteractionState,
        viewport: &dyn ViewportContext,
    ) -> Vec<RenderCommand> {
        let mut commands = vec![RenderCommand::Clear];

        let zoom = viewport.zoom();
        if zoom < config.zoom.pixel_visibility_threshold {
            // Too far out for a one-unit cell to cover even a fraction of
            // a pixel; the frame is just the clear.
            return commands;
        }

        let padded = viewport.bounds().pad(config.render.bounds_pad);
        self.draw_cells(config, props, viewport, &padded, &mut commands);

        if zoom >= config.zoom.grid_threshold {
            if props.grid_visible {
                self.draw_grid(config, viewport, &mut commands);
            }
            self.draw_reticle(config, state, viewport, &padded, &mut commands);
            self.draw_preview(config, props, state, &mut commands);
        }

        trace!("frame: {} commands at zoom {zoom:.2}", commands.len());
        commands
    }

    /// Fills one rectangle per painted cell per visible world copy.
    fn draw_cells(
        &self,
        config: &Config,
        props: &Props,
        viewport: &dyn ViewportContext,
        padded: &GeoBounds,
        commands: &mut Vec<RenderCommand>,
    ) {
        let dim = config.grid.world_dimension;
        for (key, color) in props.pixels.iter() {
            let Some((x, y)) = grid::try_decode_key(key) else {
                warn!("skipping malformed cell key in pixel map: {key:?}");
                continue;
            };
            if x >= dim || y >= dim {
                warn!("skipping out-of-range cell key in pixel map: {key:?}");
                continue;
            }
            let bounds = coords::cell_bounds(x, y, dim);
            for rect in visible_cell_rects(viewport, &bounds, padded) {
                push_fill(commands, rect, (*color).into(), None);
            }
        }
    }

    /// Strokes the cell alignment grid over the whole surface.
    fn draw_grid(
        &self,
        config: &Config,
        viewport: &dyn ViewportContext,
        commands: &mut Vec<RenderCommand>,
    ) {
        let dim = config.grid.world_dimension;
        let (world_w, world_h) = viewport.world_pixel_extent();
        let cell_w = world_w / f64::from(dim);
        let cell_h = world_h / f64::from(dim);
        if cell_w < config.render.min_cell_px_for_grid || cell_h < config.render.min_cell_px_for_grid
        {
            // At this density the grid would shade the map solid.
            return;
        }

        let (width, height) = viewport.surface_size();
        let (width, height) = (f64::from(width), f64::from(height));
        let top_left = viewport.screen_to_geo(ScreenPoint::new(0.0, 0.0));
        let Some((fx, fy)) = coords::fractional_world_xy(top_left.lat, top_left.lng, dim) else {
            return;
        };

        for x in grid_line_offsets(fx.rem_euclid(1.0), cell_w, width) {
            commands.push(RenderCommand::StrokeLine {
                x1: x,
                y1: 0.0,
                x2: x,
                y2: height,
                color: GRID_LINE,
                width: 1.0,
            });
        }
        for y in grid_line_offsets(fy.rem_euclid(1.0), cell_h, height) {
            commands.push(RenderCommand::StrokeLine {
                x1: 0.0,
                y1: y,
                x2: width,
                y2: y,
                color: GRID_LINE,
                width: 1.0,
            });
        }
    }

    /// Highlights the hovered cell with a translucent fill and four corner
    /// brackets, replicated across world copies like the cell fills.
    fn draw_reticle(
        &self,
        config: &Config,
        state: &InteractionState,
        viewport: &dyn ViewportContext,
        padded: &GeoBounds,
        commands: &mut Vec<RenderCommand>,
    ) {
        let Some(key) = state.hovered_key.as_deref() else {
            return;
        };
        let dim = config.grid.world_dimension;
        let Some((x, y)) = grid::try_decode_key(key) else {
            warn!("hovered key is malformed: {key:?}");
            return;
        };
        if x >= dim || y >= dim {
            warn!("hovered key is out of range: {key:?}");
            return;
        }
        let bounds = coords::cell_bounds(x, y, dim);
        for rect in visible_cell_rects(viewport, &bounds, padded) {
            if rect.width <= 1.0 || rect.height <= 1.0 {
                continue;
            }
            push_fill(commands, rect, RETICLE_FILL, None);
            push_brackets(commands, rect);
        }
    }

    /// Draws the floating swatch that previews the active tool's effect
    /// next to the pointer. Skipped on touch devices, where the finger
    /// covers the spot the swatch would occupy.
    fn draw_preview(
        &self,
        config: &Config,
        props: &Props,
        state: &InteractionState,
        commands: &mut Vec<RenderCommand>,
    ) {
        if props.touch_device {
            return;
        }
        let Some(pointer) = state.pointer else {
            return;
        };
        let fill = match props.active_tool {
            Some(Tool::Paint) => Some(props.selected_color),
            Some(Tool::Picker) => state
                .hovered_key
                .as_deref()
                .and_then(|key| props.pixels.get(key))
                .copied(),
            Some(Tool::Eraser) | None => return,
        };

        let size = config.render.preview_size;
        let x = pointer.x + config.render.preview_offset;
        let y = pointer.y + config.render.preview_offset;
        let shadow = Shadow {
            color: PREVIEW_SHADOW,
            blur: 5.0,
            offset_x: 1.0,
            offset_y: 2.0,
        };

        match fill {
            Some(color) => {
                commands.push(RenderCommand::FillRect {
                    x,
                    y,
                    width: size,
                    height: size,
                    color: color.into(),
                    shadow: Some(shadow),
                });
            }
            // Picker over an unpainted cell: a checkerboard stands in for
            // "no color here".
            None => push_checkerboard(commands, x, y, size, config.render.preview_checker_size, shadow),
        }

        // Light-then-dark double border so the swatch reads against any
        // base imagery.
        commands.push(RenderCommand::StrokeRect {
            x,
            y,
            width: size,
            height: size,
            color: PREVIEW_BORDER_LIGHT,
            line_width: 2.0,
        });
        commands.push(RenderCommand::StrokeRect {
            x,
            y,
            width: size,
            height: size,
            color: PREVIEW_BORDER_DARK,
            line_width: 1.0,
        });
    }
}

/// Screen rectangles of a cell across every world copy whose center falls
/// inside the padded viewport bounds. Zero, one or two rectangles in
/// practice; a seam-straddling view yields one per wrapped position.
fn visible_cell_rects(
    viewport: &dyn ViewportContext,
    bounds: &GeoBounds,
    padded: &GeoBounds,
) -> Vec<CellRect> {
    let center = bounds.center();
    WORLD_COPY_OFFSETS
        .iter()
        .filter(|&&offset| padded.contains(&center.with_lng_offset(offset)))
        .filter_map(|&offset| cell_rect(viewport, bounds, offset))
        .collect()
}

/// Projects a cell's bounds (shifted by `lng_offset` degrees) to an
/// integral screen rectangle, or `None` when the projection degenerates to
/// zero area.
fn cell_rect(
    viewport: &dyn ViewportContext,
    bounds: &GeoBounds,
    lng_offset: f64,
) -> Option<CellRect> {
    let nw = viewport.geo_to_screen(GeoPoint::new(bounds.north(), bounds.west() + lng_offset));
    let se = viewport.geo_to_screen(GeoPoint::new(bounds.south(), bounds.east() + lng_offset));
    let x1 = nw.x.round();
    let y1 = nw.y.round();
    let width = se.x.round() - x1;
    let height = se.y.round() - y1;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(CellRect {
        x: x1,
        y: y1,
        width,
        height,
    })
}

/// Positions of the grid lines along one axis.
///
/// `origin_frac` is the sub-cell fraction of the world coordinate at the
/// surface's leading edge, so the first line sits at `-origin_frac * step`
/// and the rest follow at `step` intervals up to (exclusive) `span`. Every
/// position is snapped to a half-pixel boundary for a crisp 1px stroke.
fn grid_line_offsets(origin_frac: f64, step: f64, span: f64) -> Vec<f64> {
    let mut offsets = Vec::new();
    let mut p = -origin_frac * step;
    while p < span {
        offsets.push(p.round() + 0.5);
        p += step;
    }
    offsets
}

fn push_fill(commands: &mut Vec<RenderCommand>, rect: CellRect, color: Rgba, shadow: Option<Shadow>) {
    commands.push(RenderCommand::FillRect {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        color,
        shadow,
    });
}

/// Four L-shaped corner brackets sized relative to the cell rectangle, so
/// the reticle stays legible from barely-zoomed-in to fully zoomed.
fn push_brackets(commands: &mut Vec<RenderCommand>, rect: CellRect) {
    let len = f64::max(3.0, f64::min(rect.width / 3.5, rect.height / 3.5));
    let thickness = f64::max(2.0, f64::min(rect.width / 8.0, rect.height / 8.0));
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);

    let arms = [
        // Top-left: horizontal, then vertical.
        (x, y, len, thickness),
        (x, y, thickness, len),
        // Top-right.
        (x + w - len, y, len, thickness),
        (x + w - thickness, y, thickness, len),
        // Bottom-left.
        (x, y + h - thickness, len, thickness),
        (x, y + h - len, thickness, len),
        // Bottom-right.
        (x + w - len, y + h - thickness, len, thickness),
        (x + w - thickness, y + h - len, thickness, len),
    ];
    for (ax, ay, aw, ah) in arms {
        commands.push(RenderCommand::FillRect {
            x: ax,
            y: ay,
            width: aw,
            height: ah,
            color: RETICLE_BRACKET,
            shadow: None,
        });
    }
}

/// A checkerboard-filled swatch: the picker's "this cell has no color"
/// preview.
fn push_checkerboard(
    commands: &mut Vec<RenderCommand>,
    x: f64,
    y: f64,
    size: f64,
    square: f64,
    shadow: Shadow,
) {
    commands.push(RenderCommand::FillRect {
        x,
        y,
        width: size,
        height: size,
        color: CHECKER_DARK,
        shadow: Some(shadow),
    });
    let squares_per_side = (size / square).ceil() as i32;
    for row in 0..squares_per_side {
        for col in 0..squares_per_side {
            if (row + col) % 2 != 0 {
                continue;
            }
            let sx = x + f64::from(col) * square;
            let sy = y + f64::from(row) * square;
            let sw = f64::min(square, x + size - sx);
            let sh = f64::min(square, y + size - sy);
            if sw <= 0.0 || sh <= 0.0 {
                continue;
            }
            commands.push(RenderCommand::FillRect {
                x: sx,
                y: sy,
                width: sw,
                height: sh,
                color: CHECKER_LIGHT,
                shadow: None,
            });
        }
    }
}
