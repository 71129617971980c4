// src/surface.rs

//! The drawing-surface seam: the intermediate representation the renderer
//! emits, the pointer affordances, and the `Surface` driver trait that
//! executes both.
//!
//! The renderer never draws. It produces a flat list of [`RenderCommand`]s
//! in paint order, and a backend (an HTML canvas binding, a raster buffer,
//! the recording [`headless::HeadlessSurface`] used in tests) executes the
//! batch and presents the frame. Keeping the commands dumb — pixel-space
//! rectangles and lines with concrete colors — keeps every backend trivial
//! and makes the redraw pipeline assertable in tests.

use crate::color::Rgba;
use crate::viewport::ScreenPoint;
use anyhow::Result;

pub mod headless;

/// A drop-shadow to apply while filling a single rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// One drawing primitive, in surface pixel coordinates.
///
/// Cell fills arrive with integral coordinates (the renderer rounds corner
/// points before subtracting, so adjacent cells tile without gaps); grid
/// strokes arrive snapped to half-pixel boundaries for crisp 1px lines.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Clears the entire surface to transparent.
    Clear,
    /// Fills an axis-aligned rectangle.
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
        shadow: Option<Shadow>,
    },
    /// Strokes a single line segment.
    StrokeLine {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Rgba,
        width: f64,
    },
    /// Strokes the outline of a rectangle.
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
        line_width: f64,
    },
}

/// An inline SVG cursor image with its active-point hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorImage {
    pub svg: &'static str,
    /// Hotspot in image pixels; (4, 28) puts the active point at the
    /// bottom-left tip of the 32×32 tool glyphs.
    pub hotspot: (u32, u32),
}

const CURSOR_HOTSPOT: (u32, u32) = (4, 28);

const CURSOR_PAINT_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32" viewBox="0 0 16 16"><path fill="white" stroke="black" stroke-width="0.5" d="M15.825.12a.5.5 0 0 1 .132.584c-1.53 3.43-4.744 8.17-7.095 10.64a6.1 6.1 0 0 1-2.373 1.534c-.018.227-.06.538-.16.868-.201.659-.667 1.479-1.708 1.74a8.1 8.1 0 0 1-3.078.132 4 4 0 0 1-.562-.135 1.4 1.4 0 0 1-.466-.247.7.7 0 0 1-.204-.288.62.62 0 0 1 .004-.443c.095-.245.316-.38.461-.452.394-.197.625-.453.867-.826.095-.144.184-.297.287-.472l.117-.198c.151-.255.326-.54.546-.848.528-.739 1.201-.925 1.746-.896q.19.012.348.048c.062-.172.142-.38.238-.608.261-.619.658-1.419 1.187-2.069 2.176-2.67 6.18-6.206 9.117-8.104a.5.5 0 0 1 .596.04z"/></svg>"#;

const CURSOR_ERASER_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32" viewBox="0 0 16 16"><path fill="white" stroke="black" stroke-width="0.5" d="M8.086 2.207a2 2 0 0 1 2.828 0l3.879 3.879a2 2 0 0 1 0 2.828l-5.5 5.5A2 2 0 0 1 7.879 15H5.12a2 2 0 0 1-1.414-.586l-2.5-2.5a2 2 0 0 1 0-2.828l5.5-5.5z"/></svg>"#;

const CURSOR_PICKER_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32" viewBox="0 0 16 16"><path fill="white" stroke="black" stroke-width="0.5" d="M13.354.646a1.207 1.207 0 0 0-1.708 0L8.5 3.793l-.646-.647a.5.5 0 1 0-.708.708L8.293 5l-7.147 7.146A.5.5 0 0 0 1 12.5v1.793l-.854.853a.5.5 0 1 0 .708.707L1.707 15H3.5a.5.5 0 0 0 .354-.146L11 7.707l1.146 1.147a.5.5 0 0 0 .708-.708l-.647-.646 3.147-3.146a1.207 1.207 0 0 0 0-1.708z"/></svg>"#;

/// The pointer affordance the surface should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// The host viewport's native cursor (pan/grab).
    #[default]
    Default,
    Paint,
    Eraser,
    Picker,
}

impl CursorStyle {
    /// The custom cursor image for this style, or `None` for the host
    /// default.
    pub fn image(&self) -> Option<CursorImage> {
        let svg = match self {
            CursorStyle::Default => return None,
            CursorStyle::Paint => CURSOR_PAINT_SVG,
            CursorStyle::Eraser => CURSOR_ERASER_SVG,
            CursorStyle::Picker => CURSOR_PICKER_SVG,
        };
        Some(CursorImage {
            svg,
            hotspot: CURSOR_HOTSPOT,
        })
    }
}

/// Driver trait for the overlay drawing surface.
///
/// Implementations execute command batches; they do not interpret them.
/// All methods are fallible because real backends sit on foreign handles
/// that can go away (a detached canvas, a lost context).
pub trait Surface {
    /// Repositions the surface at `origin` in the host's layer space and
    /// resizes its backing store to `width`×`height` device pixels.
    /// Called at the start of every redraw, since a pan moves the overlay
    /// and a host resize changes its dimensions.
    fn reset_geometry(&mut self, origin: ScreenPoint, width: u32, height: u32) -> Result<()>;

    /// Executes a batch of drawing commands in order.
    fn execute(&mut self, commands: &[RenderCommand]) -> Result<()>;

    /// Presents the composed frame.
    fn present(&mut self) -> Result<()>;

    /// Applies a pointer affordance over the viewport.
    fn set_cursor(&mut self, cursor: CursorStyle) -> Result<()>;
}
