// src/lib.rs

//! `pixel-world` is the rendering and interaction engine for an effectively
//! infinite, persistent grid of colored cells overlaid on a pannable and
//! zoomable world map.
//!
//! The engine is backend-agnostic. It never talks to a real map widget or a
//! real drawing canvas; instead it is wired to two collaborator seams:
//!
//! * [`viewport::ViewportContext`] — the host map component, which supplies
//!   the current zoom, the visible geographic bounds, and a per-frame
//!   geographic↔screen transform, and which feeds pointer and zoom events
//!   into the engine as [`viewport::ViewportEvent`]s.
//! * [`surface::Surface`] — the drawing surface, which executes the
//!   [`surface::RenderCommand`] list produced by the [`renderer::Renderer`]
//!   on every redraw.
//!
//! The third seam, [`interaction::PaintCallbacks`], is how the engine
//! proposes state changes (place / erase / pick a cell, zoom notifications,
//! info popups) to whatever owns the painted-cell mapping. A reference
//! implementation of that owner lives in [`store::PixelStore`].
//!
//! [`layer::PixelCanvasLayer`] ties the pieces together with an explicit
//! attach/detach lifecycle and an immutable-props-in, commands-out contract.

pub mod color;
pub mod config;
pub mod coords;
pub mod geo;
pub mod grid;
pub mod interaction;
pub mod layer;
pub mod popup;
pub mod renderer;
pub mod store;
pub mod surface;
pub mod viewport;

pub use color::{Rgb, Rgba};
pub use config::Config;
pub use geo::{GeoBounds, GeoPoint};
pub use interaction::{PaintCallbacks, Tool};
pub use layer::{PixelCanvasLayer, PixelMap, Props};
pub use popup::{LookupToken, PopupController, PopupInfo};
pub use renderer::Renderer;
pub use store::PixelStore;
pub use surface::{CursorStyle, RenderCommand, Surface};
pub use viewport::{ScreenPoint, ViewportContext, ViewportEvent};
