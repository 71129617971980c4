// src/viewport.rs

//! The viewport collaborator seam.
//!
//! The host map component owns the base imagery, the camera and the event
//! loop. The engine only ever sees it through [`ViewportContext`] — a
//! read-only snapshot interface whose transform is valid for the current
//! frame — and through the [`ViewportEvent`]s the host forwards.
//!
//! [`mock::MockViewport`] implements the trait with a plain slippy-map
//! transform and backs the renderer and interaction tests.

use crate::geo::{GeoBounds, GeoPoint};

#[cfg(test)]
pub mod mock;

/// A point in screen (container pixel) coordinates; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        ScreenPoint { x, y }
    }
}

/// Events the host viewport forwards into the engine.
///
/// `PointerMove` and `Click` carry the geographic point under the pointer
/// as resolved by the host for the current frame; `PointerMove` also
/// carries the raw screen position, which the tool preview follows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    PointerMove { screen: ScreenPoint, geo: GeoPoint },
    Click { geo: GeoPoint },
    PointerLeave,
    /// A continuous pan/zoom frame, or the settled end of a pan. Triggers a
    /// redraw and nothing else.
    ViewChanged,
    /// A zoom gesture settled on its final level.
    ZoomEnd,
}

/// Read-only view of the host map, valid for the duration of one event or
/// redraw.
///
/// The geographic↔screen transform must *not* normalize longitudes: the
/// renderer projects cell corners shifted by whole world copies (±360°)
/// and expects them to land one world-width apart on screen. Likewise,
/// [`ViewportContext::bounds`] reports running longitudes when the view
/// spans the antimeridian (e.g. west 170°, east 190°).
pub trait ViewportContext {
    /// Current zoom level, in the host's (possibly fractional) scale.
    fn zoom(&self) -> f64;

    /// Currently visible geographic bounds, unpadded.
    fn bounds(&self) -> GeoBounds;

    /// Pixel dimensions of the drawing surface overlaying the view.
    fn surface_size(&self) -> (u32, u32);

    /// Position at which the overlay surface must be placed to cover the
    /// view, in the host's layer coordinate space.
    fn overlay_origin(&self) -> ScreenPoint;

    /// Projects a geographic point to screen coordinates.
    fn geo_to_screen(&self, geo: GeoPoint) -> ScreenPoint;

    /// Resolves a screen position back to a geographic point. The returned
    /// longitude is continuous (it exceeds ±180° when the view does).
    fn screen_to_geo(&self, screen: ScreenPoint) -> GeoPoint;

    /// Size in screen pixels of the whole projected world at the current
    /// zoom, per axis.
    fn world_pixel_extent(&self) -> (f64, f64);
}
