// src/viewport/mock.rs

//! A concrete slippy-map viewport used by tests.
//!
//! Implements the standard EPSG:3857 screen transform: at zoom `z` the
//! whole world projects onto a square of `256 * 2^z` pixels, and the
//! configured geographic center sits in the middle of the screen. Zoom may
//! be fractional.

use super::{ScreenPoint, ViewportContext};
use crate::geo::{GeoBounds, GeoPoint};
use std::f64::consts::PI;

const TILE_EXTENT: f64 = 256.0;

#[derive(Debug, Clone)]
pub struct MockViewport {
    pub center: GeoPoint,
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
}

impl MockViewport {
    pub fn new(center: GeoPoint, zoom: f64, width: u32, height: u32) -> Self {
        MockViewport {
            center,
            zoom,
            width,
            height,
        }
    }

    /// Side of the projected world square in pixels at the current zoom.
    fn world_extent(&self) -> f64 {
        TILE_EXTENT * self.zoom.exp2()
    }

    /// Absolute world-pixel position of a geographic point. Longitude is
    /// taken as-is, so offsets of ±360° land one world-width apart.
    fn project(&self, geo: GeoPoint) -> (f64, f64) {
        let extent = self.world_extent();
        let lat_rad = geo.lat.to_radians();
        let x = (geo.lng + 180.0) / 360.0 * extent;
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * extent;
        (x, y)
    }

    /// Inverse of [`MockViewport::project`]; produces continuous longitudes
    /// outside ±180° when the world pixel coordinate leaves `[0, extent)`.
    fn unproject(&self, x: f64, y: f64) -> GeoPoint {
        let extent = self.world_extent();
        let lng = x / extent * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * y / extent);
        let lat = n.sinh().atan().to_degrees();
        GeoPoint::new(lat, lng)
    }
}

impl ViewportContext for MockViewport {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn bounds(&self) -> GeoBounds {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let sw = self.screen_to_geo(ScreenPoint::new(0.0, h));
        let ne = self.screen_to_geo(ScreenPoint::new(w, 0.0));
        GeoBounds::new(sw, ne)
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn overlay_origin(&self) -> ScreenPoint {
        ScreenPoint::new(0.0, 0.0)
    }

    fn geo_to_screen(&self, geo: GeoPoint) -> ScreenPoint {
        let (px, py) = self.project(geo);
        let (cx, cy) = self.project(self.center);
        ScreenPoint::new(
            px - cx + f64::from(self.width) / 2.0,
            py - cy + f64::from(self.height) / 2.0,
        )
    }

    fn screen_to_geo(&self, screen: ScreenPoint) -> GeoPoint {
        let (cx, cy) = self.project(self.center);
        self.unproject(
            screen.x + cx - f64::from(self.width) / 2.0,
            screen.y + cy - f64::from(self.height) / 2.0,
        )
    }

    fn world_pixel_extent(&self) -> (f64, f64) {
        let extent = self.world_extent();
        (extent, extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_projects_to_screen_center() {
        let vp = MockViewport::new(GeoPoint::new(48.8566, 2.3522), 12.0, 800, 600);
        let p = vp.geo_to_screen(vp.center);
        assert!((p.x - 400.0).abs() < 1e-9);
        assert!((p.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn screen_round_trip() {
        let vp = MockViewport::new(GeoPoint::new(10.0, 20.0), 7.5, 1024, 768);
        let probe = ScreenPoint::new(123.0, 456.0);
        let geo = vp.screen_to_geo(probe);
        let back = vp.geo_to_screen(geo);
        assert!((back.x - probe.x).abs() < 1e-6);
        assert!((back.y - probe.y).abs() < 1e-6);
    }

    #[test]
    fn world_copies_land_one_world_width_apart() {
        let vp = MockViewport::new(GeoPoint::new(0.0, 0.0), 5.0, 800, 600);
        let base = vp.geo_to_screen(GeoPoint::new(12.0, 34.0));
        let east = vp.geo_to_screen(GeoPoint::new(12.0, 34.0 + 360.0));
        let (extent, _) = vp.world_pixel_extent();
        assert!((east.x - base.x - extent).abs() < 1e-6);
        assert!((east.y - base.y).abs() < 1e-9);
    }

    #[test]
    fn bounds_are_ordered_and_centered() {
        let vp = MockViewport::new(GeoPoint::new(30.0, -100.0), 6.0, 640, 480);
        let b = vp.bounds();
        assert!(b.north() > b.south());
        assert!(b.east() > b.west());
        assert!((b.center().lng - (-100.0)).abs() < 1e-9);
    }
}
