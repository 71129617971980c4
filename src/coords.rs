// src/coords.rs

//! The projection module: pure functions mapping geographic coordinates to
//! the discrete world grid and back.
//!
//! The forward direction is the standard spherical Web Mercator projection
//! scaled to the configured world dimension and floor-truncated to integer
//! cell coordinates. The inverse recovers the geographic position of a
//! cell's top-left (north-west) corner exactly, up to the floating-point
//! resolution available at million-cell scale.
//!
//! None of these functions hold state; the grid dimension is passed in from
//! [`crate::config::GridConfig`] by every caller.

use crate::geo::{GeoBounds, GeoPoint};
use std::f64::consts::PI;

/// Normalizes a longitude into `[-180, 180]` by repeated ±360° shifts.
///
/// A longitude of exactly +180° is left as is; the forward projection maps
/// it to grid column `world_dimension`, which is out of range, so a click
/// precisely on the antimeridian's eastern expression yields no cell. This
/// mirrors the half-open `[-180, 180)` domain of the grid.
pub fn normalize_lng(mut lng: f64) -> f64 {
    while lng > 180.0 {
        lng -= 360.0;
    }
    while lng < -180.0 {
        lng += 360.0;
    }
    lng
}

/// Projects a geographic point to fractional world-grid coordinates,
/// without truncation.
///
/// Returns `None` when the Mercator ordinate is not finite (the exact
/// poles). The result may still lie outside `[0, dim)` on the y axis for
/// latitudes beyond the Mercator square; callers that need a valid cell
/// must range-check, which [`lat_lng_to_world_xy`] does.
pub fn fractional_world_xy(lat: f64, lng: f64, dim: u32) -> Option<(f64, f64)> {
    let norm_lng = normalize_lng(lng);
    let lat_rad = lat.to_radians();
    let dim = f64::from(dim);

    let x = ((norm_lng + 180.0) / 360.0) * dim;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * dim;

    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some((x, y))
}

/// Projects a geographic point to the discrete cell containing it.
///
/// Longitude is normalized first, so any world copy of the same physical
/// point maps to the same cell. Returns `None` when the floored result
/// falls outside `[0, dim)` on either axis, which happens near the poles
/// where Mercator's vertical range runs off the grid.
///
/// Accepted boundary tolerance: for a point computed *from* a cell corner
/// via [`world_xy_to_lat_lng`], re-projection can land one cell off, because
/// at million-cell scale a single ulp of the Mercator math crosses the
/// `floor` boundary. Property tests therefore assert containment in the
/// cell's bounds rather than bit-exact equality.
pub fn lat_lng_to_world_xy(lat: f64, lng: f64, dim: u32) -> Option<(u32, u32)> {
    let (fx, fy) = fractional_world_xy(lat, lng, dim)?;
    let x = fx.floor();
    let y = fy.floor();
    let dim = f64::from(dim);
    if x < 0.0 || x >= dim || y < 0.0 || y >= dim {
        return None;
    }
    Some((x as u32, y as u32))
}

/// Recovers the geographic position of cell `(x, y)`'s top-left corner.
///
/// Exact algebraic inverse of the forward transform before truncation.
/// `x` and `y` are taken as `u32` but `x = dim` / `y = dim` are accepted so
/// the south-east corner of the last cell can be computed.
pub fn world_xy_to_lat_lng(x: u32, y: u32, dim: u32) -> GeoPoint {
    let dim = f64::from(dim);
    let lng = (f64::from(x) / dim) * 360.0 - 180.0;
    let n = PI - (2.0 * PI * f64::from(y)) / dim;
    let lat = n.sinh().atan().to_degrees();
    GeoPoint::new(lat, lng)
}

/// The geographic bounding box of cell `(x, y)`: its north-west corner is
/// `inverse(x, y)` and its south-east corner `inverse(x+1, y+1)`, assembled
/// as a south-west/north-east pair.
pub fn cell_bounds(x: u32, y: u32, dim: u32) -> GeoBounds {
    let nw = world_xy_to_lat_lng(x, y, dim);
    let se = world_xy_to_lat_lng(x + 1, y + 1, dim);
    GeoBounds::new(GeoPoint::new(se.lat, nw.lng), GeoPoint::new(nw.lat, se.lng))
}

/// A cell's position decomposed into a sub-tile and an in-tile offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileAddress {
    pub tile_x: u32,
    pub tile_y: u32,
    pub pixel_x: u32,
    pub pixel_y: u32,
}

/// Decomposes grid coordinates into tile and in-tile coordinates.
///
/// Purely informational (used by the info popup). Negative input yields
/// `None` rather than an error.
pub fn tile_address(x: i64, y: i64, tile_size: u32) -> Option<TileAddress> {
    if x < 0 || y < 0 || tile_size == 0 {
        return None;
    }
    let tile = i64::from(tile_size);
    Some(TileAddress {
        tile_x: (x / tile) as u32,
        tile_y: (y / tile) as u32,
        pixel_x: (x % tile) as u32,
        pixel_y: (y % tile) as u32,
    })
}

#[cfg(test)]
mod tests;
