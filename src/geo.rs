// src/geo.rs

//! Geographic value types shared by the projection, viewport and renderer
//! modules: a latitude/longitude point and a south-west/north-east bounding
//! box.
//!
//! Longitudes are *not* normalized by these types. A viewport that has been
//! panned across the antimeridian reports bounds whose longitudes run past
//! ±180°, and the renderer probes cell centers shifted by whole world copies
//! (±360°); both rely on plain arithmetic comparisons here.

use serde::{Deserialize, Serialize};

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// The same point shifted east by `offset` degrees of longitude.
    /// Used to probe repeated world copies (`offset` = −360, 0, +360).
    pub fn with_lng_offset(&self, offset: f64) -> Self {
        GeoPoint::new(self.lat, self.lng + offset)
    }
}

/// An axis-aligned geographic bounding box, stored as its south-west and
/// north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub sw: GeoPoint,
    pub ne: GeoPoint,
}

impl GeoBounds {
    pub const fn new(sw: GeoPoint, ne: GeoPoint) -> Self {
        GeoBounds { sw, ne }
    }

    pub fn north(&self) -> f64 {
        self.ne.lat
    }

    pub fn south(&self) -> f64 {
        self.sw.lat
    }

    pub fn west(&self) -> f64 {
        self.sw.lng
    }

    pub fn east(&self) -> f64 {
        self.ne.lng
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.sw.lat + self.ne.lat) / 2.0,
            (self.sw.lng + self.ne.lng) / 2.0,
        )
    }

    /// Returns a copy of these bounds grown (or shrunk, for a negative
    /// ratio) by `ratio` of its size in every direction.
    ///
    /// A ratio of `0.2` on a 10°×10° box yields a 14°×14° box around the
    /// same center, matching the padding the host map applies when asked
    /// for extended bounds.
    pub fn pad(&self, ratio: f64) -> GeoBounds {
        let lat_pad = (self.ne.lat - self.sw.lat) * ratio;
        let lng_pad = (self.ne.lng - self.sw.lng) * ratio;
        GeoBounds::new(
            GeoPoint::new(self.sw.lat - lat_pad, self.sw.lng - lng_pad),
            GeoPoint::new(self.ne.lat + lat_pad, self.ne.lng + lng_pad),
        )
    }

    /// Inclusive containment test on both axes.
    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.lat >= self.sw.lat && p.lat <= self.ne.lat && p.lng >= self.sw.lng && p.lng <= self.ne.lng
    }
}
