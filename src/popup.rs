// src/popup.rs

//! State for the informational popup behind the non-tool click path.
//!
//! A click with no active tool (or below the interaction zoom) asks for
//! information about a geographic point rather than mutating the grid. The
//! synchronous part — cell key, world coordinates, painted color, tile
//! address — is resolved immediately from the projection and the painted
//! map. The place name comes from an external reverse-geocoding lookup the
//! embedding application performs; [`PopupController::open`] hands out a
//! [`LookupToken`] for it, and a resolve with a stale token (the popup was
//! closed or reopened elsewhere in the meantime) is dropped instead of
//! overwriting the newer popup.

use crate::config::Config;
use crate::coords::{self, TileAddress};
use crate::geo::GeoPoint;
use crate::grid;
use crate::layer::PixelMap;
use log::debug;

/// Everything the info popup displays about one clicked point.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupInfo {
    /// The clicked geographic point, verbatim.
    pub at: GeoPoint,
    /// Cell key, or the empty string when the point has no grid address.
    pub key: String,
    pub world_xy: Option<(u32, u32)>,
    /// Color of the cell, when it is painted.
    pub color: Option<crate::color::Rgb>,
    pub tile: Option<TileAddress>,
    /// Reverse-geocoded place name, once the lookup resolves.
    pub place_name: Option<String>,
}

/// Capability to deliver one asynchronous place-name result.
///
/// The token is valid for exactly the popup generation it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupToken {
    generation: u64,
}

/// Owns the popup state and arbitrates stale lookup results.
#[derive(Debug, Default)]
pub struct PopupController {
    current: Option<PopupInfo>,
    generation: u64,
}

impl PopupController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&PopupInfo> {
        self.current.as_ref()
    }

    /// Opens (or re-targets) the popup at `at`, resolving everything that
    /// can be answered synchronously. Returns the token the asynchronous
    /// place-name lookup must present to [`PopupController::resolve_place_name`].
    pub fn open(&mut self, config: &Config, pixels: &PixelMap, at: GeoPoint) -> LookupToken {
        let dim = config.grid.world_dimension;
        let world_xy = coords::lat_lng_to_world_xy(at.lat, at.lng, dim);
        let (key, color, tile) = match world_xy {
            Some((x, y)) => {
                let key = grid::encode_key(x, y);
                let color = pixels.get(&key).copied();
                let tile = coords::tile_address(i64::from(x), i64::from(y), config.grid.tile_size);
                (key, color, tile)
            }
            None => (String::new(), None, None),
        };

        self.generation += 1;
        debug!("popup opened at generation {} for key {key:?}", self.generation);
        self.current = Some(PopupInfo {
            at,
            key,
            world_xy,
            color,
            tile,
            place_name: None,
        });
        LookupToken {
            generation: self.generation,
        }
    }

    /// Closes the popup. Any lookup still in flight becomes stale.
    pub fn close(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    /// Delivers a place-name lookup result. Returns whether it was applied;
    /// a result for a closed or superseded popup is ignored.
    pub fn resolve_place_name(&mut self, token: LookupToken, name: String) -> bool {
        if token.generation != self.generation {
            debug!(
                "dropping stale place-name result (generation {} != {})",
                token.generation, self.generation
            );
            return false;
        }
        match self.current.as_mut() {
            Some(info) => {
                info.place_name = Some(name);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::coords::cell_bounds;

    fn painted_map(key: &str, color: Rgb) -> PixelMap {
        let mut map = PixelMap::new();
        map.insert(key.to_string(), color);
        map
    }

    #[test]
    fn open_resolves_key_color_and_tile_synchronously() {
        let config = Config::default();
        let mut popup = PopupController::new();
        let at = cell_bounds(1000, 2000, config.grid.world_dimension).center();
        let pixels = painted_map("1000_2000", Rgb::new(0xe5, 0x00, 0x00));

        popup.open(&config, &pixels, at);

        let info = popup.current().expect("popup is open");
        assert_eq!(info.key, "1000_2000");
        assert_eq!(info.world_xy, Some((1000, 2000)));
        assert_eq!(info.color, Some(Rgb::new(0xe5, 0x00, 0x00)));
        let tile = info.tile.expect("tile address resolved");
        assert_eq!((tile.tile_x, tile.tile_y), (3, 7));
        assert_eq!((tile.pixel_x, tile.pixel_y), (1000 - 3 * 256, 2000 - 7 * 256));
        assert_eq!(info.at, at);
        assert_eq!(info.place_name, None);
    }

    #[test]
    fn open_off_grid_reports_an_empty_address() {
        let config = Config::default();
        let mut popup = PopupController::new();

        popup.open(&config, &PixelMap::new(), GeoPoint::new(89.5, 0.0));

        let info = popup.current().expect("popup opens even off grid");
        assert_eq!(info.key, "");
        assert_eq!(info.world_xy, None);
        assert_eq!(info.color, None);
        assert_eq!(info.tile, None);
    }

    #[test]
    fn current_generation_lookup_applies() {
        let config = Config::default();
        let mut popup = PopupController::new();
        let token = popup.open(&config, &PixelMap::new(), GeoPoint::new(10.0, 20.0));

        assert!(popup.resolve_place_name(token, "Berlin".to_string()));
        assert_eq!(
            popup.current().and_then(|i| i.place_name.as_deref()),
            Some("Berlin")
        );
    }

    #[test]
    fn superseded_lookup_is_dropped() {
        let config = Config::default();
        let mut popup = PopupController::new();
        let stale = popup.open(&config, &PixelMap::new(), GeoPoint::new(10.0, 20.0));
        popup.open(&config, &PixelMap::new(), GeoPoint::new(-30.0, 40.0));

        assert!(!popup.resolve_place_name(stale, "Berlin".to_string()));
        let info = popup.current().expect("second popup still open");
        assert_eq!(info.place_name, None);
        assert_eq!(info.at, GeoPoint::new(-30.0, 40.0));
    }

    #[test]
    fn lookup_after_close_is_dropped() {
        let config = Config::default();
        let mut popup = PopupController::new();
        let token = popup.open(&config, &PixelMap::new(), GeoPoint::new(10.0, 20.0));
        popup.close();

        assert!(!popup.resolve_place_name(token, "Berlin".to_string()));
        assert!(popup.current().is_none());
    }
}
