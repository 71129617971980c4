// src/grid.rs

//! Grid addressing: the canonical string key for a cell.
//!
//! A cell at world-grid coordinates `(x, y)` is identified by the key
//! `"x_y"`. The key is the identity of the cell in the painted-cell
//! mapping, so encode and decode must be exact inverses on every valid
//! coordinate pair.

/// Encodes grid coordinates into the canonical `"x_y"` key.
pub fn encode_key(x: u32, y: u32) -> String {
    format!("{x}_{y}")
}

/// Decodes a canonical key back into grid coordinates, or `None` if the
/// key is not of the `"x_y"` form.
pub fn try_decode_key(key: &str) -> Option<(u32, u32)> {
    let (x, y) = key.split_once('_')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}

/// Decodes a canonical key back into grid coordinates.
///
/// # Panics
/// Panics if the key is malformed. Keys reaching this function come from
/// [`encode_key`] (directly or through the painted-cell mapping), so a
/// malformed key is a programming error, not a runtime condition to
/// recover from. Untrusted input goes through [`try_decode_key`].
pub fn decode_key(key: &str) -> (u32, u32) {
    try_decode_key(key)
        .unwrap_or_else(|| panic!("malformed cell key {key:?}: expected \"x_y\" with decimal u32s"))
}
