// src/coords/tests.rs

use super::*;

const DIM: u32 = 1_300_000;

#[test]
fn equator_prime_meridian_maps_to_grid_center() {
    assert_eq!(lat_lng_to_world_xy(0.0, 0.0, DIM), Some((DIM / 2, DIM / 2)));
}

#[test]
fn west_edge_maps_to_column_zero_and_east_edge_is_out_of_range() {
    assert_eq!(lat_lng_to_world_xy(0.0, -180.0, DIM), Some((0, DIM / 2)));
    // Exactly +180° is the open end of the longitude domain.
    assert_eq!(lat_lng_to_world_xy(0.0, 180.0, DIM), None);
}

#[test]
fn forward_is_invariant_under_world_wrap() {
    let samples = [
        (48.8566, 2.3522),
        (-33.9, 151.2),
        (37.77, -122.42),
        (0.0, -179.9999),
    ];
    for (lat, lng) in samples {
        let base = lat_lng_to_world_xy(lat, lng, DIM);
        assert!(base.is_some(), "sample ({lat}, {lng}) should be on-grid");
        assert_eq!(lat_lng_to_world_xy(lat, lng + 360.0, DIM), base);
        assert_eq!(lat_lng_to_world_xy(lat, lng - 360.0, DIM), base);
        assert_eq!(lat_lng_to_world_xy(lat, lng + 720.0, DIM), base);
    }
}

#[test]
fn polar_latitudes_have_no_address() {
    // Beyond the Mercator square (±85.051°) the projected row leaves the
    // grid; the exact poles additionally produce non-finite intermediates.
    for lat in [90.0, 89.0, 86.0, -86.0, -89.0, -90.0] {
        assert_eq!(
            lat_lng_to_world_xy(lat, 10.0, DIM),
            None,
            "lat {lat} should be unaddressable"
        );
    }
}

#[test]
fn inverse_recovers_the_mercator_square_corners() {
    let nw = world_xy_to_lat_lng(0, 0, DIM);
    assert!((nw.lng - (-180.0)).abs() < 1e-9);
    assert!((nw.lat - 85.051_128_779_806_6).abs() < 1e-9);

    let center = world_xy_to_lat_lng(DIM / 2, DIM / 2, DIM);
    assert!(center.lat.abs() < 1e-9);
    assert!(center.lng.abs() < 1e-9);
}

#[test]
fn forward_of_inverse_lands_inside_the_original_cell() {
    // Bit-exact round-trips are not guaranteed at million-cell scale (one
    // ulp of Mercator math can cross the floor boundary), so the property
    // is containment: the recovered corner re-projects into the cell's own
    // bounding box, i.e. within one unit of the original coordinates.
    let samples = [
        (0u32, 1u32),
        (1, 1),
        (650_000, 650_000),
        (658_521, 439_442),
        (DIM - 1, DIM / 2),
        (12_345, 1_234_567),
        (DIM - 1, DIM - 1),
    ];
    for (x, y) in samples {
        let corner = world_xy_to_lat_lng(x, y, DIM);
        let (rx, ry) = lat_lng_to_world_xy(corner.lat, corner.lng, DIM)
            .unwrap_or_else(|| panic!("corner of ({x}, {y}) should stay on-grid"));
        assert!(
            rx.abs_diff(x) <= 1 && ry.abs_diff(y) <= 1,
            "({x}, {y}) round-tripped to ({rx}, {ry})"
        );
    }
}

#[test]
fn forward_of_cell_center_is_exact() {
    // The center of a cell is comfortably away from the floor boundary, so
    // the round-trip through geographic space is exact.
    let samples = [(0u32, 650_000u32), (650_000, 650_000), (999_999, 12)];
    for (x, y) in samples {
        let bounds = cell_bounds(x, y, DIM);
        let center = bounds.center();
        assert_eq!(
            lat_lng_to_world_xy(center.lat, center.lng, DIM),
            Some((x, y)),
            "center of ({x}, {y}) must re-project exactly"
        );
    }
}

#[test]
fn cell_bounds_are_ordered_and_adjacent() {
    let b = cell_bounds(658_521, 439_442, DIM);
    assert!(b.north() > b.south());
    assert!(b.east() > b.west());

    // The east edge of a cell is the west edge of its right neighbor.
    let right = cell_bounds(658_522, 439_442, DIM);
    assert_eq!(b.east(), right.west());
    // The south edge of a cell is the north edge of the cell below.
    let below = cell_bounds(658_521, 439_443, DIM);
    assert_eq!(b.south(), below.north());
}

#[test]
fn fractional_coordinates_floor_to_the_discrete_cell() {
    let (lat, lng) = (48.8566, 2.3522);
    let (fx, fy) = fractional_world_xy(lat, lng, DIM).unwrap();
    let (x, y) = lat_lng_to_world_xy(lat, lng, DIM).unwrap();
    assert_eq!(fx.floor() as u32, x);
    assert_eq!(fy.floor() as u32, y);
    assert!((0.0..1.0).contains(&(fx - fx.floor())));
}

#[test]
fn normalize_lng_examples() {
    assert_eq!(normalize_lng(0.0), 0.0);
    assert_eq!(normalize_lng(-180.0), -180.0);
    assert_eq!(normalize_lng(181.0), -179.0);
    assert_eq!(normalize_lng(-181.0), 179.0);
    assert_eq!(normalize_lng(365.0), 5.0);
    assert_eq!(normalize_lng(-725.0), -5.0);
}

#[test]
fn tile_address_decomposition() {
    let addr = tile_address(513, 256, 256).unwrap();
    assert_eq!(
        addr,
        TileAddress {
            tile_x: 2,
            tile_y: 1,
            pixel_x: 1,
            pixel_y: 0,
        }
    );
    assert_eq!(tile_address(0, 0, 256).unwrap().tile_x, 0);
    assert_eq!(tile_address(-1, 5, 256), None);
    assert_eq!(tile_address(5, -1, 256), None);
    assert_eq!(tile_address(5, 5, 0), None);
}
