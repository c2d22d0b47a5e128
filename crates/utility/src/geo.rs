pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Bounding box around a center point, suitable for pruning candidates
/// before an exact haversine comparison. Returns
/// `((min_lat, min_lon), (max_lat, max_lon))` in degrees.
pub fn calculate_bounding_box(
    lat: f64,
    lon: f64,
    radius_m: f64,
) -> ((f64, f64), (f64, f64)) {
    let lat_rad = to_radians(lat);
    let lon_rad = to_radians(lon);

    // Latitude bounds
    let min_lat = lat_rad - radius_m / EARTH_RADIUS_M;
    let max_lat = lat_rad + radius_m / EARTH_RADIUS_M;

    // Longitude bounds (adjusted by latitude)
    let min_lon = lon_rad - radius_m / (EARTH_RADIUS_M * lat_rad.cos());
    let max_lon = lon_rad + radius_m / (EARTH_RADIUS_M * lat_rad.cos());

    (
        (to_degrees(min_lat), to_degrees(min_lon)),
        (to_degrees(max_lat), to_degrees(max_lon)),
    )
}

/// Great-circle distance between two coordinates, in meters.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance() {
        assert!(approx::abs_diff_eq!(
            haversine_distance(14.7167, -17.4677, 14.7167, -17.4677),
            0.0
        ));
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 1.0);
        // one degree of arc on the reference sphere
        assert!(approx::relative_eq!(distance, 111_195.0, max_relative = 1e-3));
    }

    #[test]
    fn short_hop_is_symmetric() {
        let forward = haversine_distance(14.7167, -17.4677, 14.7200, -17.4700);
        let backward = haversine_distance(14.7200, -17.4700, 14.7167, -17.4677);
        assert!(approx::abs_diff_eq!(forward, backward, epsilon = 1e-9));
        assert!(forward > 300.0 && forward < 600.0);
    }

    #[test]
    fn bounding_box_contains_points_within_radius() {
        let (center_lat, center_lon) = (14.7167, -17.4677);
        let ((min_lat, min_lon), (max_lat, max_lon)) =
            calculate_bounding_box(center_lat, center_lon, 500.0);

        assert!(min_lat < center_lat && center_lat < max_lat);
        assert!(min_lon < center_lon && center_lon < max_lon);

        // a point 400 m north is inside the box
        let north_lat = center_lat + 400.0 / 111_195.0;
        assert!(north_lat < max_lat);
    }
}
