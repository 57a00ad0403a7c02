//! Web-Mercator slippy-map tile math.

/// Convert coordinates to integer tile indices at the given zoom level.
///
/// The world is divided into 2^zoom × 2^zoom tiles; for latitudes in
/// (-90, 90) and longitudes in [-180, 180) the result satisfies
/// `0 <= x, y < 2^zoom`. The projection has a tangent singularity at the
/// poles, so ±90° is undefined and not special-cased.
pub fn lat_lon_to_tile(lat: f64, lon: f64, zoom: u8) -> (u32, u32) {
    let n = 2_f64.powi(i32::from(zoom));
    let lat_rad = lat.to_radians();
    let x = ((lon + 180.0) / 360.0 * n).floor();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * n)
        .floor();
    (x as u32, y as u32)
}
