//! Equirectangular projection: latitude and longitude map linearly onto the
//! image axes, covering the whole sphere with no out-of-domain region.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{vec2, Vec2};

use crate::error::OutOfDomain;
use crate::sphere::LatLon;

/// Converts a normalized pixel coordinate to latitude/longitude.
pub fn uv_to_lat_lon(uv: Vec2) -> LatLon {
    LatLon::new(uv.y * PI - FRAC_PI_2, uv.x * TAU - PI)
}

/// Converts latitude/longitude back to a normalized pixel coordinate.
///
/// In-range angles always land inside [0,1]²; the range test only fires for
/// angles outside the sphere parameterization.
pub fn lat_lon_to_uv(lat_lon: LatLon) -> Result<Vec2, OutOfDomain> {
    let uv = vec2((lat_lon.lon + PI) / TAU, (lat_lon.lat + FRAC_PI_2) / PI);
    if !(0.0..=1.0).contains(&uv.x) || !(0.0..=1.0).contains(&uv.y) {
        return Err(OutOfDomain);
    }
    Ok(uv)
}
