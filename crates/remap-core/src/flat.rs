//! Rectilinear ("flat") projection: the standard pinhole camera. The image
//! is a plane at unit forward distance whose half-extent is tan(fov/2),
//! with the horizontal axis additionally scaled by the aspect ratio.

use glam::{vec2, vec3, Vec2, Vec3};

use crate::error::OutOfDomain;
use crate::sphere::LatLon;

/// Converts a flat-image pixel coordinate to a ray direction.
///
/// The result is not unit length; downstream conversions divide the radius
/// out. `fov` is the horizontal field of view in radians.
pub fn uv_to_point(uv: Vec2, fov: f32, aspect: f32) -> Vec3 {
    let pos = 2.0 * uv - Vec2::ONE;
    let half = (fov * 0.5).tan();
    vec3(pos.x * half * aspect, 1.0, pos.y * half)
}

/// Converts a ray direction to a flat-image pixel coordinate.
///
/// Rays at or behind the camera plane and rays that land outside the image
/// plane's bounds are out of domain.
pub fn point_to_uv(point: Vec3, fov: f32, aspect: f32) -> Result<Vec2, OutOfDomain> {
    if point.y <= 0.0 {
        return Err(OutOfDomain);
    }
    let half = (fov * 0.5).tan();
    let x = point.x / (point.y * half * aspect);
    let y = point.z / (point.y * half);
    let uv = vec2((x + 1.0) * 0.5, (y + 1.0) * 0.5);
    if !(0.0..=1.0).contains(&uv.x) || !(0.0..=1.0).contains(&uv.y) {
        return Err(OutOfDomain);
    }
    Ok(uv)
}

/// Converts a flat-image pixel coordinate to latitude/longitude.
pub fn uv_to_lat_lon(uv: Vec2, fov: f32, aspect: f32) -> LatLon {
    LatLon::from_point(uv_to_point(uv, fov, aspect))
}

/// Converts latitude/longitude to a flat-image pixel coordinate.
pub fn lat_lon_to_uv(lat_lon: LatLon, fov: f32, aspect: f32) -> Result<Vec2, OutOfDomain> {
    point_to_uv(lat_lon.to_point(), fov, aspect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn centre_is_the_forward_ray() {
        let p = uv_to_point(vec2(0.5, 0.5), FRAC_PI_2, 16.0 / 9.0);
        assert!((p - Vec3::Y).length() < EPS);
    }

    #[test]
    fn ninety_degree_fov_spans_the_unit_plane() {
        // At 90° the right edge of a square image sits 45° off axis.
        let p = uv_to_point(vec2(1.0, 0.5), FRAC_PI_2, 1.0);
        assert!((p - vec3(1.0, 1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn uv_round_trips_inside_the_plane() {
        let aspect = 16.0 / 9.0;
        for &uv in &[
            vec2(0.5, 0.5),
            vec2(0.2, 0.8),
            vec2(0.0, 0.0),
            vec2(1.0, 1.0),
            vec2(0.9, 0.1),
        ] {
            let back = point_to_uv(uv_to_point(uv, FRAC_PI_2, aspect), FRAC_PI_2, aspect).unwrap();
            assert!((back - uv).length() < EPS, "expected {uv:?}, got {back:?}");
        }
    }

    #[test]
    fn rays_behind_the_camera_are_transparent() {
        assert_eq!(point_to_uv(-Vec3::Y, FRAC_PI_2, 1.0), Err(OutOfDomain));
        assert_eq!(point_to_uv(vec3(0.3, 0.0, 0.1), FRAC_PI_2, 1.0), Err(OutOfDomain));
    }

    #[test]
    fn rays_outside_the_plane_bounds_are_transparent() {
        // 60° off axis is outside a 90° horizontal field of view.
        let ray = vec3(60f32.to_radians().tan(), 1.0, 0.0);
        assert_eq!(point_to_uv(ray, FRAC_PI_2, 1.0), Err(OutOfDomain));
    }

    #[test]
    fn aspect_widens_the_horizontal_axis_only() {
        let wide = uv_to_point(vec2(1.0, 1.0), FRAC_PI_2, 2.0);
        let square = uv_to_point(vec2(1.0, 1.0), FRAC_PI_2, 1.0);
        assert!((wide.x - 2.0 * square.x).abs() < EPS);
        assert!((wide.z - square.z).abs() < EPS);
    }
}
