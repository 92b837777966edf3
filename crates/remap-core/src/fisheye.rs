//! Fisheye projection: a circular image where distance from the centre is a
//! monotone function of the ray's incidence angle against the forward axis.
//!
//! The image centre looks straight forward (+y), screen-right looks right
//! and screen-top looks up. Pixels outside the unit circle are not part of
//! the image and must resolve to transparency, never to a clamped sample.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{vec2, vec3, Vec2, Vec3};

use crate::error::OutOfDomain;
use crate::sphere::LatLon;

/// Below this lateral distance a ray is treated as dead-centre.
const AXIAL_EPSILON: f32 = 1e-7;

/// Incidence angle for a pixel at radius `r` ∈ [0,1] from the image centre.
///
/// `fov = 1` makes the curve exactly angle-linear (ψ = r·π/2), which is the
/// mapping the single-purpose conversion effects use; the generalized
/// re-projection effect drives `fov` from its field-of-view sliders.
fn radius_to_incidence(r: f32, fov: f32) -> f32 {
    FRAC_PI_2 * (r.atan2(1.0) / fov).tan()
}

/// Exact inverse of [`radius_to_incidence`].
fn incidence_to_radius(psi: f32, fov: f32) -> Result<f32, OutOfDomain> {
    let bend = fov * (psi / FRAC_PI_2).atan();
    // Past a quarter turn the tangent wraps negative; the ray cannot appear
    // in a fisheye of this field of view.
    if bend >= FRAC_PI_2 {
        return Err(OutOfDomain);
    }
    Ok(bend.tan())
}

/// Converts a fisheye pixel coordinate to a direction on the unit sphere.
pub fn uv_to_point(uv: Vec2, fov: f32) -> Result<Vec3, OutOfDomain> {
    let pos = 2.0 * uv - Vec2::ONE;
    let r = pos.length();
    if r > 1.0 {
        return Err(OutOfDomain);
    }
    if r < AXIAL_EPSILON {
        return Ok(Vec3::Y);
    }
    let psi = radius_to_incidence(r, fov);
    // At extreme wide angles the radial curve runs past the backward ray;
    // no direction on the sphere corresponds to such a pixel.
    if psi >= PI {
        return Err(OutOfDomain);
    }
    let dir = pos / r;
    Ok(vec3(psi.sin() * dir.x, psi.cos(), psi.sin() * dir.y))
}

/// Converts a direction on the unit sphere to a fisheye pixel coordinate.
pub fn point_to_uv(point: Vec3, fov: f32) -> Result<Vec2, OutOfDomain> {
    let lateral = vec2(point.x, point.z);
    let len = lateral.length();
    if len < AXIAL_EPSILON {
        if point.y < 0.0 {
            // Straight backward: the antipode of the image centre.
            return Err(OutOfDomain);
        }
        return Ok(vec2(0.5, 0.5));
    }
    let psi = len.atan2(point.y);
    let r = incidence_to_radius(psi, fov)?;
    if r > 1.0 {
        return Err(OutOfDomain);
    }
    let pos = lateral / len * r;
    Ok((pos + Vec2::ONE) / 2.0)
}

/// Converts a fisheye pixel coordinate to latitude/longitude.
pub fn uv_to_lat_lon(uv: Vec2, fov: f32) -> Result<LatLon, OutOfDomain> {
    uv_to_point(uv, fov).map(LatLon::from_point)
}

/// Converts latitude/longitude to a fisheye pixel coordinate.
pub fn lat_lon_to_uv(lat_lon: LatLon, fov: f32) -> Result<Vec2, OutOfDomain> {
    point_to_uv(lat_lon.to_point(), fov)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    const EPS: f32 = 1e-5;

    #[test]
    fn centre_looks_forward() {
        let p = uv_to_point(vec2(0.5, 0.5), FRAC_PI_4).unwrap();
        assert!((p - Vec3::Y).length() < EPS);
        let uv = point_to_uv(Vec3::Y, FRAC_PI_4).unwrap();
        assert!((uv - vec2(0.5, 0.5)).length() < EPS);
    }

    #[test]
    fn pixels_outside_the_circle_are_transparent() {
        // Corners of the uv square lie outside the inscribed circle.
        assert_eq!(uv_to_point(vec2(0.0, 0.0), FRAC_PI_4), Err(OutOfDomain));
        assert_eq!(uv_to_point(vec2(1.0, 0.98), FRAC_PI_4), Err(OutOfDomain));
        // On-axis edges are exactly on the rim and stay valid.
        assert!(uv_to_point(vec2(1.0, 0.5), FRAC_PI_4).is_ok());
    }

    #[test]
    fn screen_top_looks_up_and_screen_right_looks_right() {
        let top = uv_to_point(vec2(0.5, 0.9), FRAC_PI_4).unwrap();
        assert!(top.z > 0.0 && top.x.abs() < EPS);
        let right = uv_to_point(vec2(0.9, 0.5), FRAC_PI_4).unwrap();
        assert!(right.x > 0.0 && right.z.abs() < EPS);
    }

    #[test]
    fn uv_round_trips_inside_the_circle() {
        for &fov in &[0.8, 1.0, FRAC_PI_2] {
            for &uv in &[
                vec2(0.5, 0.5),
                vec2(0.7, 0.4),
                vec2(0.25, 0.25),
                vec2(0.5, 0.05),
                vec2(0.95, 0.5),
            ] {
                let point = uv_to_point(uv, fov).unwrap();
                let back = point_to_uv(point, fov).unwrap();
                assert!(
                    (back - uv).length() < EPS,
                    "fov {fov}: expected {uv:?}, got {back:?}"
                );
            }
        }
    }

    #[test]
    fn unit_fov_is_angle_linear() {
        let p = uv_to_point(vec2(1.0, 0.5), 1.0).unwrap();
        // Radius 1 at fov 1 is a quarter turn: the rim looks sideways.
        assert!((p - Vec3::X).length() < EPS);
    }

    #[test]
    fn rays_far_outside_the_field_of_view_are_transparent() {
        // Straight backward can never be inside the image.
        assert_eq!(point_to_uv(-Vec3::Y, FRAC_PI_4), Err(OutOfDomain));
        // A sideways ray falls off the rim once the curve narrows the view.
        assert_eq!(point_to_uv(Vec3::X, 1.5), Err(OutOfDomain));
    }
}
