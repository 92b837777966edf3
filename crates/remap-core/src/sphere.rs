use glam::{vec3, Vec3};

/// A point on the unit sphere's surface parameterization.
///
/// `lat` ∈ [−π/2, π/2] with the north pole at +π/2; `lon` ∈ [−π, π] with 0
/// looking forward (+y) and positive longitudes to the right (+x).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f32,
    pub lon: f32,
}

impl LatLon {
    pub const fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Converts to a Cartesian direction on the unit sphere.
    pub fn to_point(self) -> Vec3 {
        vec3(
            self.lat.cos() * self.lon.sin(),
            self.lat.cos() * self.lon.cos(),
            self.lat.sin(),
        )
    }

    /// Converts a Cartesian direction back to latitude/longitude.
    ///
    /// The input does not need to be unit length; the radius is divided out.
    /// Both poles collapse longitude to a single representative value, the
    /// expected degeneracy of the parameterization.
    pub fn from_point(point: Vec3) -> Self {
        let r = point.length();
        debug_assert!(r > 0.0, "cannot derive angles from a zero direction");
        Self {
            lat: (point.z / r).clamp(-1.0, 1.0).asin(),
            lon: point.x.atan2(point.y),
        }
    }
}
