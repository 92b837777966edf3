//! The consolidated re-projection pipeline: one parameterized transform
//! replacing the per-effect shader variants. A destination pixel is lifted
//! onto the sphere through the destination projection, rotated, then
//! projected back through the source projection to find the sample point.

use std::f32::consts::FRAC_PI_4;
use std::fmt;
use std::str::FromStr;

use glam::{vec2, Vec2, Vec3};

use crate::error::OutOfDomain;
use crate::projection::Projection;
use crate::rotation::Rotation;
use crate::sphere::LatLon;
use crate::{cubemap, equirect, fisheye, flat};

/// Stereoscopic frame packing of both source and destination images.
///
/// The two eyes live in the two halves of the frame; each eye is re-projected
/// independently and samples stay within their own half. The first eye is the
/// lower/left half (uv origin is bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StereoLayout {
    #[default]
    Mono,
    OverUnder,
    SideBySide,
}

impl StereoLayout {
    pub const ALL: [StereoLayout; 3] =
        [StereoLayout::Mono, StereoLayout::OverUnder, StereoLayout::SideBySide];

    /// The legacy selector index used by the host-facing option parameter.
    pub fn index(self) -> u32 {
        match self {
            StereoLayout::Mono => 0,
            StereoLayout::OverUnder => 1,
            StereoLayout::SideBySide => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StereoLayout::Mono => "mono",
            StereoLayout::OverUnder => "over-under",
            StereoLayout::SideBySide => "side-by-side",
        }
    }

    /// Folds a frame coordinate into single-eye space, returning the eye.
    pub fn split(self, uv: Vec2) -> (Vec2, usize) {
        match self {
            StereoLayout::Mono => (uv, 0),
            StereoLayout::OverUnder => {
                if uv.y <= 0.5 {
                    (vec2(uv.x, uv.y * 2.0), 0)
                } else {
                    (vec2(uv.x, (uv.y - 0.5) * 2.0), 1)
                }
            }
            StereoLayout::SideBySide => {
                if uv.x <= 0.5 {
                    (vec2(uv.x * 2.0, uv.y), 0)
                } else {
                    (vec2((uv.x - 0.5) * 2.0, uv.y), 1)
                }
            }
        }
    }

    /// Maps a single-eye coordinate back into the half holding `eye`.
    pub fn merge(self, uv: Vec2, eye: usize) -> Vec2 {
        let offset = if eye == 0 { 0.0 } else { 0.5 };
        match self {
            StereoLayout::Mono => uv,
            StereoLayout::OverUnder => vec2(uv.x, uv.y * 0.5 + offset),
            StereoLayout::SideBySide => vec2(uv.x * 0.5 + offset, uv.y),
        }
    }
}

impl fmt::Display for StereoLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stereo layout '{0}'; expected mono, over-under, or side-by-side")]
pub struct ParseStereoError(String);

impl FromStr for StereoLayout {
    type Err = ParseStereoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mono" | "none" => Ok(StereoLayout::Mono),
            "over-under" | "overunder" | "top-bottom" => Ok(StereoLayout::OverUnder),
            "side-by-side" | "sidebyside" | "sbs" => Ok(StereoLayout::SideBySide),
            other => Err(ParseStereoError(other.to_string())),
        }
    }
}

/// Radial alpha fade over the source fisheye image.
///
/// Fully opaque inside `inner`, fully transparent outside `outer`, with a
/// linear ramp between. Radii are fractions of the fisheye circle's radius.
/// Ignored when the source projection is not a fisheye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialFade {
    pub inner: f32,
    pub outer: f32,
}

impl RadialFade {
    pub const fn new(inner: f32, outer: f32) -> Self {
        Self { inner, outer }
    }

    pub fn coefficient(&self, r: f32) -> f32 {
        if r <= self.inner {
            1.0
        } else if r >= self.outer {
            0.0
        } else {
            (self.outer - r) / (self.outer - self.inner)
        }
    }
}

/// Where to sample the source image for one destination pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resample {
    pub uv: Vec2,
    /// Extra alpha to multiply into the sampled color (radial fade).
    pub alpha: f32,
}

/// A fully parameterized re-projection between two panoramic images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Remap {
    /// Projection of the image being sampled.
    pub source: Projection,
    /// Projection of the image being produced.
    pub target: Projection,
    pub rotation: Rotation,
    /// Source-side field of view in radians.
    pub fov_in: f32,
    /// Destination-side field of view in radians.
    pub fov_out: f32,
    pub source_aspect: f32,
    pub target_aspect: f32,
    pub stereo: StereoLayout,
    pub fade: Option<RadialFade>,
}

impl Remap {
    /// The neutral field of view: the midpoint of the generalized effect's
    /// slider range (0.5 · π/2).
    pub const DEFAULT_FOV: f32 = FRAC_PI_4;

    pub fn new(source: Projection, target: Projection) -> Self {
        Self {
            source,
            target,
            rotation: Rotation::IDENTITY,
            fov_in: Self::DEFAULT_FOV,
            fov_out: Self::DEFAULT_FOV,
            source_aspect: 1.0,
            target_aspect: 1.0,
            stereo: StereoLayout::Mono,
            fade: None,
        }
    }

    /// Resolves a destination pixel coordinate to a source sample, or
    /// `Err(OutOfDomain)` when the pixel must be fully transparent.
    pub fn resolve(&self, uv: Vec2) -> Result<Resample, OutOfDomain> {
        let (eye_uv, eye) = self.stereo.split(uv);
        let point = self.target_point(eye_uv)?;
        let point = self.rotation.rotate(point);
        let (source_uv, alpha) = self.source_sample(point)?;
        Ok(Resample {
            uv: self.stereo.merge(source_uv, eye),
            alpha,
        })
    }

    /// Lifts a destination pixel onto the sphere via the target projection.
    fn target_point(&self, uv: Vec2) -> Result<Vec3, OutOfDomain> {
        match self.target {
            Projection::Equirectangular => Ok(equirect::uv_to_lat_lon(uv).to_point()),
            Projection::Fisheye => fisheye::uv_to_point(uv, self.fov_out),
            Projection::Flat => Ok(flat::uv_to_point(uv, self.fov_out, self.target_aspect)),
            Projection::Cubemap => Ok(cubemap::uv_to_point(uv)),
        }
    }

    /// Projects a sphere direction into the source image.
    fn source_sample(&self, point: Vec3) -> Result<(Vec2, f32), OutOfDomain> {
        match self.source {
            Projection::Equirectangular => {
                let uv = equirect::lat_lon_to_uv(LatLon::from_point(point))?;
                Ok((uv, 1.0))
            }
            Projection::Fisheye => {
                let uv = fisheye::point_to_uv(point, self.fov_in)?;
                let alpha = match self.fade {
                    Some(fade) => fade.coefficient((2.0 * uv - Vec2::ONE).length()),
                    None => 1.0,
                };
                Ok((uv, alpha))
            }
            Projection::Flat => {
                let uv = flat::point_to_uv(point, self.fov_in, self.source_aspect)?;
                Ok((uv, 1.0))
            }
            Projection::Cubemap => Ok((cubemap::point_to_uv(point), 1.0)),
        }
    }
}
