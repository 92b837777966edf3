//! Coordinate transforms for panoramic re-projection.
//!
//! Everything routes through one spherical intermediate representation: a
//! destination pixel's normalized coordinate is lifted onto the unit sphere
//! through the destination projection, rotated, then dropped back into the
//! source projection to find the pixel to sample. The supported
//! parameterizations are equirectangular (360°), fisheye, rectilinear
//! ("flat"), and the 2×3 cross cubemap atlas.
//!
//! ```text
//!   dest uv ─▶ Projection::uv→sphere ─▶ rotate ─▶ sphere→uv ─▶ source uv
//! ```
//!
//! Conversions that can land outside a projection's valid domain return
//! [`OutOfDomain`]; callers composite a fully transparent pixel instead of
//! sampling out-of-range texture memory.
//!
//! Axis convention (used consistently by every module): x points right,
//! y points forward, z points up; `lat = asin(z/r)`, `lon = atan2(x, y)`.

pub mod cubemap;
pub mod effects;
pub mod equirect;
pub mod error;
pub mod fisheye;
pub mod flat;
pub mod params;
pub mod projection;
pub mod remap;
pub mod rotation;
pub mod sphere;

pub use effects::Effect;
pub use error::OutOfDomain;
pub use params::{ParamScale, ParamSpec};
pub use projection::Projection;
pub use remap::{RadialFade, Remap, Resample, StereoLayout};
pub use rotation::Rotation;
pub use sphere::LatLon;
