use std::fmt;
use std::str::FromStr;

/// The image parameterizations the pipeline can convert between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// 360° panorama, latitude/longitude mapped linearly onto the axes.
    Equirectangular,
    /// Circular, angle-proportional projection inside the unit circle.
    Fisheye,
    /// Conventional pinhole-camera ("rectilinear") projection.
    Flat,
    /// Six cube faces in a 2×3 cross atlas.
    Cubemap,
}

impl Projection {
    pub const ALL: [Projection; 4] = [
        Projection::Equirectangular,
        Projection::Fisheye,
        Projection::Flat,
        Projection::Cubemap,
    ];

    /// The legacy selector index used by the host-facing option parameter.
    pub fn index(self) -> u32 {
        match self {
            Projection::Equirectangular => 0,
            Projection::Fisheye => 1,
            Projection::Flat => 2,
            Projection::Cubemap => 3,
        }
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Projection::Equirectangular => "equirectangular",
            Projection::Fisheye => "fisheye",
            Projection::Flat => "flat",
            Projection::Cubemap => "cubemap",
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown projection '{0}'; expected equirectangular, fisheye, flat, or cubemap")]
pub struct ParseProjectionError(String);

impl FromStr for Projection {
    type Err = ParseProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equirectangular" | "equirect" | "equi" | "360" => Ok(Projection::Equirectangular),
            "fisheye" => Ok(Projection::Fisheye),
            "flat" | "rectilinear" => Ok(Projection::Flat),
            "cubemap" | "cube" => Ok(Projection::Cubemap),
            other => Err(ParseProjectionError(other.to_string())),
        }
    }
}
