//! TOML job files: a `convert` invocation captured on disk so conversions
//! can be versioned and repeated. Files are parsed permissively by serde
//! and then validated into fully typed values in one pass.

use std::path::PathBuf;

use serde::Deserialize;

use remap_core::{Projection, RadialFade, Rotation, StereoLayout};
use remap_render::Filter;

use crate::cli::{parse_fade, parse_size};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse job file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid job: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotationTable {
    #[serde(default)]
    pub pitch: f32,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub roll: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub from: String,
    pub to: String,
    /// Rotation angles in degrees.
    #[serde(default)]
    pub rotation: RotationTable,
    /// Field of view in degrees for the source side.
    #[serde(default)]
    pub fov_in: Option<f32>,
    /// Field of view in degrees for the destination side.
    #[serde(default)]
    pub fov_out: Option<f32>,
    /// Output resolution as `WIDTHxHEIGHT`.
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub stereo: Option<String>,
    /// Radial fade bounds as `INNER:OUTER`.
    #[serde(default)]
    pub fade: Option<String>,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub threads: Option<usize>,
}

/// A job with every field parsed into its typed form.
#[derive(Debug, Clone)]
pub struct ResolvedJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source: Projection,
    pub target: Projection,
    pub rotation: Rotation,
    pub fov_in: Option<f32>,
    pub fov_out: Option<f32>,
    pub size: Option<(u32, u32)>,
    pub stereo: StereoLayout,
    pub fade: Option<RadialFade>,
    pub filter: Filter,
    pub threads: usize,
}

impl JobConfig {
    pub fn from_toml_str(raw: &str) -> Result<ResolvedJob, ConfigError> {
        let config: JobConfig = toml::from_str(raw)?;
        config.resolve()
    }

    fn resolve(&self) -> Result<ResolvedJob, ConfigError> {
        let source = self
            .from
            .parse::<Projection>()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        let target = self
            .to
            .parse::<Projection>()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        let stereo = match &self.stereo {
            Some(raw) => raw
                .parse::<StereoLayout>()
                .map_err(|err| ConfigError::Invalid(err.to_string()))?,
            None => StereoLayout::Mono,
        };
        let filter = match &self.filter {
            Some(raw) => raw.parse::<Filter>().map_err(ConfigError::Invalid)?,
            None => Filter::default(),
        };
        let size = match &self.size {
            Some(raw) => Some(parse_size(raw).map_err(ConfigError::Invalid)?),
            None => None,
        };
        let fade = match &self.fade {
            Some(raw) => Some(parse_fade(raw).map_err(ConfigError::Invalid)?),
            None => None,
        };
        for (name, fov) in [("fov_in", self.fov_in), ("fov_out", self.fov_out)] {
            if let Some(value) = fov {
                if !(0.0..=360.0).contains(&value) {
                    return Err(ConfigError::Invalid(format!(
                        "{name} must be between 0 and 360 degrees, got {value}"
                    )));
                }
            }
        }

        Ok(ResolvedJob {
            input: self.input.clone(),
            output: self.output.clone(),
            source,
            target,
            rotation: Rotation::from_degrees(
                self.rotation.pitch,
                self.rotation.yaw,
                self.rotation.roll,
            ),
            fov_in: self.fov_in,
            fov_out: self.fov_out,
            size,
            stereo,
            fade,
            filter,
            threads: self.threads.unwrap_or(0),
        })
    }
}
