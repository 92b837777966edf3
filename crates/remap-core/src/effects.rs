//! The legacy effect catalog. Each shipped plugin variant is a preset over
//! the consolidated [`Remap`] pipeline, reproducing its parameter list,
//! defaults, and slider scalings exactly. The single-purpose conversion
//! effects use the angle-linear fisheye curve (fov = 1), matching their
//! fov-less shaders; only the generalized re-projection effect exposes
//! field-of-view sliders.

use crate::params::{ParamScale, ParamSpec};
use crate::projection::Projection;
use crate::remap::{RadialFade, Remap, StereoLayout};
use crate::rotation::Rotation;

/// Fisheye field of view that makes the radial curve angle-linear, the
/// implicit mapping of the fov-less legacy effects.
const LINEAR_FISHEYE_FOV: f32 = 1.0;

const REPROJECTION_PARAMS: [ParamSpec; 5] = [
    ParamSpec::new("Pitch", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("Roll", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("Yaw", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("FOV Out", 0.5, ParamScale::QuarterTurn),
    ParamSpec::new("FOV In", 0.5, ParamScale::QuarterTurn),
];

const EQUI_ROTATION_PARAMS: [ParamSpec; 3] = [
    ParamSpec::new("Pitch", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("Yaw", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("Roll", 0.5, ParamScale::CenteredHalfTurn),
];

const FISHEYE_ROTATION_PARAMS: [ParamSpec; 3] = [
    ParamSpec::new("Roll", 0.5, ParamScale::CenteredFullTurn),
    ParamSpec::new("Pitch", 0.5, ParamScale::CenteredFullTurn),
    ParamSpec::new("Yaw", 0.5, ParamScale::CenteredFullTurn),
];

const FISHEYE_TO_EQUI_PARAMS: [ParamSpec; 5] = [
    ParamSpec::new("Roll", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("Pitch", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("Yaw", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("Inner Radial Fade", 0.8, ParamScale::Unit),
    ParamSpec::new("Outer Radial Fade", 1.0, ParamScale::Unit),
];

const FLAT_TO_EQUI_PARAMS: [ParamSpec; 5] = [
    ParamSpec::new("Pitch", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("Yaw", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("Roll", 0.5, ParamScale::CenteredHalfTurn),
    ParamSpec::new("Field Of View", 0.5, ParamScale::HalfTurn),
    ParamSpec::new("Aspect Ratio", 8.0 / 9.0, ParamScale::Doubled),
];

const FIELD_OF_VIEW_PARAMS: [ParamSpec; 1] =
    [ParamSpec::new("Field Of View", 0.5, ParamScale::HalfTurn)];

/// A legacy plugin variant expressed as a preset over [`Remap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// The generalized effect: any projection to any projection.
    Reprojection {
        source: Projection,
        target: Projection,
        stereo: StereoLayout,
    },
    EquiRotation,
    FisheyeRotation,
    EquiToFisheye,
    FisheyeToEqui,
    FlatToEqui,
    FlatToFisheye,
    FisheyeToFlat,
}

impl Effect {
    /// All effects, with the generalized one in its neutral configuration.
    pub fn catalog() -> Vec<Effect> {
        vec![
            Effect::Reprojection {
                source: Projection::Equirectangular,
                target: Projection::Equirectangular,
                stereo: StereoLayout::Mono,
            },
            Effect::EquiRotation,
            Effect::FisheyeRotation,
            Effect::EquiToFisheye,
            Effect::FisheyeToEqui,
            Effect::FlatToEqui,
            Effect::FlatToFisheye,
            Effect::FisheyeToFlat,
        ]
    }

    pub fn from_name(name: &str) -> Option<Effect> {
        Self::catalog()
            .into_iter()
            .find(|effect| effect.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Effect::Reprojection { .. } => "reprojection",
            Effect::EquiRotation => "equi-rotation",
            Effect::FisheyeRotation => "fisheye-rotation",
            Effect::EquiToFisheye => "equi-to-fisheye",
            Effect::FisheyeToEqui => "fisheye-to-equi",
            Effect::FlatToEqui => "flat-to-equi",
            Effect::FlatToFisheye => "flat-to-fisheye",
            Effect::FisheyeToFlat => "fisheye-to-flat",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Effect::Reprojection { .. } => "change image projection",
            Effect::EquiRotation => "rotate 360 videos",
            Effect::FisheyeRotation => "rotate fisheye videos",
            Effect::EquiToFisheye => "convert 360 videos into fisheye videos",
            Effect::FisheyeToEqui => "convert fisheye videos into 360 videos",
            Effect::FlatToEqui => "place a flat video inside a 360 panorama",
            Effect::FlatToFisheye => "convert flat videos into fisheye videos",
            Effect::FisheyeToFlat => "convert fisheye videos into flat videos",
        }
    }

    /// The host-visible float parameters, in registration order.
    pub fn params(&self) -> &'static [ParamSpec] {
        match self {
            Effect::Reprojection { .. } => &REPROJECTION_PARAMS,
            Effect::EquiRotation => &EQUI_ROTATION_PARAMS,
            Effect::FisheyeRotation => &FISHEYE_ROTATION_PARAMS,
            Effect::EquiToFisheye => &[],
            Effect::FisheyeToEqui => &FISHEYE_TO_EQUI_PARAMS,
            Effect::FlatToEqui => &FLAT_TO_EQUI_PARAMS,
            Effect::FlatToFisheye | Effect::FisheyeToFlat => &FIELD_OF_VIEW_PARAMS,
        }
    }

    pub fn default_values(&self) -> Vec<f32> {
        self.params().iter().map(|spec| spec.default).collect()
    }

    /// Slider value at `index`, falling back to the default when the host
    /// never set it (the same leniency as the plugin parameter tables).
    fn physical(&self, values: &[f32], index: usize) -> f32 {
        let spec = &self.params()[index];
        let value = values.get(index).copied().unwrap_or(spec.default);
        spec.physical(value.clamp(0.0, 1.0))
    }

    /// Builds the consolidated pipeline for the given slider values.
    ///
    /// Aspect ratios default to 1 except where an effect carries its own
    /// aspect slider; callers rendering real images overwrite them from the
    /// image dimensions.
    pub fn remap(&self, values: &[f32]) -> Remap {
        match self {
            Effect::Reprojection { source, target, stereo } => Remap {
                rotation: Rotation::new(
                    self.physical(values, 0),
                    self.physical(values, 2),
                    self.physical(values, 1),
                ),
                fov_out: self.physical(values, 3),
                fov_in: self.physical(values, 4),
                stereo: *stereo,
                ..Remap::new(*source, *target)
            },
            Effect::EquiRotation => Remap {
                rotation: Rotation::new(
                    self.physical(values, 0),
                    self.physical(values, 1),
                    self.physical(values, 2),
                ),
                ..Remap::new(Projection::Equirectangular, Projection::Equirectangular)
            },
            Effect::FisheyeRotation => Remap {
                rotation: Rotation::new(
                    self.physical(values, 1),
                    self.physical(values, 2),
                    self.physical(values, 0),
                ),
                fov_in: LINEAR_FISHEYE_FOV,
                fov_out: LINEAR_FISHEYE_FOV,
                ..Remap::new(Projection::Fisheye, Projection::Fisheye)
            },
            Effect::EquiToFisheye => Remap {
                fov_out: LINEAR_FISHEYE_FOV,
                ..Remap::new(Projection::Equirectangular, Projection::Fisheye)
            },
            Effect::FisheyeToEqui => Remap {
                rotation: Rotation::new(
                    self.physical(values, 1),
                    self.physical(values, 2),
                    self.physical(values, 0),
                ),
                fov_in: LINEAR_FISHEYE_FOV,
                fade: Some(RadialFade::new(
                    self.physical(values, 3),
                    self.physical(values, 4),
                )),
                ..Remap::new(Projection::Fisheye, Projection::Equirectangular)
            },
            Effect::FlatToEqui => Remap {
                rotation: Rotation::new(
                    self.physical(values, 0),
                    self.physical(values, 1),
                    self.physical(values, 2),
                ),
                fov_in: self.physical(values, 3),
                source_aspect: self.physical(values, 4),
                ..Remap::new(Projection::Flat, Projection::Equirectangular)
            },
            Effect::FlatToFisheye => Remap {
                fov_in: self.physical(values, 0),
                fov_out: LINEAR_FISHEYE_FOV,
                ..Remap::new(Projection::Flat, Projection::Fisheye)
            },
            Effect::FisheyeToFlat => Remap {
                fov_in: LINEAR_FISHEYE_FOV,
                fov_out: self.physical(values, 0),
                ..Remap::new(Projection::Fisheye, Projection::Flat)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPS: f32 = 1e-5;

    #[test]
    fn catalog_names_are_unique_and_resolvable() {
        let catalog = Effect::catalog();
        assert_eq!(catalog.len(), 8);
        for effect in &catalog {
            assert_eq!(Effect::from_name(effect.name()).as_ref(), Some(effect));
        }
    }

    #[test]
    fn midpoint_sliders_mean_no_rotation() {
        for effect in Effect::catalog() {
            let remap = effect.remap(&effect.default_values());
            assert!(
                remap.rotation.is_identity(),
                "{} defaults should not rotate",
                effect.name()
            );
        }
    }

    #[test]
    fn reprojection_sliders_rescale_exactly() {
        let effect = Effect::Reprojection {
            source: Projection::Equirectangular,
            target: Projection::Fisheye,
            stereo: StereoLayout::Mono,
        };
        // Pitch, Roll, Yaw, FOV Out, FOV In.
        let remap = effect.remap(&[0.75, 0.5, 0.25, 1.0, 0.5]);
        assert!((remap.rotation.pitch - FRAC_PI_2).abs() < EPS);
        assert!((remap.rotation.yaw + FRAC_PI_2).abs() < EPS);
        assert_eq!(remap.rotation.roll, 0.0);
        assert!((remap.fov_out - FRAC_PI_2).abs() < EPS);
        assert!((remap.fov_in - FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn fisheye_rotation_sliders_span_a_full_turn_per_side() {
        let remap = Effect::FisheyeRotation.remap(&[0.5, 0.75, 0.5]);
        assert!((remap.rotation.pitch - PI).abs() < EPS);
        assert_eq!(remap.source, Projection::Fisheye);
        assert_eq!(remap.fov_in, 1.0);
    }

    #[test]
    fn conversion_presets_pick_the_right_projections() {
        let remap = Effect::EquiToFisheye.remap(&[]);
        assert_eq!(remap.source, Projection::Equirectangular);
        assert_eq!(remap.target, Projection::Fisheye);
        assert_eq!(remap.fov_out, 1.0);

        let remap = Effect::FisheyeToFlat.remap(&Effect::FisheyeToFlat.default_values());
        assert_eq!(remap.source, Projection::Fisheye);
        assert_eq!(remap.target, Projection::Flat);
        assert!((remap.fov_out - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn fisheye_to_equi_carries_its_fade_defaults() {
        let remap = Effect::FisheyeToEqui.remap(&Effect::FisheyeToEqui.default_values());
        let fade = remap.fade.expect("fade preset");
        assert!((fade.inner - 0.8).abs() < EPS);
        assert!((fade.outer - 1.0).abs() < EPS);
    }

    #[test]
    fn flat_to_equi_defaults_to_a_widescreen_plane() {
        let remap = Effect::FlatToEqui.remap(&Effect::FlatToEqui.default_values());
        assert!((remap.source_aspect - 16.0 / 9.0).abs() < EPS);
        assert!((remap.fov_in - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let remap = Effect::FisheyeToEqui.remap(&[0.5]);
        assert!(remap.rotation.is_identity());
        assert_eq!(remap.fade, Some(RadialFade::new(0.8, 1.0)));
    }
}
