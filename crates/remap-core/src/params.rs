//! Normalized host parameters. FFGL-style hosts deliver every parameter as
//! a float in [0,1]; each legacy plugin rescaled its sliders differently on
//! the way into the shader. The scalings live here, one named mapping per
//! observed convention, so the effect catalog can reproduce them exactly.

/// How a normalized [0,1] slider value maps onto a physical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamScale {
    /// (2v − 1) · π — centred, ±180°. The generalized re-projection
    /// effect's rotation sliders.
    CenteredHalfTurn,
    /// (2v − 1) · 2π — centred, ±360°. The fisheye-rotation sliders.
    CenteredFullTurn,
    /// v · π/2 — up to 90°. The generalized effect's field-of-view sliders.
    QuarterTurn,
    /// v · π — up to 180°. The flat-projection field-of-view sliders.
    HalfTurn,
    /// v · 2 — the aspect-ratio slider.
    Doubled,
    /// v unchanged — fade bounds and other unitless fractions.
    Unit,
}

impl ParamScale {
    /// Rescales a normalized slider value to physical units (radians for
    /// the angular scales).
    pub fn to_physical(self, value: f32) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI, TAU};
        match self {
            ParamScale::CenteredHalfTurn => (2.0 * value - 1.0) * PI,
            ParamScale::CenteredFullTurn => (2.0 * value - 1.0) * TAU,
            ParamScale::QuarterTurn => value * FRAC_PI_2,
            ParamScale::HalfTurn => value * PI,
            ParamScale::Doubled => value * 2.0,
            ParamScale::Unit => value,
        }
    }

    /// Human-readable rendering of a slider value, in the units the legacy
    /// plugins displayed (degrees for angles).
    pub fn display(self, value: f32) -> String {
        match self {
            ParamScale::CenteredHalfTurn => format!("{:.1}°", value * 360.0 - 180.0),
            ParamScale::CenteredFullTurn => format!("{:.1}°", value * 720.0 - 360.0),
            ParamScale::QuarterTurn => format!("{:.1}°", value * 90.0),
            ParamScale::HalfTurn => format!("{:.1}°", value * 180.0),
            ParamScale::Doubled => format!("{:.2}", value * 2.0),
            ParamScale::Unit => format!("{value:.2}"),
        }
    }
}

/// One host-visible parameter: display name, default slider position, and
/// the scaling into physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub default: f32,
    pub scale: ParamScale,
}

impl ParamSpec {
    pub const fn new(name: &'static str, default: f32, scale: ParamScale) -> Self {
        Self { name, default, scale }
    }

    pub fn physical(&self, value: f32) -> f32 {
        self.scale.to_physical(value)
    }

    pub fn display(&self, value: f32) -> String {
        self.scale.display(value)
    }
}
