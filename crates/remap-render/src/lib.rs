//! Render adapter for the panoramic re-projection pipeline.
//!
//! Two ways to run a [`remap_core::Remap`] over real pixels:
//!
//! * [`cpu::render`] evaluates the transform per pixel on the CPU over
//!   [`image`] buffers, honoring the premultiplied-alpha contract.
//! * [`glsl`] emits the GLSL shader pair a GPU host would compile for the
//!   same transform, and validates it through `naga`.
//!
//! Images enter and leave the engine with premultiplied alpha; use the
//! [`alpha`] helpers at the boundary with straight-alpha file formats.

pub mod alpha;
pub mod cpu;
pub mod glsl;
pub mod sampler;

pub use cpu::{render, RenderOptions};
pub use sampler::Filter;
