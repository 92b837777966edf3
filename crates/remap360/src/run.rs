use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use remap_core::{Effect, Projection, RadialFade, Remap, Rotation, StereoLayout};
use remap_render::{alpha, cpu, glsl, Filter, RenderOptions};

use crate::cli::{ConvertArgs, ShaderArgs, ShaderStageArg};
use crate::config::JobConfig;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// One fully specified conversion, whichever way it arrived (flags or job
/// file).
struct Conversion {
    input: PathBuf,
    output: PathBuf,
    source: Projection,
    target: Projection,
    rotation: Rotation,
    fov_in: Option<f32>,
    fov_out: Option<f32>,
    size: Option<(u32, u32)>,
    stereo: StereoLayout,
    fade: Option<RadialFade>,
    filter: Filter,
    threads: usize,
}

pub fn convert(args: ConvertArgs) -> Result<()> {
    execute(Conversion {
        input: args.input,
        output: args.output,
        source: args.source,
        target: args.target,
        rotation: Rotation::from_degrees(args.pitch, args.yaw, args.roll),
        fov_in: args.fov_in,
        fov_out: args.fov_out,
        size: args.size,
        stereo: args.stereo,
        fade: args.fade,
        filter: args.filter,
        threads: args.threads,
    })
}

pub fn run_job(path: &Path) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read job file {}", path.display()))?;
    let job = JobConfig::from_toml_str(&raw)
        .with_context(|| format!("failed to load job file {}", path.display()))?;
    execute(Conversion {
        input: job.input,
        output: job.output,
        source: job.source,
        target: job.target,
        rotation: job.rotation,
        fov_in: job.fov_in,
        fov_out: job.fov_out,
        size: job.size,
        stereo: job.stereo,
        fade: job.fade,
        filter: job.filter,
        threads: job.threads,
    })
}

/// Field of view when none was given: the angle-linear curve for fisheyes
/// (the legacy conversion effects' implicit mapping) and 90° for flat
/// images. The other projections ignore it.
fn default_fov(projection: Projection) -> f32 {
    match projection {
        Projection::Fisheye => 1.0,
        Projection::Flat => std::f32::consts::FRAC_PI_2,
        Projection::Equirectangular | Projection::Cubemap => Remap::DEFAULT_FOV,
    }
}

/// Aspect ratio of a single eye within a (possibly stereo-packed) frame.
fn eye_aspect(width: u32, height: u32, stereo: StereoLayout) -> f32 {
    let (width, height) = match stereo {
        StereoLayout::Mono => (width, height),
        StereoLayout::OverUnder => (width, height.max(2) / 2),
        StereoLayout::SideBySide => (width.max(2) / 2, height),
    };
    width as f32 / height as f32
}

fn execute(conversion: Conversion) -> Result<()> {
    let mut source = image::open(&conversion.input)
        .with_context(|| format!("failed to open input image {}", conversion.input.display()))?
        .to_rgba8();
    let (source_width, source_height) = source.dimensions();
    let (out_width, out_height) = conversion.size.unwrap_or((source_width, source_height));

    let remap = Remap {
        rotation: conversion.rotation,
        fov_in: conversion
            .fov_in
            .map_or(default_fov(conversion.source), f32::to_radians),
        fov_out: conversion
            .fov_out
            .map_or(default_fov(conversion.target), f32::to_radians),
        source_aspect: eye_aspect(source_width, source_height, conversion.stereo),
        target_aspect: eye_aspect(out_width, out_height, conversion.stereo),
        stereo: conversion.stereo,
        fade: conversion.fade,
        ..Remap::new(conversion.source, conversion.target)
    };

    tracing::info!(
        input = %conversion.input.display(),
        source = %conversion.source,
        target = %conversion.target,
        width = out_width,
        height = out_height,
        "re-projecting"
    );

    alpha::premultiply(&mut source);
    let options = RenderOptions {
        filter: conversion.filter,
        threads: conversion.threads,
    };
    let mut output = cpu::render(&source, &remap, out_width, out_height, &options);
    alpha::unpremultiply(&mut output);

    output
        .save(&conversion.output)
        .with_context(|| format!("failed to write output image {}", conversion.output.display()))?;
    tracing::info!(output = %conversion.output.display(), "wrote re-projected image");
    Ok(())
}

pub fn effects() -> Result<()> {
    for effect in Effect::catalog() {
        println!("{} — {}", effect.name(), effect.summary());
        let params = effect.params();
        if params.is_empty() {
            println!("  (no parameters)");
        }
        for spec in params {
            println!(
                "  {:<18} default {:.2} ({})",
                spec.name,
                spec.default,
                spec.display(spec.default)
            );
        }
    }
    Ok(())
}

pub fn shader(args: ShaderArgs) -> Result<()> {
    let source = match args.stage {
        ShaderStageArg::Fragment => glsl::fragment_source(),
        ShaderStageArg::Vertex => glsl::vertex_source().to_string(),
    };
    if args.validate {
        match args.stage {
            ShaderStageArg::Fragment => glsl::validate_fragment()?,
            ShaderStageArg::Vertex => glsl::validate_vertex()?,
        }
        tracing::info!("shader source validated");
    }
    match args.output {
        Some(path) => fs::write(&path, source)
            .with_context(|| format!("failed to write shader source to {}", path.display()))?,
        None => print!("{source}"),
    }
    Ok(())
}
